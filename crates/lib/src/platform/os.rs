use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::options::ConfigError;

/// Target operating systems a recipe can be resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Os {
  Linux,
  Macos,
  #[serde(rename = "iOS")]
  Ios,
  FreeBSD,
  Android,
  Windows,
  Emscripten,
}

impl Os {
  pub const ALL: [Os; 7] = [
    Self::Linux,
    Self::Macos,
    Self::Ios,
    Self::FreeBSD,
    Self::Android,
    Self::Windows,
    Self::Emscripten,
  ];

  /// Detect the operating system the tool itself runs on.
  ///
  /// Returns `None` on hosts the recipe has no name for.
  pub fn current() -> Option<Self> {
    match std::env::consts::OS {
      "linux" => Some(Self::Linux),
      "macos" => Some(Self::Macos),
      "freebsd" => Some(Self::FreeBSD),
      "windows" => Some(Self::Windows),
      _ => None,
    }
  }

  /// Returns the settings identifier for this OS
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Linux => "Linux",
      Self::Macos => "Macos",
      Self::Ios => "iOS",
      Self::FreeBSD => "FreeBSD",
      Self::Android => "Android",
      Self::Windows => "Windows",
      Self::Emscripten => "Emscripten",
    }
  }

  /// Apple platforms link dynamic libraries as Mach-O `.dylib`.
  pub fn is_apple(&self) -> bool {
    matches!(self, Self::Macos | Self::Ios)
  }

  /// Desktop POSIX systems where the standard thread backend needs `pthread`.
  pub fn links_pthread(&self) -> bool {
    matches!(self, Self::Linux | Self::FreeBSD | Self::Macos)
  }
}

impl FromStr for Os {
  type Err = ConfigError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|os| os.as_str().eq_ignore_ascii_case(s))
      .ok_or_else(|| ConfigError::UnknownValue {
        field: "os",
        value: s.to_string(),
        expected: Self::ALL.map(|os| os.as_str()).join(", "),
      })
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn current_os_round_trips_through_settings_name() {
    if let Some(os) = Os::current() {
      assert_eq!(os.as_str().parse::<Os>().unwrap(), os);
    }
  }

  #[test]
  fn parsing_ignores_case() {
    assert_eq!("macos".parse::<Os>().unwrap(), Os::Macos);
    assert_eq!("IOS".parse::<Os>().unwrap(), Os::Ios);
    assert!("plan9".parse::<Os>().is_err());
  }

  #[test]
  fn pthread_only_on_desktop_posix() {
    let linked: Vec<Os> = Os::ALL.into_iter().filter(|os| os.links_pthread()).collect();
    assert_eq!(linked, vec![Os::Linux, Os::Macos, Os::FreeBSD]);
  }
}
