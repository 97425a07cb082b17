use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use semver::Version;
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Families that get the MSVC structural accommodations.
const MSVC_CLASS: [&str; 2] = ["msvc", "visual-studio"];

/// Host compiler identity as reported by the toolchain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Compiler {
  /// Normalized family name (`gcc`, `clang`, `apple-clang`, `msvc`, `visual-studio`, ...).
  pub family: String,
  pub version: Version,
  pub cppstd: Option<CppStd>,
}

impl Compiler {
  pub fn new(family: &str, version: &str) -> Result<Self, ConfigError> {
    Ok(Self {
      family: normalize_family(family),
      version: parse_compiler_version(version)?,
      cppstd: None,
    })
  }

  pub fn with_cppstd(mut self, cppstd: CppStd) -> Self {
    self.cppstd = Some(cppstd);
    self
  }

  pub fn is_msvc_class(&self) -> bool {
    MSVC_CLASS.contains(&self.family.as_str())
  }
}

impl fmt::Display for Compiler {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}", self.family, self.version)
  }
}

/// Lowercases the family and joins words with `-` so `Visual Studio` and
/// `visual-studio` compare equal.
pub fn normalize_family(family: &str) -> String {
  family
    .trim()
    .split_whitespace()
    .map(|part| part.to_ascii_lowercase())
    .collect::<Vec<_>>()
    .join("-")
}

/// Parses toolchain version strings such as `9`, `13.1` or `192`.
///
/// Compilers rarely report three components, so missing ones are zero-filled.
pub fn parse_compiler_version(raw: &str) -> Result<Version, ConfigError> {
  let invalid = |message: String| ConfigError::InvalidVersion {
    field: "compiler.version",
    value: raw.to_string(),
    message,
  };

  let parts: Vec<&str> = raw.trim().split('.').collect();
  if parts.is_empty() || parts.len() > 3 {
    return Err(invalid("expected one to three dot-separated numbers".to_string()));
  }

  let mut numbers = [0u64; 3];
  for (slot, part) in numbers.iter_mut().zip(&parts) {
    *slot = part.parse().map_err(|_| invalid(format!("'{}' is not a number", part)))?;
  }

  Ok(Version::new(numbers[0], numbers[1], numbers[2]))
}

/// A C++ standard level as reported in `compiler.cppstd` (`14`, `17`, `gnu20`, ...).
///
/// Two-digit values are ordered by the year they denote, so `98` sorts
/// before `11`. The GNU dialect flag is kept so the level prints back the
/// way it was reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct CppStd {
  pub level: u32,
  pub gnu: bool,
}

impl CppStd {
  pub const fn new(level: u32) -> Self {
    Self { level, gnu: false }
  }

  pub const fn gnu(level: u32) -> Self {
    Self { level, gnu: true }
  }

  pub fn year(&self) -> u32 {
    if self.level >= 90 { 1900 + self.level } else { 2000 + self.level }
  }
}

impl PartialOrd for CppStd {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for CppStd {
  fn cmp(&self, other: &Self) -> Ordering {
    (self.year(), self.gnu).cmp(&(other.year(), other.gnu))
  }
}

impl FromStr for CppStd {
  type Err = ConfigError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let trimmed = s.trim();
    let (gnu, digits) = match trimmed.strip_prefix("gnu") {
      Some(rest) => (true, rest),
      None => (false, trimmed),
    };
    digits
      .parse::<u32>()
      .ok()
      .filter(|n| *n < 100)
      .map(|level| CppStd { level, gnu })
      .ok_or_else(|| ConfigError::InvalidVersion {
        field: "compiler.cppstd",
        value: s.to_string(),
        message: "expected a two-digit standard such as 17 or gnu17".to_string(),
      })
  }
}

impl TryFrom<String> for CppStd {
  type Error = ConfigError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<CppStd> for String {
  fn from(cppstd: CppStd) -> Self {
    cppstd.to_string()
  }
}

impl fmt::Display for CppStd {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.gnu {
      f.write_str("gnu")?;
    }
    write!(f, "{:02}", self.level)
  }
}
