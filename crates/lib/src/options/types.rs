use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ConfigError;

fn unknown(field: &'static str, value: &str, expected: &[&str]) -> ConfigError {
  ConfigError::UnknownValue {
    field,
    value: value.to_string(),
    expected: expected.join(", "),
  }
}

/// Geometry backend the nesting headers are compiled against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Geometries {
  Clipper,
  Boost,
  Eigen,
}

impl Geometries {
  pub const ALL: [Geometries; 3] = [Self::Clipper, Self::Boost, Self::Eigen];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Clipper => "clipper",
      Self::Boost => "boost",
      Self::Eigen => "eigen",
    }
  }
}

impl FromStr for Geometries {
  type Err = ConfigError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|g| g.as_str() == s)
      .ok_or_else(|| unknown("geometries", s, &Self::ALL.map(|g| g.as_str())))
  }
}

impl fmt::Display for Geometries {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Numerical optimizer backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Optimizer {
  Nlopt,
  Optimlib,
}

impl Optimizer {
  pub const ALL: [Optimizer; 2] = [Self::Nlopt, Self::Optimlib];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Nlopt => "nlopt",
      Self::Optimlib => "optimlib",
    }
  }
}

impl FromStr for Optimizer {
  type Err = ConfigError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|o| o.as_str() == s)
      .ok_or_else(|| unknown("optimizer", s, &Self::ALL.map(|o| o.as_str())))
  }
}

impl fmt::Display for Optimizer {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Threading backend used by the placement strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Threading {
  Std,
  Tbb,
  Omp,
  None,
}

impl Threading {
  pub const ALL: [Threading; 4] = [Self::Std, Self::Tbb, Self::Omp, Self::None];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Std => "std",
      Self::Tbb => "tbb",
      Self::Omp => "omp",
      Self::None => "none",
    }
  }
}

impl FromStr for Threading {
  type Err = ConfigError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|t| t.as_str() == s)
      .ok_or_else(|| unknown("threading", s, &Self::ALL.map(|t| t.as_str())))
  }
}

impl fmt::Display for Threading {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BuildType {
  Debug,
  #[default]
  Release,
  RelWithDebInfo,
  MinSizeRel,
}

impl BuildType {
  pub const ALL: [BuildType; 4] = [Self::Debug, Self::Release, Self::RelWithDebInfo, Self::MinSizeRel];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Debug => "Debug",
      Self::Release => "Release",
      Self::RelWithDebInfo => "RelWithDebInfo",
      Self::MinSizeRel => "MinSizeRel",
    }
  }
}

impl FromStr for BuildType {
  type Err = ConfigError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|b| b.as_str() == s)
      .ok_or_else(|| unknown("build_type", s, &Self::ALL.map(|b| b.as_str())))
  }
}

impl fmt::Display for BuildType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Position-independent code request.
///
/// `NotApplicable` is distinct from `Disabled`: it means the option does not
/// exist for this configuration (shared builds, MSVC-class compilers, Windows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fpic {
  Enabled,
  Disabled,
  NotApplicable,
}

impl Fpic {
  pub fn from_request(requested: bool) -> Self {
    if requested { Self::Enabled } else { Self::Disabled }
  }

  pub fn is_applicable(&self) -> bool {
    !matches!(self, Self::NotApplicable)
  }
}

/// A loosely-typed option value, as accepted from callers and propagated to
/// dependencies.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
  Bool(bool),
  Text(String),
}

impl OptionValue {
  /// Parses a command-line token: `true`/`false` in any case become booleans.
  pub fn parse_token(token: &str) -> Self {
    match token.to_ascii_lowercase().as_str() {
      "true" => Self::Bool(true),
      "false" => Self::Bool(false),
      _ => Self::Text(token.to_string()),
    }
  }

  pub fn as_bool(&self, field: &'static str) -> Result<bool, ConfigError> {
    match self {
      Self::Bool(b) => Ok(*b),
      Self::Text(s) => match s.to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(unknown(field, s, &["True", "False"])),
      },
    }
  }

  pub fn as_text(&self) -> String {
    match self {
      Self::Bool(true) => "True".to_string(),
      Self::Bool(false) => "False".to_string(),
      Self::Text(s) => s.clone(),
    }
  }
}

impl From<bool> for OptionValue {
  fn from(value: bool) -> Self {
    Self::Bool(value)
  }
}

impl From<&str> for OptionValue {
  fn from(value: &str) -> Self {
    Self::Text(value.to_string())
  }
}

impl From<String> for OptionValue {
  fn from(value: String) -> Self {
    Self::Text(value)
  }
}

impl fmt::Display for OptionValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_text())
  }
}
