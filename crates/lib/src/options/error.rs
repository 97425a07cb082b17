use thiserror::Error;

/// Errors raised while building or validating an [`OptionSet`](super::OptionSet).
///
/// Every variant names the offending field together with the observed and
/// required values so callers can print a precise diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
  #[error("unknown value '{value}' for {field} (expected one of: {expected})")]
  UnknownValue {
    field: &'static str,
    value: String,
    expected: String,
  },

  #[error("unknown option '{0}'")]
  UnknownOption(String),

  #[error("missing required setting '{0}'")]
  MissingSetting(&'static str),

  #[error("invalid {field} '{value}': {message}")]
  InvalidVersion {
    field: &'static str,
    value: String,
    message: String,
  },

  #[error(
    "compiler {family} {version} reports compiler.cppstd={observed} but C++{required} is required"
  )]
  CppStdTooLow {
    family: String,
    version: String,
    observed: String,
    required: u32,
  },

  #[error("compiler {family} {version} is older than {minimum}, the minimum supporting C++{required_std}")]
  CompilerTooOld {
    family: String,
    version: String,
    minimum: String,
    required_std: u32,
  },

  #[error("options {fields} cannot be combined: {reason}")]
  Unsatisfiable { fields: String, reason: String },
}
