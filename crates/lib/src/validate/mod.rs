//! Option validation.
//!
//! [`validate`] enforces the compiler and platform constraints on an
//! [`OptionSet`] and freezes it into a [`ValidOptions`]. Every later stage
//! takes `&ValidOptions`, so an unvalidated snapshot cannot reach them.

use std::ops::Deref;

use semver::Version;
use tracing::debug;

use crate::consts::MIN_CPPSTD;
use crate::options::{ConfigError, CppStd, Fpic, GeneratorBlock, OptionSet, Threading};
use crate::platform::Os;

/// Minimum compiler version per family for C++17 support.
const MIN_COMPILER_VERSIONS: [(&str, u64); 5] = [
  ("gcc", 9),
  ("clang", 9),
  ("apple-clang", 9),
  ("msvc", 192),
  ("visual-studio", 14),
];

/// Minimum version for a compiler family, `None` for families we know nothing about.
pub fn minimum_compiler_version(family: &str) -> Option<Version> {
  MIN_COMPILER_VERSIONS
    .iter()
    .find(|(known, _)| *known == family)
    .map(|(_, major)| Version::new(*major, 0, 0))
}

/// An [`OptionSet`] that passed validation. Immutable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidOptions {
  options: OptionSet,
}

impl ValidOptions {
  pub fn into_inner(self) -> OptionSet {
    self.options
  }
}

impl Deref for ValidOptions {
  type Target = OptionSet;

  fn deref(&self) -> &OptionSet {
    &self.options
  }
}

pub fn validate(mut options: OptionSet) -> Result<ValidOptions, ConfigError> {
  check_cppstd(&options)?;
  check_compiler_version(&options)?;
  check_combinations(&options)?;

  if !options.fpic_applicable() {
    options.fpic = Fpic::NotApplicable;
  }

  if options.compiler.is_msvc_class() && !options.generator.is_unset() {
    debug!(compiler = %options.compiler, "clearing generator platform and toolset for MSVC-class compiler");
    options.generator = GeneratorBlock::default();
  }

  Ok(ValidOptions { options })
}

fn check_cppstd(options: &OptionSet) -> Result<(), ConfigError> {
  // Toolchains that don't report a standard level can't be checked.
  let Some(cppstd) = options.compiler.cppstd else {
    return Ok(());
  };

  if cppstd < CppStd::new(MIN_CPPSTD) {
    return Err(ConfigError::CppStdTooLow {
      family: options.compiler.family.clone(),
      version: options.compiler.version.to_string(),
      observed: cppstd.to_string(),
      required: MIN_CPPSTD,
    });
  }
  Ok(())
}

fn check_compiler_version(options: &OptionSet) -> Result<(), ConfigError> {
  let compiler = &options.compiler;
  let Some(minimum) = minimum_compiler_version(&compiler.family) else {
    debug!(family = %compiler.family, "unknown compiler family, skipping version gate");
    return Ok(());
  };

  if compiler.version < minimum {
    return Err(ConfigError::CompilerTooOld {
      family: compiler.family.clone(),
      version: compiler.version.to_string(),
      minimum: minimum.to_string(),
      required_std: MIN_CPPSTD,
    });
  }
  Ok(())
}

fn check_combinations(options: &OptionSet) -> Result<(), ConfigError> {
  if options.os == Os::Emscripten && matches!(options.threading, Threading::Tbb | Threading::Omp) {
    return Err(ConfigError::Unsatisfiable {
      fields: "os, threading".to_string(),
      reason: format!("threading={} has no Emscripten runtime", options.threading),
    });
  }
  Ok(())
}
