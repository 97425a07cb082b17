//! Build options and settings.
//!
//! An [`OptionSet`] is the configuration snapshot that drives a single
//! resolution. It is assembled by an [`OptionSetBuilder`] from the recipe
//! defaults overridden by caller values, then handed to
//! [`validate`](crate::validate::validate) which freezes it.
//!
//! # Submodules
//!
//! - [`compiler`] - compiler identity, version and C++ standard parsing
//! - [`request`] - serde form of a caller request

pub mod compiler;
mod error;
pub mod request;
mod types;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use compiler::{Compiler, CppStd};
pub use error::ConfigError;
pub use types::*;

use crate::platform::Os;

/// Per-dependency sub-options supplied by the caller, keyed by dependency name.
pub type DependencyOptions = BTreeMap<String, BTreeMap<String, OptionValue>>;

/// Toolchain generator fields that are free-form except on MSVC-class compilers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeneratorBlock {
  pub generator_platform: Option<String>,
  pub toolset: Option<String>,
}

impl GeneratorBlock {
  pub fn is_unset(&self) -> bool {
    self.generator_platform.is_none() && self.toolset.is_none()
  }
}

/// The configuration snapshot driving one resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptionSet {
  pub geometries: Geometries,
  pub optimizer: Optimizer,
  pub threading: Threading,
  pub shared: bool,
  pub fpic: Fpic,
  pub header_only: bool,
  pub with_js_bindings: bool,
  pub tests: bool,
  pub python_version: String,
  pub os: Os,
  pub compiler: Compiler,
  pub build_type: BuildType,
  pub generator: GeneratorBlock,
  pub dependency_options: DependencyOptions,
}

impl OptionSet {
  pub fn builder() -> OptionSetBuilder {
    OptionSetBuilder::default()
  }

  /// Whether a static library is built with position-independent code is
  /// only a question for static, non-MSVC, non-Windows builds.
  pub fn fpic_applicable(&self) -> bool {
    !self.shared && !self.compiler.is_msvc_class() && self.os != Os::Windows
  }

  /// The linkage the compiled library actually gets; header-only packages
  /// never build a shared library.
  pub fn effective_shared(&self) -> bool {
    self.shared && !self.header_only
  }
}

/// Collects caller overrides on top of the recipe defaults.
///
/// Option keys follow the recipe (`geometries`, `fPIC`, ...); setting keys
/// follow the host profile (`os`, `compiler.version`, ...).
#[derive(Debug, Clone)]
pub struct OptionSetBuilder {
  geometries: Geometries,
  optimizer: Optimizer,
  threading: Threading,
  shared: bool,
  fpic: bool,
  header_only: bool,
  with_js_bindings: bool,
  tests: bool,
  python_version: String,
  os: Option<Os>,
  build_type: BuildType,
  compiler_family: Option<String>,
  compiler_version: Option<String>,
  cppstd: Option<String>,
  generator: GeneratorBlock,
  dependency_options: DependencyOptions,
}

impl Default for OptionSetBuilder {
  fn default() -> Self {
    Self {
      geometries: Geometries::Clipper,
      optimizer: Optimizer::Nlopt,
      threading: Threading::Std,
      shared: true,
      fpic: true,
      header_only: false,
      with_js_bindings: false,
      tests: false,
      python_version: "3.9".to_string(),
      os: None,
      build_type: BuildType::default(),
      compiler_family: None,
      compiler_version: None,
      cppstd: None,
      generator: GeneratorBlock::default(),
      dependency_options: BTreeMap::new(),
    }
  }
}

impl OptionSetBuilder {
  /// Override a recipe option.
  pub fn option(&mut self, key: &str, value: impl Into<OptionValue>) -> Result<&mut Self, ConfigError> {
    let value = value.into();
    match key {
      "geometries" => self.geometries = value.as_text().parse()?,
      "optimizer" => self.optimizer = value.as_text().parse()?,
      "threading" => self.threading = value.as_text().parse()?,
      "shared" => self.shared = value.as_bool("shared")?,
      "fPIC" | "fpic" => self.fpic = value.as_bool("fPIC")?,
      "header_only" => self.header_only = value.as_bool("header_only")?,
      "with_js_bindings" => self.with_js_bindings = value.as_bool("with_js_bindings")?,
      "tests" => self.tests = value.as_bool("tests")?,
      "python_version" => self.python_version = value.as_text(),
      _ => return Err(ConfigError::UnknownOption(key.to_string())),
    }
    Ok(self)
  }

  /// Override a host setting.
  pub fn setting(&mut self, key: &str, value: &str) -> Result<&mut Self, ConfigError> {
    match key {
      "os" => self.os = Some(value.parse()?),
      "build_type" => self.build_type = value.parse()?,
      "compiler" => self.compiler_family = Some(value.to_string()),
      "compiler.version" => self.compiler_version = Some(value.to_string()),
      "compiler.cppstd" => self.cppstd = Some(value.to_string()),
      "compiler.generator_platform" => self.generator.generator_platform = Some(value.to_string()),
      "compiler.toolset" => self.generator.toolset = Some(value.to_string()),
      _ => return Err(ConfigError::UnknownOption(key.to_string())),
    }
    Ok(self)
  }

  /// Seed a sub-option on a dependency; rule-forced values still win.
  pub fn dependency_option(&mut self, dependency: &str, key: &str, value: impl Into<OptionValue>) -> &mut Self {
    self
      .dependency_options
      .entry(dependency.to_string())
      .or_default()
      .insert(key.to_string(), value.into());
    self
  }

  /// Apply a `key=value` or `dependency:key=value` option token.
  pub fn option_token(&mut self, token: &str) -> Result<&mut Self, ConfigError> {
    let (key, value) = split_token(token)?;
    match key.split_once(':') {
      Some((dependency, sub_key)) => Ok(self.dependency_option(dependency, sub_key, OptionValue::parse_token(value))),
      None => self.option(key, OptionValue::parse_token(value)),
    }
  }

  /// Apply a `key=value` setting token.
  pub fn setting_token(&mut self, token: &str) -> Result<&mut Self, ConfigError> {
    let (key, value) = split_token(token)?;
    self.setting(key, value)
  }

  /// Set the target OS only if no explicit `os` setting was given.
  pub fn default_os(&mut self, os: Os) -> &mut Self {
    self.os.get_or_insert(os);
    self
  }

  pub fn build(&self) -> Result<OptionSet, ConfigError> {
    let os = self.os.ok_or(ConfigError::MissingSetting("os"))?;
    let family = self
      .compiler_family
      .as_deref()
      .ok_or(ConfigError::MissingSetting("compiler"))?;
    let version = self
      .compiler_version
      .as_deref()
      .ok_or(ConfigError::MissingSetting("compiler.version"))?;

    let mut compiler = Compiler::new(family, version)?;
    if let Some(cppstd) = &self.cppstd {
      compiler = compiler.with_cppstd(cppstd.parse()?);
    }

    let mut options = OptionSet {
      geometries: self.geometries,
      optimizer: self.optimizer,
      threading: self.threading,
      shared: self.shared,
      fpic: Fpic::from_request(self.fpic),
      header_only: self.header_only,
      with_js_bindings: self.with_js_bindings,
      tests: self.tests,
      python_version: self.python_version.clone(),
      os,
      compiler,
      build_type: self.build_type,
      generator: self.generator.clone(),
      dependency_options: self.dependency_options.clone(),
    };
    if !options.fpic_applicable() {
      options.fpic = Fpic::NotApplicable;
    }
    Ok(options)
  }
}

fn split_token(token: &str) -> Result<(&str, &str), ConfigError> {
  token
    .split_once('=')
    .map(|(k, v)| (k.trim(), v.trim()))
    .filter(|(k, _)| !k.is_empty())
    .ok_or_else(|| ConfigError::UnknownOption(token.to_string()))
}
