//! Serializable resolution request.
//!
//! A request is the document form of an [`OptionSetBuilder`] session:
//!
//! ```json
//! {
//!   "options": { "geometries": "eigen", "shared": false },
//!   "settings": { "os": "Macos", "compiler": "apple-clang", "compiler.version": "13" },
//!   "dependency_options": { "boost": { "header_only": false } }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{ConfigError, DependencyOptions, OptionSet, OptionSetBuilder, OptionValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeRequest {
  #[serde(default)]
  pub options: BTreeMap<String, OptionValue>,
  #[serde(default)]
  pub settings: BTreeMap<String, String>,
  #[serde(default)]
  pub dependency_options: DependencyOptions,
}

impl RecipeRequest {
  /// Start a builder pre-loaded with this request's overrides.
  pub fn to_builder(&self) -> Result<OptionSetBuilder, ConfigError> {
    let mut builder = OptionSet::builder();
    for (key, value) in &self.options {
      builder.option(key, value.clone())?;
    }
    for (key, value) in &self.settings {
      builder.setting(key, value)?;
    }
    for (dependency, options) in &self.dependency_options {
      for (key, value) in options {
        builder.dependency_option(dependency, key, value.clone());
      }
    }
    Ok(builder)
  }

  pub fn to_option_set(&self) -> Result<OptionSet, ConfigError> {
    self.to_builder()?.build()
  }
}
