//! The resolution pipeline.
//!
//! ```text
//! OptionSet -> validate -> resolve -> { name_artifact, plan_layout } -> package::plan -> ResolvedBuildPlan
//! ```
//!
//! Each stage is a pure function of its inputs. Validation is the only
//! failure exit; packaging failures happen later, in
//! [`package::prune`](crate::package::prune) and
//! [`package::assets`](crate::package::assets).

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::deps::{self, DependencyRequirement};
use crate::layout::plan_layout;
use crate::naming::name_artifact;
use crate::options::{
  BuildType, Compiler, ConfigError, Fpic, Geometries, OptionSet, OptionValue, Optimizer, Threading,
};
use crate::package::{self, AssetMetadata};
use crate::platform::{HostFacts, Os};
use crate::util::hash::{Hashable, ObjectHash};
use crate::validate::{ValidOptions, validate};

/// Failure of the pure resolution stages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
  #[error("configuration error: {0}")]
  Config(#[from] ConfigError),

  #[error("failed to compute package identity: {0}")]
  Identity(String),
}

/// Everything downstream tooling needs to build, package and consume one variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedBuildPlan {
  pub dependencies: Vec<DependencyRequirement>,
  pub tool_requirements: Vec<DependencyRequirement>,
  pub defines: Vec<String>,
  pub system_libs: BTreeSet<String>,
  pub library_name: String,
  pub extension: String,
  pub file_name: String,
  pub includedirs: Vec<String>,
  pub libdirs: Vec<String>,
  pub bindirs: Vec<String>,
  pub pruned_paths: BTreeSet<PathBuf>,
  pub asset_metadata: Option<AssetMetadata>,
  pub cache_variables: BTreeMap<String, String>,
}

impl Hashable for ResolvedBuildPlan {}

/// Run the full pipeline for one option set.
pub fn resolve_plan(options: OptionSet, host: &HostFacts) -> Result<ResolvedBuildPlan, PlanError> {
  let options = validate(options)?;
  Ok(plan_valid(&options, host))
}

/// Run the pipeline stages after validation. None of them can fail.
pub fn plan_valid(options: &ValidOptions, host: &HostFacts) -> ResolvedBuildPlan {
  let dependencies = deps::resolve(options);
  let tools = deps::tool_requirements(options);
  let naming = name_artifact(options);
  let layout = plan_layout(options, host);
  let plan = package::plan(options, dependencies, tools, naming, layout);

  info!(
    geometries = %options.geometries,
    optimizer = %options.optimizer,
    threading = %options.threading,
    os = %options.os,
    dependencies = plan.dependencies.len(),
    pruned = plan.pruned_paths.len(),
    "resolved build plan"
  );
  plan
}

/// The identity-relevant view of an option set.
///
/// Header-only packages carry no compiled code, so the build settings and
/// linkage options are erased from their identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageIdentity {
  pub geometries: Geometries,
  pub optimizer: Optimizer,
  pub threading: Threading,
  pub header_only: bool,
  pub with_js_bindings: bool,
  pub tests: bool,
  pub python_version: String,
  pub os: Os,
  pub shared: Option<bool>,
  pub fpic: Option<Fpic>,
  pub build_type: Option<BuildType>,
  pub compiler: Option<Compiler>,
  pub dependency_options: BTreeMap<String, BTreeMap<String, OptionValue>>,
}

impl Hashable for PackageIdentity {}

impl PackageIdentity {
  pub fn of(options: &ValidOptions) -> Self {
    let compiled = !options.header_only;
    Self {
      geometries: options.geometries,
      optimizer: options.optimizer,
      threading: options.threading,
      header_only: options.header_only,
      with_js_bindings: options.with_js_bindings,
      tests: options.tests,
      python_version: options.python_version.clone(),
      os: options.os,
      shared: compiled.then_some(options.shared),
      fpic: compiled.then_some(options.fpic),
      build_type: compiled.then_some(options.build_type),
      compiler: compiled.then(|| options.compiler.clone()),
      dependency_options: options.dependency_options.clone(),
    }
  }
}

pub fn package_id(options: &ValidOptions) -> Result<ObjectHash, PlanError> {
  PackageIdentity::of(options)
    .compute_hash()
    .map_err(|e| PlanError::Identity(e.to_string()))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn options(tokens: &[&str], settings: &[&str]) -> OptionSet {
    let mut builder = OptionSet::builder();
    builder
      .setting("os", "Linux")
      .and_then(|b| b.setting("compiler", "gcc"))
      .and_then(|b| b.setting("compiler.version", "11"))
      .unwrap();
    for token in settings {
      builder.setting_token(token).unwrap();
    }
    for token in tokens {
      builder.option_token(token).unwrap();
    }
    builder.build().unwrap()
  }

  #[test]
  fn pipeline_surfaces_config_errors() {
    let err = resolve_plan(options(&[], &["compiler.version=7"]), &HostFacts::default()).unwrap_err();
    assert!(matches!(err, PlanError::Config(ConfigError::CompilerTooOld { .. })));
  }

  #[test]
  fn matrix_wide_dependency_options_do_not_fail_other_variants() {
    let plan = resolve_plan(
      options(&["geometries=eigen", "boost:header_only=False", "onetbb:shared=False"], &[]),
      &HostFacts::default(),
    )
    .unwrap();
    let names: Vec<&str> = plan.dependencies.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["eigen", "nlopt", "spdlog"]);
  }

  #[test]
  fn plan_fingerprint_is_stable() {
    let first = resolve_plan(options(&[], &[]), &HostFacts::default()).unwrap();
    let second = resolve_plan(options(&[], &[]), &HostFacts::default()).unwrap();
    assert_eq!(first.compute_hash().unwrap(), second.compute_hash().unwrap());
  }

  mod identity {
    use super::*;

    fn id(tokens: &[&str], settings: &[&str]) -> ObjectHash {
      package_id(&validate(options(tokens, settings)).unwrap()).unwrap()
    }

    #[test]
    fn header_only_erases_build_settings() {
      let debug = id(&["header_only=True"], &["build_type=Debug", "compiler.version=10"]);
      let release = id(&["header_only=True", "shared=False"], &["build_type=Release", "compiler=clang", "compiler.version=14"]);
      assert_eq!(debug, release);
    }

    #[test]
    fn compiled_packages_keep_build_settings() {
      assert_ne!(id(&[], &["build_type=Debug"]), id(&[], &["build_type=Release"]));
      assert_ne!(id(&[], &["compiler.version=10"]), id(&[], &["compiler.version=11"]));
    }

    #[test]
    fn variant_options_always_count() {
      assert_ne!(
        id(&["header_only=True"], &[]),
        id(&["header_only=True", "geometries=eigen"], &[])
      );
    }
  }
}
