//! Packaging plan.
//!
//! [`plan`] is the last pure stage: it combines the resolved dependencies,
//! the artifact naming and the layout into a [`ResolvedBuildPlan`], computing
//! which backend header subtrees to prune and, for WebAssembly targets, which
//! generated assets to expose.
//!
//! # Submodules
//!
//! - [`assets`] - collecting generated assets from a finished build
//! - [`prune`] - applying the prune set to an installed tree
//!
//! Both submodules touch the filesystem through traits so the executor can
//! substitute its own implementation; they are the only fallible steps after
//! validation and resolution.

pub mod assets;
pub mod prune;

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::consts::{
  BACKENDS_HEADER_DIR, JS_ASSET_DIR, JS_ASSET_DIR_CONFIG_KEY, JS_ASSET_STEM, JS_PACKAGE_NAME, OPTIMIZERS_HEADER_DIR,
  PACKAGE_VERSION,
};
use crate::deps::DependencyRequirement;
use crate::layout::Layout;
use crate::naming::ArtifactNaming;
use crate::options::{Geometries, Optimizer, Threading};
use crate::plan::ResolvedBuildPlan;
use crate::platform::Os;
use crate::validate::ValidOptions;

/// Errors from the packaging phase. Earlier results stay valid, so the
/// caller may retry packaging alone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackagingError {
  #[error("failed to prune {path}: {message}")]
  Prune {
    path: PathBuf,
    kind: io::ErrorKind,
    message: String,
  },

  #[error("failed to scan assets in {path}: {message}")]
  AssetScan { path: PathBuf, message: String },

  #[error("expected generated asset {path} was not produced")]
  MissingAsset { path: String },
}

/// Generated JavaScript/WASM assets and the package manifest fields exposing them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetMetadata {
  pub asset_dir: String,
  pub js_files: Vec<String>,
  pub wasm_files: Vec<String>,
  pub type_decl_files: Vec<String>,
  pub package_json_fields: BTreeMap<String, serde_json::Value>,
}

impl AssetMetadata {
  /// Every asset path the build is expected to produce.
  pub fn expected_files(&self) -> impl Iterator<Item = &String> {
    self.js_files.iter().chain(&self.wasm_files).chain(&self.type_decl_files)
  }
}

/// Header subtrees of every backend that was not selected.
pub fn pruned_paths(options: &ValidOptions) -> BTreeSet<PathBuf> {
  let geometries = Geometries::ALL
    .into_iter()
    .filter(|g| *g != options.geometries)
    .map(|g| format!("{}/{}", BACKENDS_HEADER_DIR, g));
  let optimizers = Optimizer::ALL
    .into_iter()
    .filter(|o| *o != options.optimizer)
    .map(|o| format!("{}/{}", OPTIMIZERS_HEADER_DIR, o));

  geometries.chain(optimizers).map(PathBuf::from).collect()
}

pub fn system_libs(options: &ValidOptions) -> BTreeSet<String> {
  let mut libs = BTreeSet::new();
  if options.threading == Threading::Std && options.os.links_pthread() {
    libs.insert("pthread".to_string());
  }
  libs
}

/// Generated binding assets for WebAssembly targets or explicit JS bindings.
///
/// Header-only packages compile nothing, so they never carry assets.
pub fn asset_metadata(options: &ValidOptions) -> Option<AssetMetadata> {
  if options.header_only || (options.os != Os::Emscripten && !options.with_js_bindings) {
    return None;
  }

  let asset = |extension: &str| format!("{}/{}.{}", JS_ASSET_DIR, JS_ASSET_STEM, extension);
  let js_files = vec![asset("js")];
  let wasm_files = vec![asset("wasm")];
  let type_decl_files = vec![asset("d.ts")];

  let files: Vec<&String> = js_files.iter().chain(&wasm_files).chain(&type_decl_files).collect();
  let mut config = serde_json::Map::new();
  config.insert(JS_ASSET_DIR_CONFIG_KEY.to_string(), json!(JS_ASSET_DIR));
  let package_json_fields = BTreeMap::from([
    ("name".to_string(), json!(JS_PACKAGE_NAME)),
    ("version".to_string(), json!(PACKAGE_VERSION)),
    ("main".to_string(), json!(js_files[0])),
    ("types".to_string(), json!(type_decl_files[0])),
    ("files".to_string(), json!(files)),
    ("config".to_string(), serde_json::Value::Object(config)),
  ]);

  Some(AssetMetadata {
    asset_dir: JS_ASSET_DIR.to_string(),
    js_files,
    wasm_files,
    type_decl_files,
    package_json_fields,
  })
}

/// Toolchain cache variables consumed by the external build executor.
pub fn cache_variables(options: &ValidOptions) -> BTreeMap<String, String> {
  let flag = |on: bool| if on { "ON" } else { "OFF" }.to_string();
  BTreeMap::from([
    ("HEADER_ONLY".to_string(), flag(options.header_only)),
    ("BUILD_SHARED_LIBS".to_string(), flag(options.effective_shared())),
    ("ENABLE_TESTING".to_string(), flag(options.tests)),
    ("GEOMETRIES".to_string(), options.geometries.to_string()),
    ("OPTIMIZER".to_string(), options.optimizer.to_string()),
    ("THREADING".to_string(), options.threading.to_string()),
    ("WITH_JS_BINDINGS".to_string(), flag(options.with_js_bindings)),
  ])
}

/// Assemble the final plan from the earlier stages' results.
pub fn plan(
  options: &ValidOptions,
  dependencies: Vec<DependencyRequirement>,
  tool_requirements: Vec<DependencyRequirement>,
  naming: ArtifactNaming,
  layout: Layout,
) -> ResolvedBuildPlan {
  ResolvedBuildPlan {
    dependencies,
    tool_requirements,
    defines: naming.defines,
    system_libs: system_libs(options),
    library_name: naming.library_name,
    extension: naming.extension,
    file_name: naming.file_name,
    includedirs: layout.includedirs,
    libdirs: layout.libdirs,
    bindirs: layout.bindirs,
    pruned_paths: pruned_paths(options),
    asset_metadata: asset_metadata(options),
    cache_variables: cache_variables(options),
  }
}
