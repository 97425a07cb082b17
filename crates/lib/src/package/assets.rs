//! Collecting the generated JavaScript/WASM assets after a build.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::PackagingError;
use crate::plan::ResolvedBuildPlan;
use crate::util::hash::{ContentHash, hash_file};

/// Suffixes of files the bindings build generates.
const ASSET_SUFFIXES: [&str; 3] = [".js", ".wasm", ".d.ts"];

/// Lists generated files below a directory, paths relative to the package root.
pub trait AssetSource {
  fn scan(&self, root: &Path, asset_dir: &str) -> Result<BTreeMap<String, ContentHash>, PackagingError>;
}

/// Walks the asset directory on disk and hashes every generated file.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsAssetSource;

impl AssetSource for FsAssetSource {
  fn scan(&self, root: &Path, asset_dir: &str) -> Result<BTreeMap<String, ContentHash>, PackagingError> {
    let dir = root.join(asset_dir);
    let scan_error = |path: PathBuf, message: String| PackagingError::AssetScan { path, message };

    let mut found = BTreeMap::new();
    for entry in WalkDir::new(&dir).sort_by_file_name() {
      let entry = entry.map_err(|e| scan_error(dir.clone(), e.to_string()))?;
      if !entry.file_type().is_file() {
        continue;
      }

      let relative = entry
        .path()
        .strip_prefix(root)
        .unwrap_or(entry.path())
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
      if !ASSET_SUFFIXES.iter().any(|suffix| relative.ends_with(suffix)) {
        continue;
      }

      let digest = hash_file(entry.path()).map_err(|e| scan_error(entry.path().to_path_buf(), e.to_string()))?;
      debug!(asset = %relative, sha256 = %digest, "found generated asset");
      found.insert(relative, digest);
    }
    Ok(found)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedAssets {
  /// Generated files keyed by package-relative path.
  pub files: BTreeMap<String, ContentHash>,
}

/// Collect the assets the plan expects, failing if any is missing.
///
/// Plans without asset metadata collect nothing.
pub fn collect_assets(
  plan: &ResolvedBuildPlan,
  root: &Path,
  source: &dyn AssetSource,
) -> Result<CollectedAssets, PackagingError> {
  let Some(metadata) = &plan.asset_metadata else {
    return Ok(CollectedAssets::default());
  };

  let files = source.scan(root, &metadata.asset_dir)?;
  for expected in metadata.expected_files() {
    if !files.contains_key(expected) {
      return Err(PackagingError::MissingAsset { path: expected.clone() });
    }
  }

  let extra = files.len().saturating_sub(metadata.expected_files().count());
  if extra > 0 {
    warn!(extra, "asset directory holds files beyond the expected bindings");
  }
  Ok(CollectedAssets { files })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::package::asset_metadata;
  use crate::options::OptionSet;
  use crate::validate::validate;
  use std::fs;
  use tempfile::tempdir;

  fn emscripten_plan() -> ResolvedBuildPlan {
    emscripten_plan_with(&[])
  }

  fn emscripten_plan_with(tokens: &[&str]) -> ResolvedBuildPlan {
    let mut builder = OptionSet::builder();
    builder
      .setting("os", "Emscripten")
      .and_then(|b| b.setting("compiler", "clang"))
      .and_then(|b| b.setting("compiler.version", "15"))
      .unwrap();
    for token in tokens {
      builder.option_token(token).unwrap();
    }
    let options = validate(builder.build().unwrap()).unwrap();
    ResolvedBuildPlan {
      asset_metadata: asset_metadata(&options),
      ..ResolvedBuildPlan::default()
    }
  }

  fn write_assets(root: &Path, names: &[&str]) {
    let dir = root.join("libnest2d_js");
    fs::create_dir_all(&dir).unwrap();
    for name in names {
      fs::write(dir.join(name), format!("// {}", name)).unwrap();
    }
  }

  #[test]
  fn collects_all_generated_files() {
    let temp = tempdir().unwrap();
    write_assets(
      temp.path(),
      &["libnest2d_js.js", "libnest2d_js.wasm", "libnest2d_js.d.ts", "README.md"],
    );

    let collected = collect_assets(&emscripten_plan(), temp.path(), &FsAssetSource).unwrap();
    let names: Vec<&str> = collected.files.keys().map(|k| k.as_str()).collect();
    assert_eq!(
      names,
      vec![
        "libnest2d_js/libnest2d_js.d.ts",
        "libnest2d_js/libnest2d_js.js",
        "libnest2d_js/libnest2d_js.wasm",
      ]
    );
    assert!(collected.files.values().all(|h| h.0.len() == 64));
  }

  #[test]
  fn missing_asset_fails() {
    let temp = tempdir().unwrap();
    write_assets(temp.path(), &["libnest2d_js.js", "libnest2d_js.wasm"]);

    let err = collect_assets(&emscripten_plan(), temp.path(), &FsAssetSource).unwrap_err();
    assert_eq!(
      err,
      PackagingError::MissingAsset {
        path: "libnest2d_js/libnest2d_js.d.ts".to_string()
      }
    );
  }

  #[test]
  fn missing_directory_is_a_scan_error() {
    let temp = tempdir().unwrap();
    let err = collect_assets(&emscripten_plan(), temp.path(), &FsAssetSource).unwrap_err();
    assert!(matches!(err, PackagingError::AssetScan { .. }));
  }

  #[test]
  fn native_plans_collect_nothing() {
    let temp = tempdir().unwrap();
    let collected = collect_assets(&ResolvedBuildPlan::default(), temp.path(), &FsAssetSource).unwrap();
    assert!(collected.files.is_empty());
  }

  #[test]
  fn header_only_wasm_plans_collect_nothing() {
    let temp = tempdir().unwrap();
    let plan = emscripten_plan_with(&["header_only=True"]);
    assert!(plan.asset_metadata.is_none());
    let collected = collect_assets(&plan, temp.path(), &FsAssetSource).unwrap();
    assert!(collected.files.is_empty());
  }
}
