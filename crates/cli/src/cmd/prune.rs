//! Implementation of the `nestrecipe prune` command.
//!
//! Removes the backend header subtrees a variant does not use from an
//! installed tree, then checks that the generated assets the plan predicts
//! are present.

use std::path::Path;

use anyhow::{Context, Result};

use nestrecipe_lib::package::assets::{FsAssetSource, collect_assets};
use nestrecipe_lib::package::prune::{FsPruner, apply_pruning};
use nestrecipe_lib::resolve_plan;

use super::RequestArgs;
use crate::output::{OutputFormat, print_entry, print_json, print_section, print_stat, print_success, symbols};

pub fn cmd_prune(request: &RequestArgs, root: &Path, format: OutputFormat) -> Result<()> {
  if !root.is_dir() {
    anyhow::bail!("Package root is not a directory: {}", root.display());
  }

  let plan = resolve_plan(request.option_set()?, &request.host())?;
  let report = apply_pruning(&plan, root, &FsPruner).context("Failed to prune package tree")?;
  let assets = collect_assets(&plan, root, &FsAssetSource).context("Failed to verify generated assets")?;

  if format.is_json() {
    return print_json(&serde_json::json!({ "pruned": report, "assets": assets }));
  }

  print_success(&format!("Pruned {}", root.display()));
  print_stat("Removed", &report.removed.len().to_string());
  print_stat("Already absent", &report.already_absent.len().to_string());
  for path in &report.removed {
    print_entry(symbols::REMOVE, path.display());
  }

  if !assets.files.is_empty() {
    print_section("Assets");
    for (file, digest) in &assets.files {
      print_entry(symbols::SUCCESS, format!("{} {}", file, digest));
    }
  }

  Ok(())
}
