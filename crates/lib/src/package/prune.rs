//! Applying the prune set to an installed package tree.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::PackagingError;
use crate::plan::ResolvedBuildPlan;

/// Removes a path from an installed tree.
pub trait Pruner {
  fn remove_tree(&self, path: &Path) -> io::Result<()>;
}

/// Removes directories recursively and plain files directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsPruner;

impl Pruner for FsPruner {
  fn remove_tree(&self, path: &Path) -> io::Result<()> {
    if path.is_dir() {
      fs::remove_dir_all(path)
    } else {
      fs::remove_file(path)
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruneReport {
  pub removed: Vec<PathBuf>,
  pub already_absent: Vec<PathBuf>,
}

/// Prune every path in the plan below `root`.
///
/// Paths that are already gone count as satisfied; any other failure stops
/// the pass with [`PackagingError::Prune`].
pub fn apply_pruning(
  plan: &ResolvedBuildPlan,
  root: &Path,
  pruner: &dyn Pruner,
) -> Result<PruneReport, PackagingError> {
  let mut report = PruneReport::default();

  for relative in &plan.pruned_paths {
    let path = root.join(relative);
    match pruner.remove_tree(&path) {
      Ok(()) => {
        debug!(path = ?path, "pruned");
        report.removed.push(relative.clone());
      }
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        debug!(path = ?path, "already absent");
        report.already_absent.push(relative.clone());
      }
      Err(e) => {
        return Err(PackagingError::Prune {
          path,
          kind: e.kind(),
          message: e.to_string(),
        });
      }
    }
  }

  info!(
    removed = report.removed.len(),
    absent = report.already_absent.len(),
    "pruning complete"
  );
  Ok(report)
}
