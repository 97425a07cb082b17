//! Compute-once plan cache.
//!
//! Entries are keyed by the full `(OptionSet, HostFacts)` value. Each key
//! owns a [`OnceLock`] cell, so concurrent callers asking for the same key
//! wait for a single computation instead of racing to overwrite each other.
//! The map lock is held only while fetching or inserting a cell, never while
//! a plan is being computed.
//!
//! Entries are never evicted. A cache is meant to live for one matrix run or
//! one session; drop it to release the plans.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use rayon::prelude::*;
use tracing::debug;

use crate::options::OptionSet;
use crate::plan::{PlanError, ResolvedBuildPlan, resolve_plan};
use crate::platform::HostFacts;

type CacheKey = (OptionSet, HostFacts);
type CachedPlan = Result<Arc<ResolvedBuildPlan>, PlanError>;

#[derive(Debug, Default)]
pub struct PlanCache {
  entries: Mutex<HashMap<CacheKey, Arc<OnceLock<CachedPlan>>>>,
}

impl PlanCache {
  pub fn new() -> Self {
    Self::default()
  }

  /// Resolve through the cache. Failures are cached too: resolution is pure,
  /// so retrying the same key cannot succeed.
  pub fn resolve(&self, options: &OptionSet, host: &HostFacts) -> CachedPlan {
    let key = (options.clone(), *host);
    let cell = {
      let mut entries = self.entries.lock();
      Arc::clone(entries.entry(key).or_default())
    };

    cell
      .get_or_init(|| {
        debug!(os = %options.os, "plan cache miss");
        resolve_plan(options.clone(), host).map(Arc::new)
      })
      .clone()
  }

  /// Resolve a whole build matrix in parallel, preserving input order.
  pub fn resolve_matrix(&self, matrix: &[OptionSet], host: &HostFacts) -> Vec<CachedPlan> {
    matrix.par_iter().map(|options| self.resolve(options, host)).collect()
  }

  pub fn len(&self) -> usize {
    self.entries.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}
