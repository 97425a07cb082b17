//! Implementation of the `nestrecipe matrix` command.
//!
//! Resolves every request in a JSON array through one plan cache. Failed
//! variants are reported alongside the successful ones; the command fails
//! if any variant did.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use nestrecipe_lib::{OptionSet, PlanCache, ResolvedBuildPlan};

use super::{host_facts, load_matrix, with_host_os};
use crate::output::{OutputFormat, print_error, print_json, print_success};

#[derive(Serialize)]
struct MatrixEntry<'a> {
  index: usize,
  #[serde(skip_serializing_if = "Option::is_none")]
  plan: Option<&'a ResolvedBuildPlan>,
  #[serde(skip_serializing_if = "Option::is_none")]
  error: Option<String>,
}

pub fn cmd_matrix(file: &Path, editable: bool, format: OutputFormat) -> Result<()> {
  let requests = load_matrix(file)?;

  let mut matrix: Vec<OptionSet> = Vec::with_capacity(requests.len());
  for (index, request) in requests.iter().enumerate() {
    let mut builder = request.to_builder().map_err(|e| anyhow::anyhow!("Request {}: {}", index, e))?;
    with_host_os(&mut builder);
    matrix.push(builder.build().map_err(|e| anyhow::anyhow!("Request {}: {}", index, e))?);
  }

  let cache = PlanCache::new();
  let results = cache.resolve_matrix(&matrix, &host_facts(editable));
  let failed = results.iter().filter(|r| r.is_err()).count();
  info!(variants = results.len(), failed, unique = cache.len(), "resolved matrix");

  if format.is_json() {
    let entries: Vec<MatrixEntry<'_>> = results
      .iter()
      .enumerate()
      .map(|(index, result)| MatrixEntry {
        index,
        plan: result.as_ref().ok().map(|plan| &**plan),
        error: result.as_ref().err().map(|e| e.to_string()),
      })
      .collect();
    print_json(&entries)?;
  } else {
    for ((index, options), result) in matrix.iter().enumerate().zip(&results) {
      let variant = format!(
        "[{}] {} geometries={} optimizer={} threading={}",
        index, options.os, options.geometries, options.optimizer, options.threading
      );
      match result {
        Ok(plan) => print_success(&format!("{} -> {} ({} deps)", variant, plan.file_name, plan.dependencies.len())),
        Err(e) => print_error(&format!("{}: {}", variant, e)),
      }
    }
  }

  if failed > 0 {
    anyhow::bail!("{} of {} variants failed to resolve", failed, results.len());
  }
  Ok(())
}
