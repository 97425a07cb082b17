mod info;
mod matrix;
mod package_id;
mod prune;
mod resolve;

pub use info::cmd_info;
pub use matrix::cmd_matrix;
pub use package_id::cmd_package_id;
pub use prune::cmd_prune;
pub use resolve::cmd_resolve;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use nestrecipe_lib::{HostFacts, OptionSet, OptionSetBuilder, Os, RecipeRequest};

/// Where the caller's option and setting overrides come from.
#[derive(Args, Debug, Clone, Default)]
pub struct RequestArgs {
  /// JSON request document with `options`, `settings` and `dependency_options`
  #[arg(long, value_name = "FILE")]
  pub request: Option<PathBuf>,

  /// Recipe option override (`key=value` or `dependency:key=value`)
  #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
  pub options: Vec<String>,

  /// Host setting override (`key=value`)
  #[arg(short = 's', long = "setting", value_name = "KEY=VALUE")]
  pub settings: Vec<String>,

  /// Resolve for an editable source checkout instead of the package cache
  #[arg(long)]
  pub editable: bool,
}

impl RequestArgs {
  /// Request document first, then flags, then the detected host OS if no `os` was given.
  pub fn option_set(&self) -> Result<OptionSet> {
    let mut builder = match &self.request {
      Some(path) => load_request(path)?.to_builder()?,
      None => OptionSet::builder(),
    };
    for token in &self.settings {
      builder
        .setting_token(token)
        .with_context(|| format!("Invalid setting: {}", token))?;
    }
    for token in &self.options {
      builder
        .option_token(token)
        .with_context(|| format!("Invalid option: {}", token))?;
    }
    with_host_os(&mut builder);
    let options = builder.build()?;
    debug!(
      os = %options.os,
      compiler = %options.compiler,
      geometries = %options.geometries,
      optimizer = %options.optimizer,
      threading = %options.threading,
      header_only = options.header_only,
      "assembled request"
    );
    Ok(options)
  }

  pub fn host(&self) -> HostFacts {
    host_facts(self.editable)
  }
}

pub fn host_facts(editable: bool) -> HostFacts {
  if editable { HostFacts::editable() } else { HostFacts::default() }
}

pub fn with_host_os(builder: &mut OptionSetBuilder) {
  if let Some(os) = Os::current() {
    builder.default_os(os);
  }
}

fn load_request(path: &Path) -> Result<RecipeRequest> {
  let content = fs::read_to_string(path).with_context(|| format!("Failed to read request: {}", path.display()))?;
  serde_json::from_str(&content).with_context(|| format!("Failed to parse request: {}", path.display()))
}

/// Read a JSON array of request documents.
pub fn load_matrix(path: &Path) -> Result<Vec<RecipeRequest>> {
  let content = fs::read_to_string(path).with_context(|| format!("Failed to read matrix: {}", path.display()))?;
  serde_json::from_str(&content).with_context(|| format!("Failed to parse matrix: {}", path.display()))
}
