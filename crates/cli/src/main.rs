mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::RequestArgs;
use crate::output::OutputFormat;

/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "NESTRECIPE_LOG";

/// nestrecipe - variant-aware build configuration for libnest2d
#[derive(Parser)]
#[command(name = "nestrecipe")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Resolve one variant into a build plan
  Resolve {
    #[command(flatten)]
    request: RequestArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
  },

  /// Print the package identity hash of one variant
  PackageId {
    #[command(flatten)]
    request: RequestArgs,
  },

  /// Resolve a JSON array of requests in parallel
  Matrix {
    /// Path to a JSON file holding an array of request documents
    file: PathBuf,

    /// Resolve for an editable source checkout instead of the package cache
    #[arg(long)]
    editable: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
  },

  /// Prune unused backend headers from an installed tree and verify generated assets
  Prune {
    #[command(flatten)]
    request: RequestArgs,

    /// Root of the installed package tree
    #[arg(long)]
    root: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
  },

  /// Show version and detected host information
  Info,
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match cli.command {
    Commands::Resolve { request, format } => cmd::cmd_resolve(&request, format),
    Commands::PackageId { request } => cmd::cmd_package_id(&request),
    Commands::Matrix { file, editable, format } => cmd::cmd_matrix(&file, editable, format),
    Commands::Prune { request, root, format } => cmd::cmd_prune(&request, &root, format),
    Commands::Info => {
      cmd::cmd_info();
      Ok(())
    }
  }
}
