//! CLI output formatting utilities.
//!
//! Plans are printed as a success line followed by dimmed `label: value`
//! stats and titled sections of symbol-prefixed entries.

use std::fmt::Display;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const INFO: &str = "•";
  pub const PLUS: &str = "+";
  pub const MINUS: &str = "-";
  pub const REMOVE: &str = "-";
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_stat(label: &str, value: &str) {
  println!(
    "  {}: {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

/// Join display values with `, `, or `-` when there are none.
pub fn join_or_dash<T: Display>(items: impl IntoIterator<Item = T>) -> String {
  let joined = items.into_iter().map(|item| item.to_string()).collect::<Vec<_>>().join(", ");
  if joined.is_empty() { "-".to_string() } else { joined }
}

pub fn print_list<T: Display>(label: &str, items: impl IntoIterator<Item = T>) {
  print_stat(label, &join_or_dash(items));
}

pub fn print_section(title: &str) {
  println!();
  println!("{}:", title.if_supports_color(Stream::Stdout, |s| s.bold()));
}

/// One section entry, e.g. `  - include/libnest2d/backends/boost`.
pub fn print_entry(symbol: &str, entry: impl Display) {
  println!("  {} {}", symbol, entry);
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}
