//! Implementation of the `nestrecipe resolve` command.
//!
//! Resolves one variant and prints the plan a build executor would consume.

use anyhow::{Context, Result};

use nestrecipe_lib::ResolvedBuildPlan;
use nestrecipe_lib::consts::{PACKAGE_NAME, PACKAGE_VERSION};
use nestrecipe_lib::plan::plan_valid;
use nestrecipe_lib::util::hash::Hashable;
use nestrecipe_lib::{package_id, validate};

use super::RequestArgs;
use crate::output::{
  OutputFormat, print_entry, print_json, print_list, print_section, print_stat, print_success, symbols,
};

pub fn cmd_resolve(request: &RequestArgs, format: OutputFormat) -> Result<()> {
  let options = validate(request.option_set()?).context("Invalid configuration")?;
  let plan = plan_valid(&options, &request.host());

  if format.is_json() {
    return print_json(&plan);
  }

  let id = package_id(&options)?;
  let fingerprint = plan.compute_hash().context("Failed to compute plan fingerprint")?;

  print_success(&format!("Resolved {} {} for {}", PACKAGE_NAME, PACKAGE_VERSION, options.os));
  print_stat("Package id", &id.0);
  print_stat("Plan", &fingerprint.0);
  print_stat("Library", &plan.file_name);
  print_stat("Defines", &plan.defines.join(" "));
  print_list("System libs", &plan.system_libs);
  print_list("Include dirs", &plan.includedirs);
  print_list("Lib dirs", &plan.libdirs);
  print_list("Bin dirs", &plan.bindirs);

  print_requirements(&plan);

  if !plan.pruned_paths.is_empty() {
    print_section("Pruned");
    for path in &plan.pruned_paths {
      print_entry(symbols::MINUS, path.display());
    }
  }

  if let Some(assets) = &plan.asset_metadata {
    print_section("Assets");
    for file in assets.expected_files() {
      print_entry(symbols::PLUS, file);
    }
  }

  Ok(())
}

fn print_requirements(plan: &ResolvedBuildPlan) {
  print_section("Requires");
  for dependency in plan.dependencies.iter().chain(&plan.tool_requirements) {
    let options = dependency
      .propagated_options
      .iter()
      .map(|(key, value)| format!("{}={}", key, value))
      .collect::<Vec<_>>()
      .join(" ");
    print_entry(
      symbols::INFO,
      format!(
        "{} {} [{}] {}",
        dependency.name, dependency.version_constraint, dependency.kind, options
      )
      .trim_end(),
    );
  }
}
