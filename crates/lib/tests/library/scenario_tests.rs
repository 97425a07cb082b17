use std::path::PathBuf;

use nestrecipe_lib::deps::RequirementKind;
use nestrecipe_lib::options::OptionValue;

use super::common::{dependency_names, plan};

#[test]
fn eigen_optimlib_omp_on_macos() {
  let plan = plan(
    "Macos",
    &[
      "geometries=eigen",
      "optimizer=optimlib",
      "threading=omp",
      "shared=False",
      "header_only=False",
    ],
    &[],
  );

  let names = dependency_names(&plan);
  assert_eq!(names, vec!["eigen", "armadillo", "llvm-openmp", "spdlog"]);
  for absent in ["clipper", "boost", "nlopt"] {
    assert!(!names.contains(&absent), "{} should not be required", absent);
  }

  assert!(plan.system_libs.is_empty());
  assert_eq!(plan.defines, vec!["GEOMETRIES_eigen", "OPTIMIZERS_optimlib", "THREADING_omp"]);

  assert!(plan.pruned_paths.contains(&PathBuf::from("include/libnest2d/backends/clipper")));
  assert!(plan.pruned_paths.contains(&PathBuf::from("include/libnest2d/optimizers/nlopt")));
  assert!(!plan.pruned_paths.contains(&PathBuf::from("include/libnest2d/optimizers/optimlib")));
  assert!(!plan.pruned_paths.contains(&PathBuf::from("include/libnest2d/backends/eigen")));

  assert_eq!(plan.extension, "a");
  assert!(plan.asset_metadata.is_none());
}

#[test]
fn clipper_nlopt_std_shared_on_linux() {
  let plan = plan(
    "Linux",
    &[
      "geometries=clipper",
      "optimizer=nlopt",
      "threading=std",
      "shared=True",
      "header_only=False",
    ],
    &[],
  );

  assert_eq!(dependency_names(&plan), vec!["clipper", "boost", "nlopt", "spdlog"]);
  let boost = plan.dependencies.iter().find(|d| d.name == "boost").unwrap();
  assert_eq!(boost.propagated_options["header_only"], OptionValue::Bool(true));
  assert_eq!(boost.version_constraint.to_string(), "=1.70.0");
  assert!(plan.dependencies.iter().all(|d| d.kind == RequirementKind::Library));

  assert_eq!(plan.system_libs.iter().collect::<Vec<_>>(), vec!["pthread"]);
  assert!(!plan.libdirs.is_empty());
  assert!(!plan.bindirs.is_empty());
  assert_eq!(plan.extension, "so");
  assert_eq!(plan.file_name, "libnest2d.so");
  assert_eq!(plan.cache_variables["BUILD_SHARED_LIBS"], "ON");
}

#[test]
fn header_only_windows_debug_and_release_collapse() {
  let debug = plan("Windows", &["header_only=True"], &["build_type=Debug"]);
  let release = plan("Windows", &["header_only=True"], &["build_type=Release"]);

  for plan in [&debug, &release] {
    assert!(plan.libdirs.is_empty());
    assert!(plan.bindirs.is_empty());
    for dependency in &plan.dependencies {
      assert_eq!(dependency.propagated_options["shared"], OptionValue::Bool(true));
    }
  }
  assert_eq!(debug, release);
}

#[test]
fn emscripten_build_exposes_wasm_assets() {
  let plan = plan("Emscripten", &["shared=False"], &[]);

  assert_eq!(plan.bindirs, vec!["bin", "libnest2d_js"]);
  assert!(plan.system_libs.is_empty());

  let metadata = plan.asset_metadata.expect("emscripten plans carry asset metadata");
  assert_eq!(metadata.asset_dir, "libnest2d_js");
  assert_eq!(
    metadata.package_json_fields["config"]["libnest2d_js_dir"],
    serde_json::json!("libnest2d_js")
  );
}

#[test]
fn testing_requests_test_framework() {
  let plan = plan("Linux", &["tests=True"], &[]);
  let tools: Vec<&str> = plan.tool_requirements.iter().map(|t| t.name.as_str()).collect();
  assert_eq!(tools, vec!["cmake", "catch2"]);
  assert_eq!(plan.cache_variables["ENABLE_TESTING"], "ON");
}
