use std::sync::Arc;

use nestrecipe_lib::{HostFacts, PlanCache, package_id, resolve_plan, validate};

use super::common::{options, plan};

#[test]
fn header_only_plans_ignore_build_type_and_compiler_version() {
  for os in ["Linux", "Windows", "Macos"] {
    let a = plan(os, &["header_only=True"], &["build_type=Debug"]);
    let b = plan(os, &["header_only=True"], &["build_type=Release", "compiler.version=194"]);
    assert_eq!(a.dependencies, b.dependencies);
    assert_eq!(a.defines, b.defines);
    assert_eq!((&a.includedirs, &a.libdirs, &a.bindirs), (&b.includedirs, &b.libdirs, &b.bindirs));
    assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
  }
}

#[test]
fn header_only_package_ids_collapse() {
  let a = validate(options("Windows", &["header_only=True"], &["build_type=Debug"])).unwrap();
  let b = validate(options("Windows", &["header_only=True"], &["build_type=Release", "compiler.version=194"])).unwrap();
  assert_eq!(package_id(&a).unwrap(), package_id(&b).unwrap());
}

#[test]
fn compiled_plans_differ_by_build_type_on_windows_static() {
  let debug = plan("Windows", &["shared=False"], &["build_type=Debug"]);
  let release = plan("Windows", &["shared=False"], &["build_type=Release"]);
  assert_eq!(debug.library_name, "nest2dd");
  assert_eq!(release.library_name, "nest2d");
}

#[test]
fn concurrent_resolution_matches_sequential() {
  let matrix: Vec<_> = ["clipper", "boost", "eigen"]
    .into_iter()
    .flat_map(|g| {
      ["std", "tbb", "omp", "none"]
        .into_iter()
        .map(move |t| {
          let geometries = format!("geometries={}", g);
          let threading = format!("threading={}", t);
          options("Linux", &[geometries.as_str(), threading.as_str()], &[])
        })
    })
    .collect();

  let cache = PlanCache::new();
  let parallel = cache.resolve_matrix(&matrix, &HostFacts::default());
  let again = cache.resolve_matrix(&matrix, &HostFacts::default());

  for ((options, first), second) in matrix.iter().zip(&parallel).zip(&again) {
    let sequential = resolve_plan(options.clone(), &HostFacts::default()).unwrap();
    let first = first.as_ref().unwrap();
    assert_eq!(**first, sequential);
    assert!(Arc::ptr_eq(first, second.as_ref().unwrap()));
  }
}
