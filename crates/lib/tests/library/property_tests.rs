use nestrecipe_lib::options::OptionValue;
use nestrecipe_lib::{HostFacts, resolve_plan};

use super::common::{as_strs, options, plan, variant_tokens};

#[test]
fn header_only_never_exposes_lib_or_bin_dirs() {
  for os in ["Linux", "Macos", "FreeBSD", "Windows", "Emscripten", "Android"] {
    for variant in variant_tokens() {
      if os == "Emscripten" && (variant[2].ends_with("tbb") || variant[2].ends_with("omp")) {
        continue;
      }
      let mut tokens = as_strs(&variant);
      tokens.push("header_only=True");
      for host in [HostFacts::default(), HostFacts::editable()] {
        let plan = resolve_plan(options(os, &tokens, &[]), &host).unwrap();
        assert!(plan.libdirs.is_empty(), "{} {:?}", os, tokens);
        assert!(plan.bindirs.is_empty(), "{} {:?}", os, tokens);
        assert_eq!(plan.includedirs, vec!["include"]);
        assert_eq!(plan.cache_variables["BUILD_SHARED_LIBS"], "OFF");
      }
    }
  }
}

#[test]
fn boost_is_header_only_whenever_geometry_needs_it() {
  for variant in variant_tokens() {
    if variant[0].ends_with("eigen") {
      continue;
    }
    let mut tokens = as_strs(&variant);
    tokens.push("boost:header_only=False");
    let plan = plan("Linux", &tokens, &[]);
    let boost = plan.dependencies.iter().find(|d| d.name == "boost").unwrap();
    assert_eq!(boost.propagated_options["header_only"], OptionValue::Bool(true), "{:?}", tokens);
  }
}

#[test]
fn pthread_follows_std_threading_on_posix() {
  for os in ["Linux", "FreeBSD", "Macos", "Windows", "Android"] {
    for variant in variant_tokens() {
      let plan = plan(os, &as_strs(&variant), &[]);
      let expect = variant[2] == "threading=std" && ["Linux", "FreeBSD", "Macos"].contains(&os);
      assert_eq!(plan.system_libs.contains("pthread"), expect, "{} {:?}", os, variant);
    }
  }
}

#[test]
fn optimlib_never_requires_nlopt() {
  for variant in variant_tokens() {
    let plan = plan("Linux", &as_strs(&variant), &[]);
    let names: Vec<&str> = plan.dependencies.iter().map(|d| d.name.as_str()).collect();
    if variant[1] == "optimizer=optimlib" {
      assert!(names.contains(&"armadillo"));
      assert!(!names.contains(&"nlopt"));
    } else {
      assert!(names.contains(&"nlopt"));
      assert!(!names.contains(&"armadillo"));
    }
  }
}

#[test]
fn defines_always_have_three_tokens() {
  for variant in variant_tokens() {
    for header_only in ["True", "False"] {
      let flag = format!("header_only={}", header_only);
      let mut tokens = as_strs(&variant);
      tokens.push(flag.as_str());
      let plan = plan("Linux", &tokens, &[]);
      assert_eq!(plan.defines.len(), 3);
      assert!(plan.defines[0].starts_with("GEOMETRIES_"));
      assert!(plan.defines[1].starts_with("OPTIMIZERS_"));
      assert!(plan.defines[2].starts_with("THREADING_"));
    }
  }
}

#[test]
fn resolution_is_byte_identical() {
  for variant in variant_tokens() {
    let tokens = as_strs(&variant);
    let first = serde_json::to_vec(&plan("Macos", &tokens, &[])).unwrap();
    let second = serde_json::to_vec(&plan("Macos", &tokens, &[])).unwrap();
    assert_eq!(first, second);
  }
}
