//! Shared helpers for library integration tests.

use nestrecipe_lib::options::{Geometries, Optimizer, Threading};
use nestrecipe_lib::{HostFacts, OptionSet, ResolvedBuildPlan, resolve_plan};

/// Default compiler per target OS, above every minimum.
pub fn compiler_for(os: &str) -> (&'static str, &'static str) {
  match os {
    "Windows" => ("msvc", "193"),
    "Macos" | "iOS" => ("apple-clang", "14"),
    "Emscripten" => ("clang", "15"),
    _ => ("gcc", "12"),
  }
}

/// Build an option set from `key=value` option and setting tokens.
pub fn options(os: &str, option_tokens: &[&str], setting_tokens: &[&str]) -> OptionSet {
  let (family, version) = compiler_for(os);
  let mut builder = OptionSet::builder();
  builder
    .setting("os", os)
    .and_then(|b| b.setting("compiler", family))
    .and_then(|b| b.setting("compiler.version", version))
    .unwrap();
  for token in setting_tokens {
    builder.setting_token(token).unwrap();
  }
  for token in option_tokens {
    builder.option_token(token).unwrap();
  }
  builder.build().unwrap()
}

pub fn plan(os: &str, option_tokens: &[&str], setting_tokens: &[&str]) -> ResolvedBuildPlan {
  resolve_plan(options(os, option_tokens, setting_tokens), &HostFacts::default()).unwrap()
}

pub fn dependency_names(plan: &ResolvedBuildPlan) -> Vec<&str> {
  plan.dependencies.iter().map(|d| d.name.as_str()).collect()
}

/// Every backend/linkage combination as option tokens.
pub fn variant_tokens() -> Vec<Vec<String>> {
  let mut variants = Vec::new();
  for g in Geometries::ALL {
    for o in Optimizer::ALL {
      for t in Threading::ALL {
        for shared in ["True", "False"] {
          variants.push(vec![
            format!("geometries={}", g),
            format!("optimizer={}", o),
            format!("threading={}", t),
            format!("shared={}", shared),
          ]);
        }
      }
    }
  }
  variants
}

pub fn as_strs(tokens: &[String]) -> Vec<&str> {
  tokens.iter().map(|t| t.as_str()).collect()
}
