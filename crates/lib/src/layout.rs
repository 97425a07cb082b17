//! Installed-layout planning.

use serde::{Deserialize, Serialize};

use crate::consts::{BIN_DIR, INCLUDE_DIR, JS_ASSET_DIR, LIB_DIR};
use crate::platform::{HostFacts, Os};
use crate::validate::ValidOptions;

/// Directories a consumer should put on its include, library and binary paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Layout {
  pub includedirs: Vec<String>,
  pub libdirs: Vec<String>,
  pub bindirs: Vec<String>,
}

/// Plan the consumer-facing directories.
///
/// Header-only packages expose only include directories. Compiled packages
/// link from the package cache's `lib`, or from the per-build-type CMake
/// build folder of an editable checkout.
pub fn plan_layout(options: &ValidOptions, host: &HostFacts) -> Layout {
  let includedirs = vec![INCLUDE_DIR.to_string()];
  if options.header_only {
    return Layout {
      includedirs,
      ..Layout::default()
    };
  }

  let libdir = if host.in_local_cache {
    LIB_DIR.to_string()
  } else {
    format!("cmake-build-{}", options.build_type.as_str().to_lowercase())
  };

  let mut bindirs = vec![BIN_DIR.to_string()];
  if options.os == Os::Emscripten {
    bindirs.push(JS_ASSET_DIR.to_string());
  }

  Layout {
    includedirs,
    libdirs: vec![libdir],
    bindirs,
  }
}
