//! Output artifact naming and preprocessor defines.
//!
//! The library always links as [`LIBRARY_BASE_NAME`]; variant information
//! travels in the defines, never in the file name.

use serde::{Deserialize, Serialize};

use crate::consts::LIBRARY_BASE_NAME;
use crate::options::BuildType;
use crate::platform::Os;
use crate::validate::ValidOptions;

/// Marker inserted before the extension of Windows static debug libraries.
const DEBUG_MARKER: &str = "d";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactNaming {
  /// Link name, as passed to the linker.
  pub library_name: String,
  pub extension: String,
  /// On-disk file name of the primary artifact.
  pub file_name: String,
  pub defines: Vec<String>,
}

/// File extension of the primary artifact for a target OS and linkage.
pub fn library_extension(os: Os, shared: bool) -> &'static str {
  match (os, shared) {
    (Os::Windows, false) => "lib",
    (Os::Windows, true) => "dll",
    (os, true) if os.is_apple() => "dylib",
    (_, true) => "so",
    (_, false) => "a",
  }
}

/// Compile definitions naming the selected backends, e.g. `GEOMETRIES_clipper`.
pub fn defines(options: &ValidOptions) -> Vec<String> {
  vec![
    format!("GEOMETRIES_{}", options.geometries),
    format!("OPTIMIZERS_{}", options.optimizer),
    format!("THREADING_{}", options.threading),
  ]
}

/// Name the primary artifact.
///
/// Windows static debug builds get a `d` marker before the extension.
/// Header-only packages take the static extension and ignore the build
/// type.
pub fn name_artifact(options: &ValidOptions) -> ArtifactNaming {
  let shared = options.effective_shared();
  let extension = library_extension(options.os, shared);

  // Header-only packages carry no compiled artifact, so the build type must
  // not reach the name.
  let debug = !options.header_only && options.build_type == BuildType::Debug;
  let mut library_name = LIBRARY_BASE_NAME.to_string();
  if debug && options.os == Os::Windows && !shared {
    library_name.push_str(DEBUG_MARKER);
  }

  let file_name = if options.os == Os::Windows {
    format!("{}.{}", library_name, extension)
  } else {
    format!("lib{}.{}", library_name, extension)
  };

  ArtifactNaming {
    library_name,
    extension: extension.to_string(),
    file_name,
    defines: defines(options),
  }
}
