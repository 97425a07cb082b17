/// Package name used for the recipe itself.
pub const PACKAGE_NAME: &str = "libnest2d";

/// Package version the recipe describes.
pub const PACKAGE_VERSION: &str = "4.10.0";

/// Fixed link name of the compiled library.
pub const LIBRARY_BASE_NAME: &str = "nest2d";

/// Minimum C++ standard (as a two-digit year) the headers compile under.
pub const MIN_CPPSTD: u32 = 17;

/// Length of the truncated object hash used for identities.
pub const OBJ_HASH_PREFIX_LEN: usize = 20;

/// Public header root, always exposed.
pub const INCLUDE_DIR: &str = "include";

/// Library directory inside an installed package.
pub const LIB_DIR: &str = "lib";

/// Binary directory inside an installed package.
pub const BIN_DIR: &str = "bin";

/// Directory holding the generated JavaScript/WASM bindings.
pub const JS_ASSET_DIR: &str = "libnest2d_js";

/// Stem shared by every generated binding asset.
pub const JS_ASSET_STEM: &str = "libnest2d_js";

/// npm package name used for the generated bindings.
pub const JS_PACKAGE_NAME: &str = "libnest2d-js";

/// package.json `config` key pointing at the generated asset directory.
pub const JS_ASSET_DIR_CONFIG_KEY: &str = "libnest2d_js_dir";

/// Header subtree holding per-geometry backends.
pub const BACKENDS_HEADER_DIR: &str = "include/libnest2d/backends";

/// Header subtree holding per-optimizer backends.
pub const OPTIMIZERS_HEADER_DIR: &str = "include/libnest2d/optimizers";
