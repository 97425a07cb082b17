//! Host facts the resolution depends on.
//!
//! The target OS lives on the [`OptionSet`](crate::options::OptionSet) as a
//! setting; [`HostFacts`] carries what is known about where the resolved
//! package will be consumed from.

pub mod os;

use serde::{Deserialize, Serialize};

pub use os::Os;

/// Facts about the consuming environment, fixed for a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostFacts {
  /// The package is served from an installed package cache rather than an
  /// editable source checkout.
  pub in_local_cache: bool,
}

impl HostFacts {
  pub fn editable() -> Self {
    Self { in_local_cache: false }
  }
}

impl Default for HostFacts {
  fn default() -> Self {
    Self { in_local_cache: true }
  }
}
