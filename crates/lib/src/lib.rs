//! nestrecipe-lib: variant-aware build configuration for libnest2d
//!
//! This crate turns a declarative set of build options plus host facts into
//! everything downstream tooling needs to build and package one variant:
//! - `OptionSet`: the configuration snapshot, validated into `ValidOptions`
//! - `DependencyRequirement`: the ordered dependency set with propagated sub-options
//! - `ResolvedBuildPlan`: defines, naming, layout, pruning and asset metadata
//! - `PlanCache`: compute-once resolution for whole build matrices
//!
//! Resolution performs no I/O. Applying a plan to an installed tree goes
//! through the `package::prune` and `package::assets` seams.

pub mod cache;
pub mod consts;
pub mod deps;
pub mod layout;
pub mod naming;
pub mod options;
pub mod package;
pub mod plan;
pub mod platform;
pub mod util;
pub mod validate;

pub use cache::PlanCache;
pub use options::{OptionSet, OptionSetBuilder, request::RecipeRequest};
pub use plan::{PlanError, ResolvedBuildPlan, package_id, resolve_plan};
pub use platform::{HostFacts, Os};
pub use validate::{ValidOptions, validate};
