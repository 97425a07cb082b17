//! Dependency resolution.
//!
//! [`resolve`] turns validated options into the ordered list of library
//! requirements, applying the option-propagation rules in a fixed order.
//! Later rules overwrite sub-options set by earlier ones, and rule-forced
//! values overwrite anything the caller seeded through
//! `dependency_options`. Seeds for packages the variant never requires are
//! inert, so one set of dependency options can be shared across a whole
//! build matrix.
//!
//! The function is pure: it never contacts a package registry.

mod catalog;

use std::collections::BTreeMap;
use std::fmt;

use semver::VersionReq;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use catalog::Package;

use crate::options::{Geometries, OptionValue, Optimizer, Threading};
use crate::validate::ValidOptions;

/// Where a requirement is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementKind {
  /// Linked into the library or its consumers.
  Library,
  /// Only runs at build time.
  Tool,
  /// Host-context dependency of the unit-test target.
  Test,
}

impl RequirementKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Library => "library",
      Self::Tool => "tool",
      Self::Test => "test",
    }
  }
}

impl fmt::Display for RequirementKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyRequirement {
  pub name: String,
  pub version_constraint: VersionReq,
  pub kind: RequirementKind,
  pub propagated_options: BTreeMap<String, OptionValue>,
}

impl DependencyRequirement {
  fn new(package: Package, kind: RequirementKind) -> Self {
    Self {
      name: package.name().to_string(),
      version_constraint: package.constraint(),
      kind,
      propagated_options: BTreeMap::new(),
    }
  }

  /// Force a sub-option, overwriting any earlier value.
  pub fn force(&mut self, key: &str, value: impl Into<OptionValue>) -> &mut Self {
    self.propagated_options.insert(key.to_string(), value.into());
    self
  }

  pub fn option(&self, key: &str) -> Option<&OptionValue> {
    self.propagated_options.get(key)
  }
}

/// Ordered requirement list under construction.
struct RequirementSet<'a> {
  options: &'a ValidOptions,
  requirements: Vec<DependencyRequirement>,
}

impl<'a> RequirementSet<'a> {
  fn new(options: &'a ValidOptions) -> Self {
    Self {
      options,
      requirements: Vec::new(),
    }
  }

  /// Require a package, seeding caller sub-options the first time it appears.
  fn require(&mut self, package: Package) -> &mut DependencyRequirement {
    let index = match self.requirements.iter().position(|r| r.name == package.name()) {
      Some(index) => index,
      None => {
        let mut requirement = DependencyRequirement::new(package, RequirementKind::Library);
        if let Some(seeded) = self.options.dependency_options.get(package.name()) {
          requirement.propagated_options.extend(seeded.clone());
        }
        debug!(dependency = package.name(), constraint = %requirement.version_constraint, "requiring");
        self.requirements.push(requirement);
        self.requirements.len() - 1
      }
    };
    &mut self.requirements[index]
  }
}

type Rule = fn(&mut RequirementSet<'_>);

/// Propagation rules, applied in order.
const RULES: [(&str, Rule); 5] = [
  ("geometries", geometry_rule),
  ("optimizer", optimizer_rule),
  ("threading", threading_rule),
  ("logging", logging_rule),
  ("linkage", linkage_rule),
];

fn geometry_rule(set: &mut RequirementSet<'_>) {
  let python_version = set.options.python_version.clone();
  match set.options.geometries {
    Geometries::Clipper => {
      set.require(Package::Clipper);
      set
        .require(Package::Boost)
        .force("header_only", true)
        .force("python_version", python_version);
    }
    Geometries::Boost => {
      set
        .require(Package::Boost)
        .force("header_only", true)
        .force("python_version", python_version);
    }
    Geometries::Eigen => {
      set.require(Package::Eigen);
    }
  }
}

fn optimizer_rule(set: &mut RequirementSet<'_>) {
  match set.options.optimizer {
    Optimizer::Nlopt => set.require(Package::Nlopt),
    Optimizer::Optimlib => set.require(Package::Armadillo),
  };
}

fn threading_rule(set: &mut RequirementSet<'_>) {
  match set.options.threading {
    Threading::Tbb => {
      set.require(Package::OneTbb);
    }
    Threading::Omp => {
      set.require(Package::LlvmOpenmp);
    }
    Threading::Std | Threading::None => {}
  }
}

fn logging_rule(set: &mut RequirementSet<'_>) {
  set.require(Package::Spdlog);
}

/// Every requirement follows the package linkage; header-only consumers force shared.
fn linkage_rule(set: &mut RequirementSet<'_>) {
  let shared = set.options.header_only || set.options.shared;
  for requirement in &mut set.requirements {
    requirement.force("shared", shared);
  }
}

/// Resolve the library requirements for a validated option set.
///
/// Every enum value has a rule, so resolution cannot fail once the options
/// are validated.
pub fn resolve(options: &ValidOptions) -> Vec<DependencyRequirement> {
  let mut set = RequirementSet::new(options);
  for (name, rule) in RULES {
    debug!(rule = name, "applying dependency rule");
    rule(&mut set);
  }
  let requirements = set.requirements;

  let tools = tool_requirements(options);
  for dependency in options.dependency_options.keys() {
    if !requirements.iter().chain(&tools).any(|r| &r.name == dependency) {
      warn!(dependency = %dependency, "ignoring options for a dependency this configuration does not require");
    }
  }

  requirements
}

/// Build-context requirements: the build system, plus the test framework
/// when testing is enabled.
pub fn tool_requirements(options: &ValidOptions) -> Vec<DependencyRequirement> {
  let mut tools = vec![DependencyRequirement::new(Package::Cmake, RequirementKind::Tool)];
  if options.tests {
    let mut catch2 = DependencyRequirement::new(Package::Catch2, RequirementKind::Test);
    if let Some(seeded) = options.dependency_options.get(Package::Catch2.name()) {
      catch2.propagated_options.extend(seeded.clone());
    }
    tools.push(catch2);
  }
  tools
}
