use semver::{Comparator, Op, Prerelease, VersionReq};

/// Every package the recipe can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Package {
  Clipper,
  Boost,
  Eigen,
  Nlopt,
  Armadillo,
  OneTbb,
  LlvmOpenmp,
  Spdlog,
  Cmake,
  Catch2,
}

impl Package {
  pub fn name(&self) -> &'static str {
    match self {
      Self::Clipper => "clipper",
      Self::Boost => "boost",
      Self::Eigen => "eigen",
      Self::Nlopt => "nlopt",
      Self::Armadillo => "armadillo",
      Self::OneTbb => "onetbb",
      Self::LlvmOpenmp => "llvm-openmp",
      Self::Spdlog => "spdlog",
      Self::Cmake => "cmake",
      Self::Catch2 => "catch2",
    }
  }

  pub fn constraint(&self) -> VersionReq {
    match self {
      Self::Clipper => at_least(6, 4, 2),
      Self::Boost => exactly(1, 70, 0),
      Self::Eigen => at_least(3, 3, 7),
      Self::Nlopt => at_least(2, 7, 0),
      Self::Armadillo => at_least(10, 5, 0),
      Self::OneTbb => at_least(2021, 3, 0),
      Self::LlvmOpenmp => at_least(12, 0, 1),
      Self::Spdlog => at_least(1, 8, 5),
      Self::Cmake => at_least(3, 16, 2),
      Self::Catch2 => at_least(2, 13, 6),
    }
  }
}

fn comparator(op: Op, major: u64, minor: u64, patch: u64) -> VersionReq {
  VersionReq {
    comparators: vec![Comparator {
      op,
      major,
      minor: Some(minor),
      patch: Some(patch),
      pre: Prerelease::EMPTY,
    }],
  }
}

fn at_least(major: u64, minor: u64, patch: u64) -> VersionReq {
  comparator(Op::GreaterEq, major, minor, patch)
}

fn exactly(major: u64, minor: u64, patch: u64) -> VersionReq {
  comparator(Op::Exact, major, minor, patch)
}

#[cfg(test)]
mod tests {
  use super::*;
  use semver::Version;

  #[test]
  fn constraints_render_as_requirements() {
    assert_eq!(Package::Clipper.constraint().to_string(), ">=6.4.2");
    assert_eq!(Package::Boost.constraint().to_string(), "=1.70.0");
  }

  #[test]
  fn floors_admit_newer_releases() {
    assert!(Package::Nlopt.constraint().matches(&Version::new(2, 7, 1)));
    assert!(!Package::Nlopt.constraint().matches(&Version::new(2, 6, 2)));
    assert!(!Package::Boost.constraint().matches(&Version::new(1, 71, 0)));
  }
}
