use tracing_test::traced_test;

use super::common::plan;

#[test]
#[traced_test]
fn resolution_logs_plan_summary() {
  plan("Linux", &["geometries=eigen"], &[]);
  assert!(logs_contain("resolved build plan"));
  assert!(logs_contain("geometries=eigen"));
}

#[test]
#[traced_test]
fn msvc_accommodation_is_logged() {
  plan("Windows", &[], &["compiler.toolset=v143"]);
  assert!(logs_contain("clearing generator platform and toolset"));
}

#[test]
#[traced_test]
fn unrequired_dependency_options_are_warned_about() {
  let plan = plan("Linux", &["geometries=eigen", "boost:header_only=False"], &[]);
  assert!(plan.dependencies.iter().all(|d| d.name != "boost"));
  assert!(logs_contain("ignoring options for a dependency this configuration does not require"));
  assert!(logs_contain("dependency=boost"));
}
