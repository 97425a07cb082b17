mod common;
mod identity_tests;
mod logging_tests;
mod property_tests;
mod scenario_tests;
