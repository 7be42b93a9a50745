//! BDD harness (cucumber-rs).
//!
//! Scenario tests live here so the production crates carry no cucumber dependency.
//! Step definitions are in `tests/cucumber.rs`, feature files in `features/`.

/// Directory (relative to this crate) holding the `.feature` files.
pub const FEATURES_DIR: &str = "features";
