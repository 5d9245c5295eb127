//! Shared test utilities for the amp-operator workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only and is never published.
//!
//! # Modules
//!
//! - [`spec`]: [`ApiManagerBuilder`] for desired-state documents
//! - [`secrets`]: pre-seeded secret stores in the layout operators write

pub mod secrets;
pub mod spec;

pub use secrets::{ZyncSecretFixture, database_url};
pub use spec::ApiManagerBuilder;

/// Namespace used by fixtures unless a test overrides it.
pub const TEST_NAMESPACE: &str = "3scale-test";
