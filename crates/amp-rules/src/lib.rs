//! Static alerting-rule bundles for API management subsystems.
//!
//! Each subsystem contributes a [`RuleFactory`]. A factory builds its own
//! synthetic options record (placeholder values, a namespace placeholder
//! token), validates it structurally and derives a fixed [`RuleBundle`] from
//! it. No secret store is ever consulted.
//!
//! Factories are collected in a [`RuleFactoryRegistry`] that the process
//! entry point builds once and hands to whatever consumes it.

pub mod apicast;
pub mod error;
pub mod factory;
pub mod registry;
pub mod rule;
pub mod zync;

pub use error::{Error, Result};
pub use factory::{FactoryFn, NAMESPACE_PLACEHOLDER, RuleFactory};
pub use registry::{BUILTIN_COUNT, RuleFactoryRegistry, builtin_factories};
pub use rule::{AlertRule, RuleBundle, Severity};

use amp_options::LabelMap;
use amp_options::labels::compose;

/// Labels the monitoring stack selects rule objects by.
fn bundle_labels(common: &LabelMap) -> LabelMap {
    let monitoring = LabelMap::from([
        ("prometheus".to_string(), "application-monitoring".to_string()),
        ("role".to_string(), "alert-rules".to_string()),
    ]);
    compose([common, &monitoring])
}
