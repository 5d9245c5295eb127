//! The per-subsystem factory seam

use crate::rule::RuleBundle;

/// Namespace token substituted into synthetic options.
///
/// Manifest writers replace it with the real namespace when they install a
/// bundle.
pub const NAMESPACE_PLACEHOLDER: &str = "__NAMESPACE__";

/// Placeholder for required options fields that rules never read.
pub(crate) const PLACEHOLDER: &str = "_";

/// Builds the alerting rules of one subsystem.
pub trait RuleFactory {
    /// Subsystem name, e.g. `zync`
    fn subsystem(&self) -> &'static str;

    /// Build the subsystem's rule bundle.
    ///
    /// # Panics
    ///
    /// If the factory's own synthetic options fail validation. That is a
    /// defect in the factory, not a runtime condition.
    fn rule_bundle(&self) -> RuleBundle;
}

/// Zero-argument factory constructor, as held by the registry.
pub type FactoryFn = fn() -> Box<dyn RuleFactory>;
