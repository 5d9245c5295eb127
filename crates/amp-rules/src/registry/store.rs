//! Registry storage

use crate::factory::FactoryFn;
use crate::rule::RuleBundle;

/// Append-only, ordered list of rule factories.
///
/// Fill it before sharing; afterwards it is only read.
#[derive(Debug, Default, Clone)]
pub struct RuleFactoryRegistry {
    factories: Vec<FactoryFn>,
}

impl RuleFactoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in factory.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for factory in super::builtins::builtin_factories() {
            registry.register(factory);
        }
        registry
    }

    /// Append a factory.
    pub fn register(&mut self, factory: FactoryFn) {
        tracing::debug!(subsystem = factory().subsystem(), "Registering rule factory");
        self.factories.push(factory);
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Subsystem names in registration order.
    pub fn subsystems(&self) -> Vec<&'static str> {
        self.factories.iter().map(|new| new().subsystem()).collect()
    }

    /// Invoke every factory, in registration order.
    pub fn bundles(&self) -> Vec<RuleBundle> {
        self.factories.iter().map(|new| new().rule_bundle()).collect()
    }

    /// Invoke the factory registered for `subsystem`, if any.
    pub fn bundle(&self, subsystem: &str) -> Option<RuleBundle> {
        self.factories
            .iter()
            .map(|new| new())
            .find(|factory| factory.subsystem() == subsystem)
            .map(|factory| factory.rule_bundle())
    }
}
