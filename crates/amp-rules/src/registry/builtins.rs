//! Built-in rule factories

use crate::factory::FactoryFn;
use crate::{apicast, zync};

/// Number of built-in factories.
pub const BUILTIN_COUNT: usize = 2;

/// Every built-in factory, in registration order.
pub fn builtin_factories() -> Vec<FactoryFn> {
    vec![
        zync::new_zync_rule_factory,
        apicast::new_apicast_rule_factory,
    ]
}
