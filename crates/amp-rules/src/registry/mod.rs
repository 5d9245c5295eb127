//! Rule-factory registry
//!
//! The built-in factory list lives in one place ([`builtin_factories`]); the
//! registry itself is an ordinary value the entry point builds and passes on.

mod builtins;
mod store;

pub use builtins::{BUILTIN_COUNT, builtin_factories};
pub use store::RuleFactoryRegistry;
