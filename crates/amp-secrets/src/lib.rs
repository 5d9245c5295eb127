//! Secret source for the API management operator.
//!
//! Credential-class values live in a namespaced key/value store behind the
//! [`SecretStore`] trait. Reading a field is split into two explicit phases:
//!
//! 1. [`decide`] - a pure function from what the store holds and the field's
//!    [`FieldPolicy`] to a [`Resolution`]. Whether resolution would create a
//!    secret value is visible from [`Resolution::requires_write`] without any
//!    I/O.
//! 2. [`SecretSource::persist`] - the only step that mutates the store, and
//!    only for [`Resolution::Generated`] values.
//!
//! [`SecretSource::apply`] composes lookup, decision and persistence.

pub mod error;
pub mod file;
pub mod memory;
pub mod policy;
pub mod source;
pub mod store;

pub use error::{Error, Result};
pub use file::FileSecretStore;
pub use memory::MemorySecretStore;
pub use policy::{FieldLookup, FieldPolicy, Requirement, Resolution, decide};
pub use source::SecretSource;
pub use store::{SecretData, SecretStore};
