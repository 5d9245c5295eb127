//! Storage backend trait

use crate::Result;
use std::collections::BTreeMap;

/// Field name -> value bag of one secret.
pub type SecretData = BTreeMap<String, String>;

/// A namespaced secret store.
///
/// Implementations must give read-after-write consistency for a single key:
/// a field written with [`SecretStore::write_field`] is visible to the next
/// [`SecretStore::read`] from the same caller.
pub trait SecretStore: Send + Sync {
    /// Read a whole secret. `Ok(None)` when the secret does not exist.
    fn read(&self, namespace: &str, secret: &str) -> Result<Option<SecretData>>;

    /// Write one field, creating the secret if it does not exist.
    fn write_field(&self, namespace: &str, secret: &str, field: &str, value: &str) -> Result<()>;
}
