//! In-memory secret store

use crate::{Error, Result, SecretData, SecretStore};
use std::collections::BTreeMap;
use std::sync::RwLock;

type SecretKey = (String, String);

/// Secret store held in process memory.
///
/// Safe to share between resolvers running on different threads.
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    secrets: RwLock<BTreeMap<SecretKey, SecretData>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a secret with the given fields (builder pattern).
    pub fn with_secret<I, K, V>(self, namespace: &str, secret: &str, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        if let Ok(mut secrets) = self.secrets.write() {
            let data = secrets
                .entry((namespace.to_string(), secret.to_string()))
                .or_default();
            for (k, v) in fields {
                data.insert(k.into(), v.into());
            }
        }
        self
    }

    /// Number of secrets across all namespaces.
    pub fn len(&self) -> usize {
        self.secrets.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SecretStore for MemorySecretStore {
    fn read(&self, namespace: &str, secret: &str) -> Result<Option<SecretData>> {
        let secrets = self.secrets.read().map_err(|_| Error::StorePoisoned)?;
        Ok(secrets
            .get(&(namespace.to_string(), secret.to_string()))
            .cloned())
    }

    fn write_field(&self, namespace: &str, secret: &str, field: &str, value: &str) -> Result<()> {
        let mut secrets = self.secrets.write().map_err(|_| Error::StorePoisoned)?;
        secrets
            .entry((namespace.to_string(), secret.to_string()))
            .or_default()
            .insert(field.to_string(), value.to_string());
        Ok(())
    }
}
