//! Namespace-bound access to a secret store

use crate::policy::{FieldLookup, FieldPolicy, Resolution, decide};
use crate::{Result, SecretStore};

/// A [`SecretStore`] handle bound to one namespace.
pub struct SecretSource<'a> {
    store: &'a dyn SecretStore,
    namespace: String,
}

impl<'a> SecretSource<'a> {
    pub fn new(store: &'a dyn SecretStore, namespace: impl Into<String>) -> Self {
        Self {
            store,
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Read what the store holds for one field. Empty values count as missing.
    pub fn lookup(&self, secret: &str, field: &str) -> Result<FieldLookup> {
        let lookup = match self.store.read(&self.namespace, secret)? {
            None => FieldLookup::SecretMissing,
            Some(mut data) => match data.remove(field) {
                Some(value) if !value.is_empty() => FieldLookup::Present(value),
                _ => FieldLookup::FieldMissing,
            },
        };
        Ok(lookup)
    }

    /// Resolve a field without touching the store beyond a read.
    ///
    /// Use [`Resolution::requires_write`] to find out whether applying the
    /// result would create secret material.
    pub fn plan(&self, policy: &FieldPolicy) -> Result<Resolution> {
        let lookup = self.lookup(&policy.secret, &policy.field)?;
        decide(lookup, policy)
    }

    /// Persist a generated value. No-op for values that are already stored.
    pub fn persist(&self, policy: &FieldPolicy, resolution: &Resolution) -> Result<()> {
        if let Resolution::Generated(value) = resolution {
            tracing::info!(
                namespace = %self.namespace,
                secret = %policy.secret,
                field = %policy.field,
                "Persisting generated default for absent secret field"
            );
            self.store
                .write_field(&self.namespace, &policy.secret, &policy.field, value)?;
        }
        Ok(())
    }

    /// Plan, persist if needed, and return the field's value.
    pub fn apply(&self, policy: &FieldPolicy) -> Result<String> {
        let resolution = self.plan(policy)?;
        self.persist(policy, &resolution)?;
        Ok(resolution.into_value())
    }

    /// Value of a field that must already exist in an existing secret.
    pub fn required_field(&self, secret: &str, field: &str) -> Result<String> {
        self.apply(&FieldPolicy::required(secret, field))
    }

    /// Stored value of a field, or `default` after persisting it.
    pub fn field_or_default(&self, secret: &str, field: &str, default: &str) -> Result<String> {
        self.apply(&FieldPolicy::defaultable(secret, field, default))
    }
}
