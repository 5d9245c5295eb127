//! Per-field resolution policy and the pure decision step

use crate::{Error, Result};

/// What the store holds for one secret field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldLookup {
    /// The secret itself does not exist
    SecretMissing,
    /// The secret exists but the field is absent or empty
    FieldMissing,
    /// The stored, non-empty value
    Present(String),
}

/// Whether an absent field is an error or gets a default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// Must already exist in the store
    Required,
    /// Falls back to (and persists) the given value
    DefaultTo(String),
}

/// Where a field lives and what happens when it is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPolicy {
    pub secret: String,
    pub field: String,
    pub requirement: Requirement,
}

impl FieldPolicy {
    pub fn required(secret: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            field: field.into(),
            requirement: Requirement::Required,
        }
    }

    pub fn defaultable(
        secret: impl Into<String>,
        field: impl Into<String>,
        default: impl Into<String>,
    ) -> Self {
        Self {
            secret: secret.into(),
            field: field.into(),
            requirement: Requirement::DefaultTo(default.into()),
        }
    }
}

/// Outcome of [`decide`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Value already in the store
    Stored(String),
    /// Fallback value that still has to be persisted
    Generated(String),
}

impl Resolution {
    pub fn value(&self) -> &str {
        match self {
            Resolution::Stored(v) | Resolution::Generated(v) => v,
        }
    }

    pub fn into_value(self) -> String {
        match self {
            Resolution::Stored(v) | Resolution::Generated(v) => v,
        }
    }

    /// True when applying this resolution writes to the secret store.
    pub fn requires_write(&self) -> bool {
        matches!(self, Resolution::Generated(_))
    }
}

/// Decide a field's value from the store contents and its policy.
///
/// Pure: performs no I/O and never mutates the store.
pub fn decide(lookup: FieldLookup, policy: &FieldPolicy) -> Result<Resolution> {
    match (lookup, &policy.requirement) {
        (FieldLookup::Present(value), _) => Ok(Resolution::Stored(value)),
        (_, Requirement::DefaultTo(default)) => Ok(Resolution::Generated(default.clone())),
        (FieldLookup::SecretMissing, Requirement::Required) => Err(Error::SecretNotFound {
            secret: policy.secret.clone(),
        }),
        (FieldLookup::FieldMissing, Requirement::Required) => Err(Error::FieldNotFound {
            secret: policy.secret.clone(),
            field: policy.field.clone(),
        }),
    }
}
