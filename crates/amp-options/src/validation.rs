//! Structural validation of resolved options

use crate::labels::LabelMap;
use crate::{Error, Result};

/// Structural validation of a resolved options record.
///
/// Covers presence checks only; cross-field secret consistency is enforced
/// during resolution by [`crate::consistency`].
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Presence checks for one options type.
pub(crate) struct Checker {
    options: &'static str,
}

impl Checker {
    pub(crate) fn new(options: &'static str) -> Self {
        Self { options }
    }

    fn fail(&self, field: &'static str, reason: &'static str) -> Error {
        Error::Validation {
            options: self.options,
            field,
            reason,
        }
    }

    pub(crate) fn required(&self, field: &'static str, value: &str) -> Result<()> {
        if value.is_empty() {
            return Err(self.fail(field, "is required"));
        }
        Ok(())
    }

    pub(crate) fn labels(&self, field: &'static str, labels: &LabelMap) -> Result<()> {
        if labels.is_empty() {
            return Err(self.fail(field, "must contain at least one label"));
        }
        Ok(())
    }

    pub(crate) fn replicas(&self, field: &'static str, replicas: i32) -> Result<()> {
        if replicas < 0 {
            return Err(self.fail(field, "must not be negative"));
        }
        Ok(())
    }
}
