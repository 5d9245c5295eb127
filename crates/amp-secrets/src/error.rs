//! Error types for amp-secrets

/// Result type for amp-secrets operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or writing secret material
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required secret does not exist
    #[error("Secret '{secret}' not found")]
    SecretNotFound { secret: String },

    /// A required field is absent (or empty) in an existing secret
    #[error("Field '{field}' not found in secret '{secret}'")]
    FieldNotFound { secret: String, field: String },

    /// The backing store lock was poisoned by a panicking writer
    #[error("Secret store lock poisoned")]
    StorePoisoned,

    /// File-backed store I/O or format error
    #[error(transparent)]
    Fs(#[from] amp_fs::Error),
}

impl Error {
    /// True for the "never configured" family of errors.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::SecretNotFound { .. } | Error::FieldNotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display_names_secret_and_field() {
        let err = Error::FieldNotFound {
            secret: "zync".into(),
            field: "DATABASE_URL".into(),
        };
        let display = err.to_string();
        assert!(display.contains("zync"));
        assert!(display.contains("DATABASE_URL"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_poisoned_is_not_a_not_found() {
        assert!(!Error::StorePoisoned.is_not_found());
    }
}
