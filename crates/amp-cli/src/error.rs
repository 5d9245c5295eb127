//! Error types for amp-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Options(#[from] amp_options::Error),

    #[error(transparent)]
    Rules(#[from] amp_rules::Error),

    #[error(transparent)]
    Fs(#[from] amp_fs::Error),

    #[error("failed to encode output as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to encode output as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to initialize logging: {0}")]
    Logging(String),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
