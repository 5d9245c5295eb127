//! Error types for amp-rules

/// Result type for amp-rules operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while encoding rule bundles
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to encode rule bundle '{bundle}' as YAML: {source}")]
    Yaml {
        bundle: String,
        #[source]
        source: serde_yaml::Error,
    },
}
