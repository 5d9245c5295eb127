//! Error types for amp-options

/// Result type for amp-options operations
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of a resolution failure.
///
/// Callers match on this to tell "never configured" ([`ErrorKind::NotFound`])
/// apart from "misconfigured" ([`ErrorKind::Inconsistency`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Parse,
    Inconsistency,
    Validation,
    Image,
    Store,
}

/// Errors that can occur while resolving subsystem options
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An error annotated with the pipeline operation it came from
    #[error("{operation}: {source}")]
    Context {
        operation: String,
        #[source]
        source: Box<Error>,
    },

    /// Secret store lookups and writes
    #[error(transparent)]
    Secrets(#[from] amp_secrets::Error),

    /// A stored value is not in the expected format
    #[error("error parsing provided '{field}' field in '{secret}' secret: {message}")]
    Parse {
        secret: String,
        field: String,
        message: String,
    },

    /// A stored connection URL carries no password
    #[error("'{field}' field in '{secret}' secret doesn't have required password part")]
    MissingPassword { secret: String, field: String },

    /// Two fields that must agree have drifted apart
    #[error(
        "'{password_field}' field in secret '{secret}' does not match password part in field '{url_field}'. Inconsistency detected"
    )]
    Inconsistency {
        secret: String,
        password_field: String,
        url_field: String,
    },

    /// A resolved options record failed structural validation
    #[error("{options}: field '{field}' {reason}")]
    Validation {
        options: &'static str,
        field: &'static str,
        reason: &'static str,
    },

    /// An image reference could not be parsed
    #[error("invalid image reference for {component}: '{image}'")]
    InvalidImage { component: String, image: String },
}

impl Error {
    /// Classify the root cause, looking through context wrappers.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Context { source, .. } => source.kind(),
            Error::Secrets(e) if e.is_not_found() => ErrorKind::NotFound,
            Error::Secrets(_) => ErrorKind::Store,
            Error::Parse { .. } | Error::MissingPassword { .. } => ErrorKind::Parse,
            Error::Inconsistency { .. } => ErrorKind::Inconsistency,
            Error::Validation { .. } => ErrorKind::Validation,
            Error::InvalidImage { .. } => ErrorKind::Image,
        }
    }

    /// The innermost error beneath any context wrappers.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Context { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Attach the name of the failing pipeline operation to an error.
pub trait ResultExt<T> {
    fn context(self, operation: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, operation: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Context {
            operation: operation.into(),
            source: Box::new(e.into()),
        })
    }
}
