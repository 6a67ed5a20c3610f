//! Error types for cmsbind

use crate::handle::ResourceKind;
use thiserror::Error;

/// Result type for cmsbind operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in cmsbind operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Arguments failed type, arity or shape checks before reaching the engine
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The engine returned NULL from a creation call
    #[error("Engine failed to {0}")]
    EngineResourceFailure(&'static str),

    /// A capsule of the wrong resource kind was passed in
    #[error("Handle kind mismatch: expected {expected}, got {actual}")]
    HandleKindMismatch {
        expected: ResourceKind,
        actual: ResourceKind,
    },

    /// The capsule has already been released
    #[error("{0} handle used after release")]
    UseAfterRelease(ResourceKind),

    /// Invalid configuration values
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error while reading configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// How a failure should be treated by the embedding host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Surfaced as the host's ordinary failure value
    Recoverable,
    /// A bug in the calling code; should fail loudly
    Programming,
}

impl Error {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::HandleKindMismatch { .. } | Error::UseAfterRelease(_) => {
                ErrorCategory::Programming
            }
            _ => ErrorCategory::Recoverable,
        }
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArguments(msg.into())
    }
}
