use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors returned by a search backend.
///
/// The adapters never retry or translate these; whatever the backend returns
/// reaches the caller as-is.
pub enum BackendError {
    /// The backend could not be reached.
    #[error("backend unavailable: {reason}")]
    Unavailable {
        /// Error message.
        reason: String,
    },

    /// The backend did not answer in time.
    #[error("backend request timed out after {elapsed_ms} ms")]
    Timeout {
        /// Time waited before giving up.
        elapsed_ms: u64,
    },

    /// The backend answered with data that could not be interpreted.
    #[error("invalid backend response: {reason}")]
    InvalidResponse {
        /// Error message.
        reason: String,
    },

    /// Any other backend failure.
    #[error("backend error: {0}")]
    Other(String),
}

impl BackendError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn invalid_response(reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            reason: reason.into(),
        }
    }
}

/// Convenience result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;
