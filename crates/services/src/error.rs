//! Service error types.

use thiserror::Error;

/// Errors surfaced by the external service clients.
///
/// Rejections carry the server's `error` message verbatim so callers can
/// show it to the user unchanged. Neither variant is retried automatically;
/// every retry is user-initiated.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    /// The server rejected the request with an error payload.
    #[error("{message}")]
    Rejected { message: String },

    /// The request never produced a usable response.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered 2xx but the body did not match the contract.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ServiceError {
    /// Creates a rejection from a server-provided message, falling back to
    /// a generic one when the payload had no `error` field.
    pub fn rejected(message: Option<String>) -> Self {
        ServiceError::Rejected {
            message: message.unwrap_or_else(|| "An unknown error occurred.".to_string()),
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ServiceError::InvalidResponse(err.to_string())
        } else {
            ServiceError::Network(err.to_string())
        }
    }
}

/// Convenience type alias for service results.
pub type Result<T> = std::result::Result<T, ServiceError>;
