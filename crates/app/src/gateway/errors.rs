//! Gateway errors.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("backend rejected request with status {status}: {message}")]
    Rejected {
        /// Response status
        status: StatusCode,

        /// Message extracted from the error body
        message: String,
    },

    /// A function answered 2xx but reported an error in its payload.
    #[error("backend function failed: {0}")]
    Function(String),

    /// The response body was missing a field the caller needs.
    #[error("unexpected response from backend: {0}")]
    UnexpectedResponse(String),
}

impl GatewayError {
    /// Whether the backend refused the credentials or token.
    pub fn is_unauthorized(&self) -> bool {
        let GatewayError::Rejected { status, .. } = self else {
            return false;
        };

        [
            StatusCode::BAD_REQUEST,
            StatusCode::UNAUTHORIZED,
            StatusCode::FORBIDDEN,
        ]
        .contains(status)
    }
}
