//! Error types for the REST gateway

use thiserror::Error;

/// Errors that can occur when talking to the backoffice API
///
/// Screens never show these to the user verbatim: every failure becomes a
/// generic notification and the cause goes to the log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout, DNS)
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The response body did not decode into the expected shape
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// 401 from the API
    #[error("Unauthorized")]
    Unauthorized,

    /// 404 from the API
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success status
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, as text
        message: String,
    },
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::ResponseParseFailed(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}
