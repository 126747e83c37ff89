use std::fmt;

use serde_json::Value;

/// Message used when the server gives no usable error body.
const GENERIC_FAILURE: &str = "Request failed";

/// The single failure shape at the client boundary.
///
/// Network errors, 4xx and 5xx all collapse into a human-readable message;
/// callers only ever display it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Builds an error from a non-success response.
    ///
    /// Uses the `error` string of a JSON body when present, otherwise a
    /// generic message carrying the status code.
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        if let Ok(json) = serde_json::from_slice::<Value>(body)
            && let Some(message) = json.get("error").and_then(Value::as_str)
            && !message.trim().is_empty()
        {
            return Self::new(message.trim());
        }
        Self::new(format!("{GENERIC_FAILURE} with status {status}"))
    }

    /// Builds an error from a transport failure.
    pub fn network(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::new(format!("Request timed out: {err}"))
        } else if err.is_connect() {
            Self::new(format!("Connection failed: {err}"))
        } else {
            Self::new(format!("Network error: {err}"))
        }
    }

    /// Builds an error for a success response the client could not decode.
    pub fn unexpected(err: &serde_json::Error) -> Self {
        Self::new(format!("Unexpected response from server: {err}"))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for API operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
