//! Error normalization for backend and image host responses.

use serde_json::Value;
use thiserror::Error;

/// Errors surfaced by the transport layer.
///
/// Pages only ever show the `Display` form of this error, a single
/// human-readable line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Non-2xx response. `message` is already extracted from the body.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    InvalidFile(String),
}

impl ApiError {
    /// Builds a status error from a raw response body.
    pub fn from_status_body(status: u16, body: &[u8]) -> Self {
        ApiError::Status {
            status,
            message: extract_error_message(status, body),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// Pulls a message out of a JSON error body.
///
/// Looks at `detail`, then `message`, then `error.message`. Anything else,
/// including a body that is not JSON at all, reports the status code.
pub fn extract_error_message(status: u16, body: &[u8]) -> String {
    let fallback = || format!("HTTP {}", status);

    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(_) => return fallback(),
    };

    let candidates = [
        value.get("detail"),
        value.get("message"),
        value.get("error").and_then(|e| e.get("message")),
    ];

    let message = candidates
        .into_iter()
        .flatten()
        .find_map(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(fallback);
    message
}
