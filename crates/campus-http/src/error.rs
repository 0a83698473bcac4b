//! Error types for backend API operations.

use std::io;
use thiserror::Error;

/// Result type for backend API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors that can occur while talking to the backend.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ApiError {
    /// The request never produced a response (connect, DNS, timeout, reset).
    #[error("HTTP error: {0}")]
    Http(String),

    /// The backend answered with a non-success status other than 401/403.
    #[error("Request failed with status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status { status: u16, message: Option<String> },

    /// 401/403. The response policy has already de-authenticated the session.
    #[error("Not authorized (status {0})")]
    Unauthorized(u16),

    /// The envelope came back with `success: false`.
    #[error("Rejected by backend: {0}")]
    Rejected(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Token storage error: {0}")]
    Storage(String),
}

impl ApiError {
    /// Check if this is an authorization failure handled by the session layer.
    #[inline]
    #[must_use]
    pub fn is_access_denied(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    /// Check if the request failed before any response arrived.
    #[inline]
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Http(_))
    }

    /// The message the backend attached to a failure, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            ApiError::Rejected(message) => Some(message),
            _ => None,
        }
    }
}
