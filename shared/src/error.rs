//! Error types shared by the API client, session persistence and the login
//! flow. Every variant carries a message that is safe to show to the user.

use thiserror::Error;

use crate::api::ErrorResponse;

/// Maximum number of error body characters surfaced to the UI.
pub const MAX_ERROR_CHARS: usize = 200;

/// Unified error type for everything that can fail outside local validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// Missing or unusable configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Backend could not be reached
    #[error("Network error: {0}")]
    Network(String),

    /// Request aborted after the client timeout
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Backend answered with a non-2xx status. `backend_message` is the
    /// body's `{ message }` field, when it had one.
    #[error("Request failed ({status}): {message}")]
    Http {
        status: u16,
        message: String,
        backend_message: Option<String>,
    },

    /// Response body did not match the expected shape
    #[error("Response error: {0}")]
    Parse(String),

    /// Request body could not be encoded
    #[error("Request error: {0}")]
    Serialization(String),

    /// Browser storage rejected a read or write
    #[error("Storage error: {0}")]
    Storage(String),

    /// Input rejected before reaching the network
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl AppError {
    /// Builds an `Http` error from a raw response body, preferring the
    /// backend's `{ message }` field over the sanitized body.
    pub fn from_http(status: u16, body: &str) -> Self {
        let backend_message = ErrorResponse::parse(body).map(|error| error.message);
        let message = backend_message
            .clone()
            .unwrap_or_else(|| sanitize_body(body));
        AppError::Http {
            status,
            message,
            backend_message,
        }
    }

    /// The backend's own `{ message }`, if the failure carried one.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            AppError::Http {
                backend_message, ..
            } => backend_message.as_deref(),
            _ => None,
        }
    }

    /// Text shown in notifications.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Http { message, .. } => message.clone(),
            AppError::Validation(error) => error.to_string(),
            other => other.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Http { status: 401, .. })
    }
}

/// Input errors caught locally. These never produce a network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Enter a valid email (with @) or 10-digit phone number.")]
    InvalidIdentifier,

    #[error("Enter a valid email or phone to reset OTP.")]
    InvalidResetIdentifier,

    #[error("Enter the OTP you received.")]
    EmptyOtp,

    #[error("Resend is available in {0}s.")]
    CooldownActive(u32),

    #[error("Request an OTP first.")]
    NoPendingChallenge,

    #[error("A request is already in progress.")]
    Busy,
}

/// Trims and truncates an HTTP error body for display.
pub fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
