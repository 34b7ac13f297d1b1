//! Result and error types for the core library

use thiserror::Error;

/// Message shown when the API rejects the session token
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please log in again.";

/// Message used when an error response carries no usable `detail`
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Message used when login fails without a more specific reason
pub const LOGIN_FALLBACK_MESSAGE: &str = "Invalid email or password";

/// Core library error type
///
/// The request pipeline is the only place that classifies HTTP failures;
/// everything above it passes these through unchanged.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP 401. `detail` keeps the server's explanation for the login view.
    #[error("{}", SESSION_EXPIRED_MESSAGE)]
    Unauthorized { detail: Option<String> },

    /// Any other non-2xx response
    #[error("{message}")]
    RequestFailed { status: u16, message: String },

    #[error("{0}")]
    LoginFailed(String),

    #[error("Not logged in. Run 'hr login' first.")]
    NotAuthenticated,

    #[error("{0}")]
    Transport(String),

    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a request failure for a non-2xx status
    pub fn request_failed(status: u16, message: impl Into<String>) -> Self {
        Self::RequestFailed {
            status,
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Whether the API rejected the bearer token
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;
