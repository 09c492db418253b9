//! Error taxonomy for remote calls.
//!
//! Every remote-call failure is returned to the immediate caller as a
//! `Result` value; nothing is thrown across a container boundary and nothing
//! is retried automatically. Retries are always a fresh user action.

use thiserror::Error;

/// Errors that can occur when calling the store API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response reached the client (DNS, connect, timeout, ...).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success envelope or status. Carries the
    /// server's message when one was supplied, else a generic fallback.
    #[error("{0}")]
    Rejected(String),

    /// The credential was rejected (HTTP 401). A rejected token is unusable
    /// session-wide; [`crate::Storefront`] reacts by forcing a logout. A 403
    /// (account valid, action not allowed) is a `Rejected` instead.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Client-side validation failed before any call was issued.
    #[error("validation error: {0}")]
    Validation(String),

    /// The response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    /// Whether this error means the session credential is no longer usable.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// The human-readable message to surface to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => "Could not reach the store. Please try again.".to_owned(),
            Self::Rejected(msg) | Self::Validation(msg) => msg.clone(),
            Self::Unauthorized(_) => "Your session has expired. Please log in again.".to_owned(),
            Self::Parse(_) => "The store returned an unexpected response.".to_owned(),
        }
    }
}
