//! # API Error Type
//!
//! Failure taxonomy for backend calls.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Error Flow                                         │
//! │                                                                         │
//! │  reqwest failure ───────────────► ApiError::Transport                   │
//! │  non-2xx, 401  ─────────────────► ApiError::Unauthorized                │
//! │  non-2xx, other ──┬ detail json ► ApiError::Backend { status, detail }  │
//! │                   └ raw body  ──► ApiError::Backend { status, detail }  │
//! │  body not decodable ────────────► ApiError::Decode                      │
//! │                                                                         │
//! │  POLICY: nothing is retried automatically; every mutating action is     │
//! │  fire-once. Pages surface the message and the user re-attempts.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Errors from backend calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level failure: DNS, refused connection, timeout.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The stored token was rejected (401). Callers decide what to do;
    /// the client never auto-redirects or clears state on its own.
    #[error("not authenticated: {detail}")]
    Unauthorized { detail: String },

    /// Any other non-success status. `detail` is the backend's `detail`
    /// field when the body carried one, otherwise the raw body text.
    #[error("backend returned {status}: {detail}")]
    Backend { status: u16, detail: String },

    /// The response body did not match the expected shape.
    #[error("could not decode response: {0}")]
    Decode(String),

    /// The configured base URL is not a valid URL.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The token file could not be read or written.
    #[error("token storage failed: {0}")]
    TokenStorage(String),
}

impl ApiError {
    /// The user-facing message for a page notice.
    ///
    /// Backend details are already human-readable ("Not enough stock for
    /// ..."), so they pass through; transport errors get their display form.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Backend { detail, .. } | ApiError::Unauthorized { detail } => detail.clone(),
            other => other.to_string(),
        }
    }

    /// True for 401-class failures.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

/// Convenience type alias for Results with ApiError.
pub type ApiResult<T> = Result<T, ApiError>;
