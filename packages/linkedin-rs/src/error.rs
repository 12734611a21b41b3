//! Error types for the LinkedIn client.

use thiserror::Error;

/// Result type for LinkedIn client operations.
pub type Result<T> = std::result::Result<T, LinkedInError>;

/// LinkedIn client errors.
///
/// Provider HTTP statuses that carry a known meaning for an operation are
/// classified into their own variants (`Permission`, `NotFound`, `Conflict`,
/// `Auth`); anything else non-2xx lands in `Api`. `Precondition` failures
/// are raised before any network call is made.
#[derive(Debug, Error)]
pub enum LinkedInError {
    /// Caller-side precondition violated (missing profile id, read-only
    /// identifier targeted for mutation). No request was sent.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// Provider returned 403 for this operation.
    #[error("{operation} {id}: permission denied: {message}")]
    Permission {
        operation: &'static str,
        id: String,
        message: String,
    },

    /// Provider returned 404 for this operation.
    #[error("{operation} {id}: post does not exist or wrong URN format")]
    NotFound { operation: &'static str, id: String },

    /// Provider returned 422 on delete.
    #[error("{operation} {id}: post cannot be deleted: {message}")]
    Conflict {
        operation: &'static str,
        id: String,
        message: String,
    },

    /// Provider returned 401 (token invalid or expired).
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Network-level failure (connection, timeout, TLS).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Unclassified provider error (any other non-2xx response).
    #[error("LinkedIn API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Unexpected response shape.
    #[error("parse error: {0}")]
    Parse(String),
}
