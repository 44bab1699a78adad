//! Errors returned by `TodoClient` build and parse methods.
//!
//! 404 and 422 get their own variants since callers usually react to "no
//! such todo" and "payload rejected" differently from an unexpected status.

/// Errors returned by `TodoClient`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server returned 404; the requested todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned 422; the request path or body was rejected.
    #[error("validation failed: {body}")]
    Validation { body: String },

    /// Any other unexpected status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    #[error("deserialization failed: {0}")]
    Deserialization(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}
