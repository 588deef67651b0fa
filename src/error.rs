//! Error types for the backend and request layer.

use thiserror::Error;

/// Errors produced by the request wrapper and the record store.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or unknown session token, or bad credentials.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Unknown collection or record id.
    #[error("not found: {0}")]
    NotFound(String),

    /// Malformed request path or body.
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns true if the error means the session is no longer valid.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
