//! Client error types

use thiserror::Error;

/// Error type for backend and indicator calls.
///
/// Transport and decode failures deliberately display the same generic
/// localized message the app shows users; server-supplied messages are
/// surfaced verbatim.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, timeout, TLS, or body-decode failure
    #[error("Error de conexión")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response; the string is the server `message` field when the
    /// error body parses, else a generic fallback
    #[error("{0}")]
    Api(String),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
