//! Core error types

use crate::session::SessionError;
use siga_client::ClientError;
use thiserror::Error;

/// Error type for repository and engine operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No persisted access token; the caller must log in first
    #[error("No hay sesión activa")]
    NoSession,

    /// Login rejected or the success payload was incomplete
    #[error("{0}")]
    Auth(String),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;
