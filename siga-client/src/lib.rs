//! SIGA Client - HTTP gateway for the SaaS backend
//!
//! Typed, bearer-token-authenticated calls against the SIGA API, plus an
//! unauthenticated client for the mindicador.cl economic indicators.

pub mod config;
pub mod error;
pub mod http;
pub mod indicators;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::ApiClient;
pub use indicators::IndicatorClient;

// Re-export shared types for convenience
pub use shared::client::{ChatResponse, LoginResponse, User};
