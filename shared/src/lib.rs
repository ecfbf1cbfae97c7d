//! Shared types for the SIGA client
//!
//! Wire models and request/response envelopes shared between the HTTP
//! gateway crate and the state engines. Field names mirror the backend's
//! Spanish JSON contract.

pub mod client;
pub mod models;
pub mod request;
pub mod response;

pub use serde::{Deserialize, Serialize};
