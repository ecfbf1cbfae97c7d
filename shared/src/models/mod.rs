//! Data models
//!
//! Entities served by the SaaS backend plus the economic-indicator series.
//! All IDs are `i64`. Synthesized placeholder stock rows use negative IDs.

pub mod category;
pub mod indicator;
pub mod local;
pub mod product;
pub mod role;
pub mod sale;
pub mod stock;

// Re-exports
pub use category::*;
pub use indicator::*;
pub use local::*;
pub use product::*;
pub use role::*;
pub use sale::*;
pub use stock::*;
