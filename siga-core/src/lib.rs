//! SIGA Core - session, repositories, and state engines
//!
//! Everything between the HTTP gateway and the presentation layer: the
//! persisted session store, login orchestration, the token-gated catalog
//! repository, the inventory reconciliation engine, and the cross-screen
//! coordination state. Engines expose their state as `tokio::sync::watch`
//! channels: synchronous snapshot reads plus change notification.

pub mod auth;
pub mod chat;
pub mod error;
pub mod global;
pub mod inventory;
pub mod repository;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::{AuthApi, AuthCoordinator};
pub use chat::ChatService;
pub use error::{CoreError, CoreResult};
pub use global::{GlobalState, IndicatorState, InventoryMetrics, SalesMetrics};
pub use inventory::InventoryEngine;
pub use repository::{CatalogApi, CatalogRepository};
pub use session::{CardSize, SessionError, SessionStore};
