//! Sale Model

use serde::{Deserialize, Serialize};

/// Sale record as listed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: i64,
    /// ISO-ish date string (`2026-08-28` or `2026-08-28T14:03:00`).
    pub fecha: String,
    /// Total amount in whole pesos.
    pub total: i64,
    pub items: i64,
    pub local_id: i64,
    pub local_nombre: Option<String>,
}
