//! Category Model

use serde::{Deserialize, Serialize};

/// Category entity. Product association is handled backend-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub nombre: String,
    pub descripcion: Option<String>,
}
