//! Local (branch/store) Model

use serde::{Deserialize, Serialize};

/// Physical branch the tenant operates. Stock and sales are scoped to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Local {
    pub id: i64,
    pub nombre: String,
    pub direccion: Option<String>,
    pub ciudad: Option<String>,
}
