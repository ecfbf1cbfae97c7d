//! Mutation request payloads

use serde::{Deserialize, Serialize};

/// Create/update product payload. The backend expects the price as a
/// string, not an integer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPayload {
    pub nombre: String,
    #[serde(rename = "precioUnitario")]
    pub precio_unitario: String,
    pub descripcion: Option<String>,
    pub categoria_id: Option<i64>,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryPayload {
    pub nombre: String,
    pub descripcion: Option<String>,
}

/// Stock quantity upsert payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockUpsert {
    #[serde(rename = "productoId")]
    pub producto_id: i64,
    #[serde(rename = "localId")]
    pub local_id: i64,
    pub cantidad: i64,
    #[serde(rename = "cantidadMinima")]
    pub cantidad_minima: i64,
}
