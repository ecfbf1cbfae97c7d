//! Response envelopes
//!
//! Every list endpoint wraps its payload in `{ success, <resource>: [...] }`
//! with the list field absent on some error shapes, so all list fields
//! default to empty.

use crate::models::{Category, Local, Product, Sale, StockItem};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductListResponse {
    pub success: bool,
    #[serde(default)]
    pub productos: Vec<Product>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockListResponse {
    pub success: bool,
    #[serde(default)]
    pub stock: Vec<StockItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesListResponse {
    pub success: bool,
    #[serde(default)]
    pub ventas: Vec<Sale>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryListResponse {
    pub success: bool,
    #[serde(default)]
    pub categorias: Vec<Category>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalListResponse {
    pub success: bool,
    #[serde(default)]
    pub locales: Vec<Local>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionListResponse {
    pub success: bool,
    #[serde(default)]
    pub permisos: Vec<String>,
}

/// Single-product mutation envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductResponse {
    pub success: bool,
    pub producto: Product,
}

/// Single-category mutation envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub success: bool,
    pub categoria: Category,
}
