//! Stock Model

use super::product::Product;
use serde::{Deserialize, Serialize};

/// Stock row for one product at one local.
///
/// Rows coming from the backend have positive IDs. The inventory engine
/// also synthesizes placeholder rows (negative IDs) for products without
/// any stock record, so every product stays visible in inventory views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    pub id: i64,
    pub producto_id: i64,
    pub local_id: i64,
    pub cantidad: i64,
    pub min_stock: i64,
    /// Embedded product snapshot, when the backend nests it.
    pub producto: Option<Product>,
}

impl StockItem {
    /// Low-stock rule: at or below the minimum counts as low.
    pub fn is_low_stock(&self) -> bool {
        self.cantidad <= self.min_stock
    }

    /// True for synthesized placeholder rows.
    pub fn is_phantom(&self) -> bool {
        self.id < 0
    }

    /// Placeholder row for a product with no stock record anywhere. The id
    /// is the negated product id so it cannot collide with real rows.
    pub fn phantom(product: Product, local_id: i64) -> Self {
        Self {
            id: -product.id,
            producto_id: product.id,
            local_id,
            cantidad: 0,
            min_stock: 0,
            producto: Some(product),
        }
    }
}
