//! Inventory reconciliation engine
//!
//! Merges independently fetched product and stock collections into one
//! locally filterable view: stock rows are enriched with their resolved
//! product, rows pointing at unknown products are dropped, and products
//! without any stock row get a placeholder entry so they stay visible.
//!
//! State is exposed through `watch` channels; presentation reads snapshots
//! and subscribes for changes. Every repository failure ends up as an
//! error string here, never as a propagated panic or error.

use crate::repository::CatalogApi;
use shared::models::{Category, Local, Product, StockItem};
use shared::request::{CategoryPayload, ProductPayload, StockUpsert};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::watch;

/// Sentinel local id for placeholder rows when no local is known yet.
const UNKNOWN_LOCAL_ID: i64 = -1;

fn state<T>(initial: T) -> watch::Sender<T> {
    watch::channel(initial).0
}

pub struct InventoryEngine {
    repo: Arc<dyn CatalogApi>,
    /// Reconciled cache: enriched rows plus placeholders, all locals.
    raw_stock: watch::Sender<Vec<StockItem>>,
    /// Selection-filtered projection of `raw_stock`.
    stock_items: watch::Sender<Vec<StockItem>>,
    locales: watch::Sender<Vec<Local>>,
    selected_local: watch::Sender<Option<Local>>,
    categories: watch::Sender<Vec<Category>>,
    is_loading: watch::Sender<bool>,
    is_mutating: watch::Sender<bool>,
    error: watch::Sender<Option<String>>,
    success_message: watch::Sender<Option<String>>,
}

impl InventoryEngine {
    pub fn new(repo: Arc<dyn CatalogApi>) -> Self {
        Self {
            repo,
            raw_stock: state(Vec::new()),
            stock_items: state(Vec::new()),
            locales: state(Vec::new()),
            selected_local: state(None),
            categories: state(Vec::new()),
            is_loading: state(false),
            is_mutating: state(false),
            error: state(None),
            success_message: state(None),
        }
    }

    // ============ Snapshots and subscriptions ============

    /// Filtered inventory view (selection applied, placeholders always
    /// included).
    pub fn stock_items(&self) -> Vec<StockItem> {
        self.stock_items.borrow().clone()
    }

    pub fn watch_stock_items(&self) -> watch::Receiver<Vec<StockItem>> {
        self.stock_items.subscribe()
    }

    pub fn locales(&self) -> Vec<Local> {
        self.locales.borrow().clone()
    }

    pub fn watch_locales(&self) -> watch::Receiver<Vec<Local>> {
        self.locales.subscribe()
    }

    pub fn selected_local(&self) -> Option<Local> {
        self.selected_local.borrow().clone()
    }

    pub fn watch_selected_local(&self) -> watch::Receiver<Option<Local>> {
        self.selected_local.subscribe()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.categories.borrow().clone()
    }

    pub fn watch_categories(&self) -> watch::Receiver<Vec<Category>> {
        self.categories.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        *self.is_loading.borrow()
    }

    pub fn watch_is_loading(&self) -> watch::Receiver<bool> {
        self.is_loading.subscribe()
    }

    pub fn is_mutating(&self) -> bool {
        *self.is_mutating.borrow()
    }

    pub fn watch_is_mutating(&self) -> watch::Receiver<bool> {
        self.is_mutating.subscribe()
    }

    pub fn error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    pub fn watch_error(&self) -> watch::Receiver<Option<String>> {
        self.error.subscribe()
    }

    pub fn success_message(&self) -> Option<String> {
        self.success_message.borrow().clone()
    }

    pub fn watch_success_message(&self) -> watch::Receiver<Option<String>> {
        self.success_message.subscribe()
    }

    // ============ Reload ============

    /// Full refresh: locales and categories are best-effort, products and
    /// stock are fetched concurrently and must both succeed before the
    /// reconciled cache is replaced. On a failed pair the previous cache
    /// stays untouched.
    pub async fn reload(&self) {
        self.is_loading.send_replace(true);
        self.error.send_replace(None);

        let (locales, categories, products, stock) = tokio::join!(
            self.repo.locales(),
            self.repo.categories(),
            self.repo.products(),
            self.repo.stock(),
        );

        match locales {
            Ok(list) => {
                self.locales.send_replace(list);
            }
            Err(error) => tracing::warn!(%error, "Locales fetch failed during reload"),
        }
        match categories {
            Ok(list) => {
                self.categories.send_replace(list);
            }
            Err(error) => tracing::warn!(%error, "Categories fetch failed during reload"),
        }

        match (products, stock) {
            (Ok(products), Ok(stock)) => {
                let fallback_local_id = self.fallback_local_id();
                let reconciled = reconcile(products, stock, fallback_local_id);
                self.raw_stock.send_replace(reconciled);
                self.apply_filter();
            }
            (products, stock) => {
                // Stock error wins, then product error, then the generic
                // inventory message.
                let message = stock
                    .err()
                    .map(|e| e.to_string())
                    .or_else(|| products.err().map(|e| e.to_string()))
                    .unwrap_or_else(|| "Error al cargar inventario".to_string());
                self.error.send_replace(Some(message));
            }
        }

        self.is_loading.send_replace(false);
    }

    /// Placeholder rows need a local to live in: the current selection,
    /// else the persisted default, else the first known local, else the
    /// unknown sentinel.
    fn fallback_local_id(&self) -> i64 {
        if let Some(local) = self.selected_local.borrow().as_ref() {
            return local.id;
        }
        if let Some(id) = self.repo.default_local_id() {
            return id;
        }
        if let Some(local) = self.locales.borrow().first() {
            return local.id;
        }
        UNKNOWN_LOCAL_ID
    }

    fn apply_filter(&self) {
        let selected = self.selected_local.borrow().clone();
        let raw = self.raw_stock.borrow().clone();
        self.stock_items
            .send_replace(filter_by_local(raw, selected.as_ref()));
    }

    // ============ Commands ============

    /// Selection only; the filtered view recomputes without a reload.
    pub fn select_local(&self, local: Option<Local>) {
        self.selected_local.send_replace(local);
        self.apply_filter();
    }

    pub async fn add_product(&self, nombre: &str, precio: i64, descripcion: Option<String>) {
        self.is_mutating.send_replace(true);
        let payload = ProductPayload {
            nombre: nombre.to_string(),
            precio_unitario: precio.to_string(),
            descripcion,
            categoria_id: None,
        };
        match self.repo.create_product(payload).await {
            Ok(_) => self.reload().await,
            Err(error) => {
                self.error
                    .send_replace(Some(format!("Error al crear producto: {error}")));
            }
        }
        self.is_mutating.send_replace(false);
    }

    pub async fn update_product(
        &self,
        id: i64,
        nombre: &str,
        precio: i64,
        descripcion: Option<String>,
    ) {
        self.is_mutating.send_replace(true);
        let payload = ProductPayload {
            nombre: nombre.to_string(),
            precio_unitario: precio.to_string(),
            descripcion,
            categoria_id: None,
        };
        match self.repo.update_product(id, payload).await {
            Ok(_) => self.reload().await,
            Err(error) => {
                self.error
                    .send_replace(Some(format!("Error al actualizar: {error}")));
            }
        }
        self.is_mutating.send_replace(false);
    }

    /// Server delete followed by optimistic local removal: every cached row
    /// for the product (placeholders included) is dropped without a
    /// refetch.
    pub async fn delete_product(&self, id: i64) {
        self.is_loading.send_replace(true);
        match self.repo.delete_product(id).await {
            Ok(()) => {
                self.raw_stock
                    .send_modify(|items| items.retain(|item| item.producto_id != id));
                self.apply_filter();
                self.success_message
                    .send_replace(Some("Producto eliminado correctamente".to_string()));
            }
            Err(error) => {
                self.error
                    .send_replace(Some(format!("Error al eliminar: {error}")));
            }
        }
        self.is_loading.send_replace(false);
    }

    pub async fn update_stock(
        &self,
        producto_id: i64,
        local_id: i64,
        cantidad: i64,
        cantidad_minima: i64,
    ) {
        self.is_loading.send_replace(true);
        let payload = StockUpsert {
            producto_id,
            local_id,
            cantidad,
            cantidad_minima,
        };
        match self.repo.upsert_stock(payload).await {
            Ok(()) => self.reload().await,
            Err(error) => {
                self.error
                    .send_replace(Some(format!("Error al actualizar stock: {error}")));
            }
        }
        self.is_loading.send_replace(false);
    }

    /// Category mutations refresh the category list only, not the whole
    /// inventory.
    pub async fn create_category(&self, nombre: &str, descripcion: Option<String>) {
        self.is_mutating.send_replace(true);
        let payload = CategoryPayload {
            nombre: nombre.to_string(),
            descripcion,
        };
        match self.repo.create_category(payload).await {
            Ok(_) => self.refresh_categories().await,
            Err(error) => {
                self.error
                    .send_replace(Some(format!("Error al crear categoría: {error}")));
            }
        }
        self.is_mutating.send_replace(false);
    }

    pub async fn delete_category(&self, id: i64) {
        self.is_loading.send_replace(true);
        match self.repo.delete_category(id).await {
            Ok(()) => self.refresh_categories().await,
            Err(error) => {
                self.error
                    .send_replace(Some(format!("Error al eliminar categoría: {error}")));
            }
        }
        self.is_loading.send_replace(false);
    }

    async fn refresh_categories(&self) {
        match self.repo.categories().await {
            Ok(list) => {
                self.categories.send_replace(list);
            }
            Err(error) => tracing::warn!(%error, "Category refresh failed"),
        }
    }

    pub fn clear_error(&self) {
        self.error.send_replace(None);
    }

    pub fn clear_success_message(&self) {
        self.success_message.send_replace(None);
    }
}

/// Join products and stock into the unified inventory list.
///
/// Each stock row gets the resolved product attached (replacing any
/// embedded snapshot). Rows referencing an unknown product are dropped.
/// Products with no stock row anywhere get a placeholder at
/// `fallback_local_id`. Placeholder coverage is decided against the raw
/// stock list, before orphan suppression.
fn reconcile(products: Vec<Product>, stock: Vec<StockItem>, fallback_local_id: i64) -> Vec<StockItem> {
    let covered: HashSet<i64> = stock.iter().map(|item| item.producto_id).collect();
    let by_id: HashMap<i64, &Product> = products.iter().map(|p| (p.id, p)).collect();

    let mut merged: Vec<StockItem> = stock
        .into_iter()
        .filter_map(|mut item| match by_id.get(&item.producto_id) {
            Some(product) => {
                item.producto = Some((*product).clone());
                Some(item)
            }
            // Stock left behind by a deleted product: hide it rather than
            // showing a nameless row.
            None => None,
        })
        .collect();

    for product in products {
        if !covered.contains(&product.id) {
            merged.push(StockItem::phantom(product, fallback_local_id));
        }
    }

    merged
}

/// Apply the local filter. Placeholder rows (negative ids) bypass it so
/// products with zero stock anywhere stay visible under any selection.
fn filter_by_local(items: Vec<StockItem>, local: Option<&Local>) -> Vec<StockItem> {
    match local {
        None => items,
        Some(local) => items
            .into_iter()
            .filter(|item| item.local_id == local.id || item.id < 0)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockCatalog, local, product, stock_item};

    #[tokio::test]
    async fn reload_enriches_stock_with_products() {
        let mock = MockCatalog::default()
            .with_products(vec![product(10, "Producto A")])
            .with_stock(vec![stock_item(1, 10, 3, 5, 1)])
            .with_locales(vec![local(3, "Casa Matriz")]);
        let engine = InventoryEngine::new(Arc::new(mock));

        engine.reload().await;

        let items = engine.stock_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].producto.as_ref().map(|p| p.id), Some(10));
        assert!(engine.error().is_none());
        assert!(!engine.is_loading());
    }

    #[tokio::test]
    async fn reload_drops_orphaned_stock() {
        let mock = MockCatalog::default()
            .with_products(vec![product(10, "Producto A")])
            .with_stock(vec![
                stock_item(1, 10, 3, 5, 1),
                stock_item(2, 99, 3, 4, 1), // producto 99 no longer exists
            ]);
        let engine = InventoryEngine::new(Arc::new(mock));

        engine.reload().await;

        let items = engine.stock_items();
        assert_eq!(items.len(), 1);
        assert!(items.iter().all(|item| item.producto_id != 99));
    }

    #[tokio::test]
    async fn reload_synthesizes_placeholders_for_stockless_products() {
        let mock = MockCatalog::default()
            .with_products(vec![product(10, "Producto A"), product(7, "Sin Stock")])
            .with_stock(vec![stock_item(1, 10, 3, 5, 1)])
            .with_locales(vec![local(3, "Casa Matriz")]);
        let engine = InventoryEngine::new(Arc::new(mock));

        engine.reload().await;

        let items = engine.stock_items();
        let phantoms: Vec<_> = items.iter().filter(|item| item.is_phantom()).collect();
        assert_eq!(phantoms.len(), 1);
        let phantom = phantoms[0];
        assert_eq!(phantom.id, -7);
        assert_eq!(phantom.producto_id, 7);
        assert_eq!(phantom.cantidad, 0);
        assert_eq!(phantom.min_stock, 0);
        assert_eq!(phantom.local_id, 3); // first fetched local
        assert_eq!(phantom.producto.as_ref().map(|p| p.id), Some(7));
    }

    #[tokio::test]
    async fn reload_is_idempotent_for_identical_upstream_data() {
        let mock = MockCatalog::default()
            .with_products(vec![product(10, "Producto A"), product(7, "Sin Stock")])
            .with_stock(vec![stock_item(1, 10, 3, 5, 1)])
            .with_locales(vec![local(3, "Casa Matriz")]);
        let engine = InventoryEngine::new(Arc::new(mock));

        engine.reload().await;
        let first = engine.stock_items();
        engine.reload().await;
        let second = engine.stock_items();

        assert_eq!(first, second);
        assert_eq!(second.iter().filter(|item| item.is_phantom()).count(), 1);
    }

    #[tokio::test]
    async fn placeholders_bypass_the_local_filter() {
        let mock = MockCatalog::default()
            .with_products(vec![product(10, "Producto A"), product(7, "Sin Stock")])
            .with_stock(vec![
                stock_item(1, 10, 3, 5, 1),
                stock_item(2, 10, 4, 2, 1), // other local
            ])
            .with_locales(vec![local(3, "Casa Matriz"), local(4, "Sucursal")])
            .with_default_local(3);
        let engine = InventoryEngine::new(Arc::new(mock));

        engine.reload().await;
        // Placeholder landed in local 3; select local 4 and it must remain.
        engine.select_local(Some(local(4, "Sucursal")));

        let items = engine.stock_items();
        assert_eq!(items.len(), 2);
        assert!(items.iter().any(|item| item.id == 2));
        assert!(items.iter().any(|item| item.id == -7));
    }

    #[tokio::test]
    async fn no_selection_shows_all_locals() {
        let mock = MockCatalog::default()
            .with_products(vec![product(10, "Producto A")])
            .with_stock(vec![stock_item(1, 10, 3, 5, 1), stock_item(2, 10, 4, 2, 1)]);
        let engine = InventoryEngine::new(Arc::new(mock));

        engine.reload().await;
        assert_eq!(engine.stock_items().len(), 2);

        engine.select_local(Some(local(3, "Casa Matriz")));
        assert_eq!(engine.stock_items().len(), 1);

        engine.select_local(None);
        assert_eq!(engine.stock_items().len(), 2);
    }

    #[tokio::test]
    async fn reload_failure_keeps_previous_cache_and_sets_stock_error_first() {
        let mock = MockCatalog::default()
            .with_products(vec![product(10, "Producto A")])
            .with_stock(vec![stock_item(1, 10, 3, 5, 1)]);
        let engine = InventoryEngine::new(Arc::new(mock));
        engine.reload().await;
        assert_eq!(engine.stock_items().len(), 1);

        let failing = MockCatalog::default()
            .with_products_error("Network error")
            .with_stock_error("Stock caído");
        let engine2 = InventoryEngine::new(Arc::new(failing));
        engine2.reload().await;
        assert_eq!(engine2.error().as_deref(), Some("Stock caído"));

        let failing_products = MockCatalog::default()
            .with_stock(vec![stock_item(1, 10, 3, 5, 1)])
            .with_products_error("Network error");
        let engine3 = InventoryEngine::new(Arc::new(failing_products));
        engine3.reload().await;
        assert_eq!(engine3.error().as_deref(), Some("Network error"));
        // Cache untouched on failure.
        assert!(engine3.stock_items().is_empty());
    }

    #[tokio::test]
    async fn delete_product_removes_rows_optimistically() {
        let mock = MockCatalog::default()
            .with_products(vec![product(7, "Borrar"), product(10, "Queda")])
            .with_stock(vec![stock_item(1, 10, 3, 5, 1)])
            .with_locales(vec![local(3, "Casa Matriz")]);
        let engine = InventoryEngine::new(Arc::new(mock));

        engine.reload().await;
        assert!(engine.stock_items().iter().any(|item| item.producto_id == 7));

        engine.delete_product(7).await;

        let items = engine.stock_items();
        assert!(items.iter().all(|item| item.producto_id != 7));
        assert!(items.iter().any(|item| item.producto_id == 10));
        assert_eq!(
            engine.success_message().as_deref(),
            Some("Producto eliminado correctamente")
        );
    }

    #[tokio::test]
    async fn delete_product_failure_sets_error_and_keeps_cache() {
        let mock = MockCatalog::default()
            .with_products(vec![product(7, "Producto")])
            .with_stock(vec![stock_item(1, 7, 3, 5, 1)])
            .with_delete_error("permiso denegado");
        let engine = InventoryEngine::new(Arc::new(mock));

        engine.reload().await;
        engine.delete_product(7).await;

        assert_eq!(
            engine.error().as_deref(),
            Some("Error al eliminar: permiso denegado")
        );
        assert_eq!(engine.stock_items().len(), 1);
        assert!(engine.success_message().is_none());
    }

    #[tokio::test]
    async fn add_product_triggers_full_reload() {
        let mock = MockCatalog::default()
            .with_products(vec![product(10, "Producto A")])
            .with_stock(vec![stock_item(1, 10, 3, 5, 1)]);
        let fetches = mock.product_fetch_counter();
        let engine = InventoryEngine::new(Arc::new(mock));

        engine.reload().await;
        assert_eq!(fetches.load(std::sync::atomic::Ordering::SeqCst), 1);
        engine.add_product("Nuevo", 990, None).await;
        assert_eq!(fetches.load(std::sync::atomic::Ordering::SeqCst), 2);
        assert!(!engine.is_mutating());
    }

    #[tokio::test]
    async fn add_product_failure_sets_error() {
        let mock = MockCatalog::default().with_mutation_error("nombre duplicado");
        let engine = InventoryEngine::new(Arc::new(mock));

        engine.add_product("Dup", 100, None).await;

        assert_eq!(
            engine.error().as_deref(),
            Some("Error al crear producto: nombre duplicado")
        );
    }

    #[tokio::test]
    async fn category_mutations_refresh_categories_only() {
        let mock = MockCatalog::default()
            .with_categories(vec![crate::testing::category(1, "Bebidas")])
            .with_stock(vec![stock_item(1, 10, 3, 5, 1)]);
        let engine = InventoryEngine::new(Arc::new(mock));

        engine.create_category("Snacks", None).await;

        assert_eq!(engine.categories().len(), 1);
        // No reload happened, so the stock cache is still empty.
        assert!(engine.stock_items().is_empty());
    }
}
