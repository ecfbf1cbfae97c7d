//! Shared test fixtures: an in-memory [`CatalogApi`] and model builders.

use crate::error::{CoreError, CoreResult};
use crate::repository::CatalogApi;
use async_trait::async_trait;
use shared::models::{Category, IndicatorPoint, IndicatorSeries, Local, Product, Sale, StockItem};
use shared::request::{CategoryPayload, ProductPayload, StockUpsert};
use siga_client::ClientError;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

fn api_error(message: &str) -> CoreError {
    CoreError::Client(ClientError::Api(message.to_string()))
}

/// Canned-data catalog. Builder methods set the data; `with_*_error`
/// switches make individual resources fail with an API error.
#[derive(Default)]
pub(crate) struct MockCatalog {
    products: Vec<Product>,
    stock: Vec<StockItem>,
    sales: Vec<Sale>,
    locales: Vec<Local>,
    categories: Vec<Category>,
    dollar: IndicatorSeries,
    uf: IndicatorSeries,
    utm: IndicatorSeries,
    products_error: Option<String>,
    stock_error: Option<String>,
    sales_error: Option<String>,
    delete_error: Option<String>,
    mutation_error: Option<String>,
    indicators_error: Option<String>,
    default_local: Mutex<Option<i64>>,
    product_fetches: Arc<AtomicU32>,
}

impl MockCatalog {
    pub(crate) fn with_products(mut self, products: Vec<Product>) -> Self {
        self.products = products;
        self
    }

    pub(crate) fn with_stock(mut self, stock: Vec<StockItem>) -> Self {
        self.stock = stock;
        self
    }

    pub(crate) fn with_sales(mut self, sales: Vec<Sale>) -> Self {
        self.sales = sales;
        self
    }

    pub(crate) fn with_locales(mut self, locales: Vec<Local>) -> Self {
        self.locales = locales;
        self
    }

    pub(crate) fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    pub(crate) fn with_dollar(mut self, series: IndicatorSeries) -> Self {
        self.dollar = series;
        self
    }

    pub(crate) fn with_uf(mut self, series: IndicatorSeries) -> Self {
        self.uf = series;
        self
    }

    pub(crate) fn with_utm(mut self, series: IndicatorSeries) -> Self {
        self.utm = series;
        self
    }

    pub(crate) fn with_products_error(mut self, message: &str) -> Self {
        self.products_error = Some(message.to_string());
        self
    }

    pub(crate) fn with_stock_error(mut self, message: &str) -> Self {
        self.stock_error = Some(message.to_string());
        self
    }

    pub(crate) fn with_sales_error(mut self, message: &str) -> Self {
        self.sales_error = Some(message.to_string());
        self
    }

    pub(crate) fn with_delete_error(mut self, message: &str) -> Self {
        self.delete_error = Some(message.to_string());
        self
    }

    pub(crate) fn with_mutation_error(mut self, message: &str) -> Self {
        self.mutation_error = Some(message.to_string());
        self
    }

    pub(crate) fn with_indicators_error(mut self, message: &str) -> Self {
        self.indicators_error = Some(message.to_string());
        self
    }

    pub(crate) fn with_default_local(self, id: i64) -> Self {
        *self.default_local.lock().unwrap() = Some(id);
        self
    }

    /// Handle for asserting how many times `products()` ran; grab it
    /// before moving the mock into an `Arc<dyn CatalogApi>`.
    pub(crate) fn product_fetch_counter(&self) -> Arc<AtomicU32> {
        Arc::clone(&self.product_fetches)
    }
}

#[async_trait]
impl CatalogApi for MockCatalog {
    async fn products(&self) -> CoreResult<Vec<Product>> {
        self.product_fetches.fetch_add(1, Ordering::SeqCst);
        match &self.products_error {
            Some(message) => Err(api_error(message)),
            None => Ok(self.products.clone()),
        }
    }

    async fn stock(&self) -> CoreResult<Vec<StockItem>> {
        match &self.stock_error {
            Some(message) => Err(api_error(message)),
            None => Ok(self.stock.clone()),
        }
    }

    async fn sales(&self) -> CoreResult<Vec<Sale>> {
        match &self.sales_error {
            Some(message) => Err(api_error(message)),
            None => Ok(self.sales.clone()),
        }
    }

    async fn locales(&self) -> CoreResult<Vec<Local>> {
        Ok(self.locales.clone())
    }

    async fn categories(&self) -> CoreResult<Vec<Category>> {
        Ok(self.categories.clone())
    }

    async fn create_product(&self, payload: ProductPayload) -> CoreResult<Product> {
        match &self.mutation_error {
            Some(message) => Err(api_error(message)),
            None => Ok(Product {
                id: 1000,
                nombre: payload.nombre,
                descripcion: payload.descripcion,
                precio_unitario: Some(payload.precio_unitario),
                precio: None,
                activo: true,
                codigo: None,
            }),
        }
    }

    async fn update_product(&self, id: i64, payload: ProductPayload) -> CoreResult<Product> {
        match &self.mutation_error {
            Some(message) => Err(api_error(message)),
            None => Ok(Product {
                id,
                nombre: payload.nombre,
                descripcion: payload.descripcion,
                precio_unitario: Some(payload.precio_unitario),
                precio: None,
                activo: true,
                codigo: None,
            }),
        }
    }

    async fn delete_product(&self, _id: i64) -> CoreResult<()> {
        match &self.delete_error {
            Some(message) => Err(api_error(message)),
            None => Ok(()),
        }
    }

    async fn create_category(&self, payload: CategoryPayload) -> CoreResult<Category> {
        match &self.mutation_error {
            Some(message) => Err(api_error(message)),
            None => Ok(Category {
                id: 500,
                nombre: payload.nombre,
                descripcion: payload.descripcion,
            }),
        }
    }

    async fn delete_category(&self, _id: i64) -> CoreResult<()> {
        match &self.delete_error {
            Some(message) => Err(api_error(message)),
            None => Ok(()),
        }
    }

    async fn upsert_stock(&self, _payload: StockUpsert) -> CoreResult<()> {
        match &self.mutation_error {
            Some(message) => Err(api_error(message)),
            None => Ok(()),
        }
    }

    async fn dollar_indicator(&self) -> CoreResult<IndicatorSeries> {
        match &self.indicators_error {
            Some(message) => Err(api_error(message)),
            None => Ok(self.dollar.clone()),
        }
    }

    async fn uf_indicator(&self) -> CoreResult<IndicatorSeries> {
        match &self.indicators_error {
            Some(message) => Err(api_error(message)),
            None => Ok(self.uf.clone()),
        }
    }

    async fn utm_indicator(&self) -> CoreResult<IndicatorSeries> {
        match &self.indicators_error {
            Some(message) => Err(api_error(message)),
            None => Ok(self.utm.clone()),
        }
    }

    fn default_local_id(&self) -> Option<i64> {
        *self.default_local.lock().unwrap()
    }

    fn save_default_local_id(&self, local_id: i64) {
        *self.default_local.lock().unwrap() = Some(local_id);
    }
}

// ============ Model builders ============

pub(crate) fn product(id: i64, nombre: &str) -> Product {
    Product {
        id,
        nombre: nombre.to_string(),
        descripcion: None,
        precio_unitario: Some("1000".to_string()),
        precio: None,
        activo: true,
        codigo: None,
    }
}

pub(crate) fn stock_item(
    id: i64,
    producto_id: i64,
    local_id: i64,
    cantidad: i64,
    min_stock: i64,
) -> StockItem {
    StockItem {
        id,
        producto_id,
        local_id,
        cantidad,
        min_stock,
        producto: None,
    }
}

pub(crate) fn local(id: i64, nombre: &str) -> Local {
    Local {
        id,
        nombre: nombre.to_string(),
        direccion: None,
        ciudad: None,
    }
}

pub(crate) fn category(id: i64, nombre: &str) -> Category {
    Category {
        id,
        nombre: nombre.to_string(),
        descripcion: None,
    }
}

pub(crate) fn sale(id: i64, fecha: &str, total: i64, items: i64) -> Sale {
    Sale {
        id,
        fecha: fecha.to_string(),
        total,
        items,
        local_id: 3,
        local_nombre: None,
    }
}

pub(crate) fn series(code: &str, unit: &str, fecha: &str, valor: f64) -> IndicatorSeries {
    IndicatorSeries {
        version: None,
        autor: None,
        codigo: Some(code.to_string()),
        nombre: None,
        unidad_medida: Some(unit.to_string()),
        serie: vec![IndicatorPoint {
            fecha: fecha.to_string(),
            valor,
        }],
    }
}
