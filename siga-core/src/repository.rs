//! Catalog repository - token-gated access to the SaaS resources
//!
//! Thin per-resource methods, all the same shape: read the token from the
//! session store (fail fast without one), call the API client, unwrap the
//! envelope. No merging or business logic lives here; reconciliation is
//! the inventory engine's job.

use crate::error::{CoreError, CoreResult};
use crate::session::SessionStore;
use async_trait::async_trait;
use shared::models::{Category, IndicatorSeries, Local, Product, Sale, StockItem};
use shared::request::{CategoryPayload, ProductPayload, StockUpsert};
use siga_client::{ApiClient, IndicatorClient};
use std::sync::Arc;

/// Catalog seam consumed by the state engines. Implemented for real by
/// [`CatalogRepository`]; tests substitute mocks.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn products(&self) -> CoreResult<Vec<Product>>;
    async fn stock(&self) -> CoreResult<Vec<StockItem>>;
    async fn sales(&self) -> CoreResult<Vec<Sale>>;
    async fn locales(&self) -> CoreResult<Vec<Local>>;
    async fn categories(&self) -> CoreResult<Vec<Category>>;

    async fn create_product(&self, payload: ProductPayload) -> CoreResult<Product>;
    async fn update_product(&self, id: i64, payload: ProductPayload) -> CoreResult<Product>;
    async fn delete_product(&self, id: i64) -> CoreResult<()>;
    async fn create_category(&self, payload: CategoryPayload) -> CoreResult<Category>;
    async fn delete_category(&self, id: i64) -> CoreResult<()>;
    async fn upsert_stock(&self, payload: StockUpsert) -> CoreResult<()>;

    async fn dollar_indicator(&self) -> CoreResult<IndicatorSeries>;
    async fn uf_indicator(&self) -> CoreResult<IndicatorSeries>;
    async fn utm_indicator(&self) -> CoreResult<IndicatorSeries>;

    fn default_local_id(&self) -> Option<i64>;
    fn save_default_local_id(&self, local_id: i64);
}

pub struct CatalogRepository {
    client: Arc<ApiClient>,
    indicators: IndicatorClient,
    session: Arc<SessionStore>,
}

impl CatalogRepository {
    pub fn new(
        client: Arc<ApiClient>,
        indicators: IndicatorClient,
        session: Arc<SessionStore>,
    ) -> Self {
        Self {
            client,
            indicators,
            session,
        }
    }

    /// Read the token fresh for each outgoing call.
    fn token(&self) -> CoreResult<String> {
        self.session
            .access_token()
            .filter(|token| !token.is_empty())
            .ok_or(CoreError::NoSession)
    }
}

#[async_trait]
impl CatalogApi for CatalogRepository {
    async fn products(&self) -> CoreResult<Vec<Product>> {
        let token = self.token()?;
        Ok(self.client.products(&token).await?)
    }

    async fn stock(&self) -> CoreResult<Vec<StockItem>> {
        let token = self.token()?;
        Ok(self.client.stock(&token).await?)
    }

    async fn sales(&self) -> CoreResult<Vec<Sale>> {
        let token = self.token()?;
        Ok(self.client.sales(&token).await?)
    }

    async fn locales(&self) -> CoreResult<Vec<Local>> {
        let token = self.token()?;
        Ok(self.client.locales(&token).await?)
    }

    async fn categories(&self) -> CoreResult<Vec<Category>> {
        let token = self.token()?;
        Ok(self.client.categories(&token).await?)
    }

    async fn create_product(&self, payload: ProductPayload) -> CoreResult<Product> {
        let token = self.token()?;
        Ok(self.client.create_product(&payload, &token).await?)
    }

    async fn update_product(&self, id: i64, payload: ProductPayload) -> CoreResult<Product> {
        let token = self.token()?;
        Ok(self.client.update_product(id, &payload, &token).await?)
    }

    async fn delete_product(&self, id: i64) -> CoreResult<()> {
        let token = self.token()?;
        Ok(self.client.delete_product(id, &token).await?)
    }

    async fn create_category(&self, payload: CategoryPayload) -> CoreResult<Category> {
        let token = self.token()?;
        Ok(self.client.create_category(&payload, &token).await?)
    }

    async fn delete_category(&self, id: i64) -> CoreResult<()> {
        let token = self.token()?;
        Ok(self.client.delete_category(id, &token).await?)
    }

    async fn upsert_stock(&self, payload: StockUpsert) -> CoreResult<()> {
        let token = self.token()?;
        Ok(self.client.upsert_stock(&payload, &token).await?)
    }

    async fn dollar_indicator(&self) -> CoreResult<IndicatorSeries> {
        Ok(self.indicators.dollar().await?)
    }

    async fn uf_indicator(&self) -> CoreResult<IndicatorSeries> {
        Ok(self.indicators.uf().await?)
    }

    async fn utm_indicator(&self) -> CoreResult<IndicatorSeries> {
        Ok(self.indicators.utm().await?)
    }

    fn default_local_id(&self) -> Option<i64> {
        self.session.default_local_id()
    }

    fn save_default_local_id(&self, local_id: i64) {
        if let Err(error) = self.session.save_default_local_id(Some(local_id)) {
            tracing::warn!(%error, local_id, "Failed to persist default local");
        }
    }
}
