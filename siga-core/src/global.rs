//! Global coordination state
//!
//! Cross-cutting app state that outlives any single screen: the known
//! locales and the active selection, the three Chilean economic
//! indicators, and the business metric summaries for the dashboard. Same
//! watch-channel shape as the inventory engine; every fetch failure lands
//! in state, never propagates.

use crate::repository::CatalogApi;
use shared::models::{IndicatorSeries, Local};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::watch;

/// Synthesized UTM value when the indicator service returns an empty
/// series.
const UTM_FALLBACK_VALUE: f64 = 66_500.0;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct IndicatorState {
    pub value: f64,
    pub unit: String,
    pub date: String,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl IndicatorState {
    fn loading() -> Self {
        Self {
            is_loading: true,
            ..Self::default()
        }
    }

    fn from_series(series: IndicatorSeries) -> Self {
        let (value, date) = series
            .latest()
            .map(|point| (point.valor, point.fecha.clone()))
            .unwrap_or_default();
        Self {
            value,
            unit: series.unidad_medida.unwrap_or_default(),
            date,
            is_loading: false,
            error: None,
        }
    }
}

/// Today's sales summary. `average_sale` is the integer average ticket,
/// zero when there were no sales.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SalesMetrics {
    pub total_today: i64,
    pub count_today: i64,
    pub average_sale: i64,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Whole-company inventory summary, all locals combined.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InventoryMetrics {
    pub product_count: usize,
    pub total_units: i64,
    pub low_stock_count: usize,
}

pub struct GlobalState {
    repo: Arc<dyn CatalogApi>,
    locales: watch::Sender<Vec<Local>>,
    selected_local: watch::Sender<Option<Local>>,
    is_loading: watch::Sender<bool>,
    dollar: watch::Sender<IndicatorState>,
    uf: watch::Sender<IndicatorState>,
    utm: watch::Sender<IndicatorState>,
    sales_metrics: watch::Sender<SalesMetrics>,
    inventory_metrics: watch::Sender<InventoryMetrics>,
}

fn state<T>(initial: T) -> watch::Sender<T> {
    watch::channel(initial).0
}

impl GlobalState {
    pub fn new(repo: Arc<dyn CatalogApi>) -> Self {
        Self {
            repo,
            locales: state(Vec::new()),
            selected_local: state(None),
            is_loading: state(false),
            dollar: state(IndicatorState::loading()),
            uf: state(IndicatorState::loading()),
            utm: state(IndicatorState::loading()),
            sales_metrics: state(SalesMetrics {
                is_loading: true,
                ..SalesMetrics::default()
            }),
            inventory_metrics: state(InventoryMetrics::default()),
        }
    }

    // ============ Snapshots and subscriptions ============

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

    pub fn is_loading(&self) -> bool {
        *self.is_loading.borrow()
    }

    pub fn dollar(&self) -> IndicatorState {
        self.dollar.borrow().clone()
    }

    pub fn watch_dollar(&self) -> watch::Receiver<IndicatorState> {
        self.dollar.subscribe()
    }

    pub fn uf(&self) -> IndicatorState {
        self.uf.borrow().clone()
    }

    pub fn watch_uf(&self) -> watch::Receiver<IndicatorState> {
        self.uf.subscribe()
    }

    pub fn utm(&self) -> IndicatorState {
        self.utm.borrow().clone()
    }

    pub fn watch_utm(&self) -> watch::Receiver<IndicatorState> {
        self.utm.subscribe()
    }

    pub fn sales_metrics(&self) -> SalesMetrics {
        self.sales_metrics.borrow().clone()
    }

    pub fn watch_sales_metrics(&self) -> watch::Receiver<SalesMetrics> {
        self.sales_metrics.subscribe()
    }

    pub fn inventory_metrics(&self) -> InventoryMetrics {
        self.inventory_metrics.borrow().clone()
    }

    pub fn watch_inventory_metrics(&self) -> watch::Receiver<InventoryMetrics> {
        self.inventory_metrics.subscribe()
    }

    // ============ Locales ============

    /// Fetch the locale list and resolve the initial selection: the
    /// persisted default if it still exists, else auto-select when there is
    /// exactly one, else leave unselected. Auto-selection goes through
    /// `select_local`, so it persists the default and refreshes derived
    /// data. A failed fetch is logged and leaves everything as it was.
    pub async fn load_locales(&self) {
        self.is_loading.send_replace(true);
        match self.repo.locales().await {
            Ok(list) => {
                self.locales.send_replace(list.clone());
                let preset = self
                    .repo
                    .default_local_id()
                    .and_then(|id| list.iter().find(|local| local.id == id).cloned());
                match preset {
                    Some(local) => self.select_local(Some(local)).await,
                    None if list.len() == 1 => self.select_local(list.first().cloned()).await,
                    None => {}
                }
            }
            Err(error) => tracing::warn!(%error, "Locale list fetch failed"),
        }
        self.is_loading.send_replace(false);
    }

    /// Change the active local, persist it as the default, and refresh all
    /// derived data.
    pub async fn select_local(&self, local: Option<Local>) {
        if let Some(local) = &local {
            self.repo.save_default_local_id(local.id);
        }
        self.selected_local.send_replace(local);
        self.refresh_all().await;
    }

    pub async fn refresh_all(&self) {
        tokio::join!(self.refresh_indicators(), self.refresh_business_metrics());
    }

    // ============ Indicators ============

    /// The three indicator fetches run concurrently; each one fails or
    /// succeeds independently.
    pub async fn refresh_indicators(&self) {
        tokio::join!(
            Self::fetch_indicator(&self.dollar, self.repo.dollar_indicator()),
            Self::fetch_indicator(&self.uf, self.repo.uf_indicator()),
            self.fetch_utm(),
        );
    }

    async fn fetch_indicator<F>(state: &watch::Sender<IndicatorState>, fetch: F)
    where
        F: Future<Output = crate::error::CoreResult<IndicatorSeries>>,
    {
        state.send_modify(|s| {
            s.is_loading = true;
            s.error = None;
        });
        match fetch.await {
            Ok(series) => {
                state.send_replace(IndicatorState::from_series(series));
            }
            Err(error) => {
                state.send_replace(IndicatorState {
                    is_loading: false,
                    error: Some(error.to_string()),
                    ..IndicatorState::default()
                });
            }
        }
    }

    /// UTM with the empty-series workaround: the upstream service
    /// intermittently returns the envelope with no data points, so an empty
    /// series is replaced with a synthesized point dated today.
    async fn fetch_utm(&self) {
        let fetch = async {
            let mut series = self.repo.utm_indicator().await?;
            if series.serie.is_empty() {
                tracing::warn!("UTM series came back empty, using fallback value");
                series = IndicatorSeries {
                    unidad_medida: Some("Pesos".to_string()),
                    serie: vec![shared::models::IndicatorPoint {
                        fecha: today(),
                        valor: UTM_FALLBACK_VALUE,
                    }],
                    ..IndicatorSeries::default()
                };
            }
            Ok(series)
        };
        Self::fetch_indicator(&self.utm, fetch).await;
    }

    // ============ Business metrics ============

    /// Sales and inventory summaries, fetched concurrently. Sales failures
    /// surface in the metrics state; stock failures only log and keep the
    /// previous summary.
    pub async fn refresh_business_metrics(&self) {
        self.sales_metrics.send_modify(|m| {
            m.is_loading = true;
            m.error = None;
        });
        let today = today();
        let (sales, stock) = tokio::join!(self.repo.sales(), self.repo.stock());

        match sales {
            Ok(sales) => {
                let mut total = 0i64;
                let mut count = 0i64;
                for sale in sales.iter().filter(|s| s.fecha.starts_with(&today)) {
                    total += sale.total;
                    count += 1;
                }
                let average = if count > 0 { total / count } else { 0 };
                self.sales_metrics.send_replace(SalesMetrics {
                    total_today: total,
                    count_today: count,
                    average_sale: average,
                    is_loading: false,
                    error: None,
                });
            }
            Err(error) => {
                tracing::error!(%error, "Sales fetch failed");
                self.sales_metrics.send_replace(SalesMetrics {
                    error: Some("Error al cargar ventas".to_string()),
                    is_loading: false,
                    ..SalesMetrics::default()
                });
            }
        }

        match stock {
            Ok(stock) => {
                // Distinct products by display identity: stock rows carry no
                // reliable product id dedup guarantee across locals, so the
                // embedded name is the key, with an id-based stand-in when
                // the product snapshot is missing.
                let distinct: HashSet<String> = stock
                    .iter()
                    .map(|item| match &item.producto {
                        Some(product) => product.nombre.clone(),
                        None => format!("ID:{}", item.producto_id),
                    })
                    .collect();
                let total_units = stock.iter().map(|item| item.cantidad).sum();
                let low_stock_count = stock.iter().filter(|item| item.is_low_stock()).count();
                self.inventory_metrics.send_replace(InventoryMetrics {
                    product_count: distinct.len(),
                    total_units,
                    low_stock_count,
                });
            }
            Err(error) => tracing::error!(%error, "Stock fetch failed for metrics"),
        }
    }
}

/// Local date as the backend formats sale timestamps.
fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
