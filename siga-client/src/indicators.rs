//! Economic indicator client (mindicador.cl)
//!
//! Three unauthenticated GETs against a public indicator API. Kept on a
//! separate client because it talks to a different host than the backend.

use crate::{ClientConfig, ClientResult};
use reqwest::Client;
use shared::models::IndicatorSeries;

#[derive(Debug, Clone)]
pub struct IndicatorClient {
    client: Client,
    base_url: String,
}

impl IndicatorClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.indicators_url.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch(&self, code: &str) -> ClientResult<IndicatorSeries> {
        let url = format!("{}/{}", self.base_url, code);
        let response = self.client.get(&url).send().await?;
        let series = response.error_for_status()?.json().await?;
        Ok(series)
    }

    /// Observed dollar exchange rate series.
    pub async fn dollar(&self) -> ClientResult<IndicatorSeries> {
        self.fetch("dolar").await
    }

    /// UF (inflation-indexed unit) series.
    pub async fn uf(&self) -> ClientResult<IndicatorSeries> {
        self.fetch("uf").await
    }

    /// UTM (monthly tax unit) series.
    pub async fn utm(&self) -> ClientResult<IndicatorSeries> {
        self.fetch("utm").await
    }
}
