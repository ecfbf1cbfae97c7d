//! Economic indicator series (mindicador.cl)

use serde::{Deserialize, Serialize};

/// One indicator series as served by the indicator API. Only the most
/// recent point is consumed by the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSeries {
    pub version: Option<String>,
    pub autor: Option<String>,
    pub codigo: Option<String>,
    pub nombre: Option<String>,
    #[serde(rename = "unidad_medida")]
    pub unidad_medida: Option<String>,
    #[serde(default)]
    pub serie: Vec<IndicatorPoint>,
}

/// Single data point of an indicator series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPoint {
    pub fecha: String,
    pub valor: f64,
}

impl IndicatorSeries {
    /// Most recent data point. The API returns the series newest-first.
    pub fn latest(&self) -> Option<&IndicatorPoint> {
        self.serie.first()
    }
}
