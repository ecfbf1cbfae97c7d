//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Display sentinel when no price can be resolved.
pub const NO_PRICE_DISPLAY: &str = "Sin precio";

/// Product entity.
///
/// Newer backend versions send the unit price as a string
/// (`precioUnitario`) to avoid float drift; older tenants still send an
/// integer `precio`. Both are kept and resolved lazily.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub nombre: String,
    pub descripcion: Option<String>,
    #[serde(rename = "precioUnitario")]
    pub precio_unitario: Option<String>,
    pub precio: Option<i64>,
    /// Soft delete flag
    #[serde(default = "default_true")]
    pub activo: bool,
    pub codigo: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Product {
    /// Resolve the unit price: textual field first (comma decimal separator
    /// normalized to dot), integer field second, `None` when neither parses.
    pub fn unit_price(&self) -> Option<Decimal> {
        if let Some(raw) = &self.precio_unitario {
            let normalized = raw.trim().replace(',', ".");
            if let Ok(value) = Decimal::from_str(&normalized) {
                return Some(value);
            }
        }
        self.precio.map(Decimal::from)
    }

    /// Whole-peso price used by forms that edit prices as integers.
    pub fn unit_price_int(&self) -> i64 {
        self.precio_unitario
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .or(self.precio)
            .unwrap_or(0)
    }

    /// Chilean-peso display string (`$12.500`, no decimals), or the
    /// "Sin precio" sentinel when no price resolves.
    pub fn price_display(&self) -> String {
        match self.unit_price() {
            Some(value) => format!("${}", group_thousands(value.round())),
            None => NO_PRICE_DISPLAY.to_string(),
        }
    }
}

/// Format a zero-scale decimal with `.` thousands separators (es-CL style).
fn group_thousands(value: Decimal) -> String {
    let raw = value.to_string();
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}")
}
