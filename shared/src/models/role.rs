//! Role Model

use serde::{Deserialize, Serialize};

/// Normalized user role.
///
/// The backend sends free-form role strings; the client collapses them
/// case-insensitively into this closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Administrador,
    Operador,
    Cajero,
}

impl UserRole {
    /// Normalize a raw backend role string. Unrecognized roles map to
    /// `Operador`.
    pub fn from_raw(raw: &str) -> Self {
        let upper = raw.to_uppercase();
        if upper.contains("ADMIN") {
            UserRole::Administrador
        } else if upper.contains("CAJERO") {
            UserRole::Cajero
        } else {
            UserRole::Operador
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Administrador => "ADMINISTRADOR",
            UserRole::Operador => "OPERADOR",
            UserRole::Cajero => "CAJERO",
        }
    }
}
