//! Auth and chat wire types

use crate::models::Local;
use serde::{Deserialize, Serialize};

/// Login credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(rename = "accessToken")]
    pub access_token: Option<String>,
    #[serde(rename = "refreshToken")]
    pub refresh_token: Option<String>,
    pub user: Option<User>,
    pub message: Option<String>,
}

/// Authenticated user payload embedded in the login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    /// Raw role string; see `models::UserRole` for normalization.
    pub rol: String,
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    #[serde(rename = "nombreEmpresa")]
    pub nombre_empresa: Option<String>,
    #[serde(rename = "localPorDefecto")]
    pub local_por_defecto: Option<Local>,
}

/// Chat assistant request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Chat assistant response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub success: bool,
    /// Some backend builds misspell the success flag.
    pub succes: Option<bool>,
    pub response: Option<String>,
    pub message: Option<String>,
    pub action: Option<ChatAction>,
}

/// Action the chat backend may attach to a reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatAction {
    #[serde(default)]
    pub executed: bool,
    #[serde(rename = "type")]
    pub action_type: Option<String>,
    pub data: Option<String>,
    #[serde(rename = "requiresConfirmation", default)]
    pub requires_confirmation: bool,
}
