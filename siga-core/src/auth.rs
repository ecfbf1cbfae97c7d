//! Auth coordinator - login orchestration and session persistence

use crate::error::{CoreError, CoreResult};
use crate::session::{SessionError, SessionStore};
use async_trait::async_trait;
use shared::client::LoginResponse;
use shared::models::UserRole;
use siga_client::{ApiClient, ClientResult};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Permission identifier that grants product management regardless of role.
const PERM_PRODUCTS_CREATE: &str = "PRODUCTOS_CREATE";

/// The two backend calls the login flow needs.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse>;
    async fn permissions(&self, user_id: i64, token: &str) -> ClientResult<Vec<String>>;
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        ApiClient::login(self, email, password).await
    }

    async fn permissions(&self, user_id: i64, token: &str) -> ClientResult<Vec<String>> {
        ApiClient::permissions(self, user_id, token).await
    }
}

pub struct AuthCoordinator {
    client: Arc<dyn AuthApi>,
    session: Arc<SessionStore>,
}

impl AuthCoordinator {
    pub fn new(client: Arc<dyn AuthApi>, session: Arc<SessionStore>) -> Self {
        Self { client, session }
    }

    /// Log in, persist the full session, then fetch and persist the user's
    /// permission set with the fresh token. The permission fetch is
    /// best-effort; a failure there leaves the set empty rather than
    /// failing the login.
    pub async fn login(&self, email: &str, password: &str) -> CoreResult<()> {
        let response = self.client.login(email, password).await?;

        if !response.success {
            let message = response
                .message
                .unwrap_or_else(|| "Error desconocido".to_string());
            return Err(CoreError::Auth(message));
        }

        let (token, user) = match (response.access_token.as_deref(), response.user.as_ref()) {
            (Some(token), Some(user)) => (token, user),
            _ => {
                let message = response
                    .message
                    .unwrap_or_else(|| "Error desconocido".to_string());
                return Err(CoreError::Auth(message));
            }
        };

        self.session.save_auth_session(
            token,
            user.id,
            &user.rol,
            user.nombre.as_deref(),
            user.nombre_empresa.as_deref(),
            user.local_por_defecto.as_ref().map(|local| local.id),
        )?;

        let permissions = match self.client.permissions(user.id, token).await {
            Ok(permissions) => permissions,
            Err(error) => {
                tracing::warn!(%error, user_id = user.id, "Permission fetch failed, continuing without");
                Vec::new()
            }
        };
        self.session.save_permissions(permissions)?;

        tracing::info!(user_id = user.id, rol = %user.rol, "Login succeeded");
        Ok(())
    }

    /// Logout keeps preferences and saved biometric credentials.
    pub fn logout(&self) -> Result<(), SessionError> {
        self.session.clear_auth_only()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    /// Raw role string as the backend sent it.
    pub fn user_role_raw(&self) -> Option<String> {
        self.session.user_role()
    }

    /// Normalized role.
    pub fn user_role(&self) -> Option<UserRole> {
        self.session.user_role().map(|raw| UserRole::from_raw(&raw))
    }

    pub fn permissions(&self) -> BTreeSet<String> {
        self.session.permissions()
    }

    /// Product management gate: administrators and operators are always
    /// allowed even when the backend returns an empty permission list;
    /// cashiers need the explicit permission.
    pub fn can_manage_products(&self) -> bool {
        matches!(
            self.user_role(),
            Some(UserRole::Administrador | UserRole::Operador)
        ) || self.permissions().contains(PERM_PRODUCTS_CREATE)
    }
}
