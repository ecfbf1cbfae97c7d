//! HTTP client for the SIGA backend
//!
//! One method per endpoint, all following the same shape: build the
//! request, attach the bearer token, decode the typed envelope. The token
//! is passed per call so every request reads the freshest session state.

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::client::{ChatRequest, ChatResponse, LoginRequest, LoginResponse};
use shared::models::{Category, Local, Product, Sale, StockItem};
use shared::request::{CategoryPayload, ProductPayload, StockUpsert};
use shared::response::{
    CategoryListResponse, CategoryResponse, LocalListResponse, PermissionListResponse,
    ProductListResponse, ProductResponse, SalesListResponse, StockListResponse,
};

/// Error body convention: non-2xx responses carry `{ "message": ... }`.
#[derive(serde::Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// Extract the user-facing message from a non-2xx body. A parseable JSON
/// body without a message yields the generic unknown-error string; an
/// unparseable body yields the connection-error string.
fn parse_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => parsed
            .message
            .unwrap_or_else(|| "Error desconocido".to_string()),
        Err(_) => "Error de conexión".to_string(),
    }
}

/// Typed client for the SIGA SaaS API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Backend base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::debug!(%status, "API call failed");
            return Err(ClientError::Api(parse_error_message(&text)));
        }
        Ok(response.json().await?)
    }

    /// Like `handle_response`, but the success body is discarded.
    async fn handle_empty(response: reqwest::Response) -> ClientResult<()> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::debug!(%status, "API call failed");
            return Err(ClientError::Api(parse_error_message(&text)));
        }
        Ok(())
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, token: &str) -> ClientResult<T> {
        let response = self
            .client
            .get(self.url(path))
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {token}"))
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        token: &str,
    ) -> ClientResult<T> {
        let response = self
            .client
            .post(self.url(path))
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {token}"))
            .json(body)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        token: &str,
    ) -> ClientResult<T> {
        let response = self
            .client
            .put(self.url(path))
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {token}"))
            .json(body)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn delete(&self, path: &str, token: &str) -> ClientResult<()> {
        let response = self
            .client
            .delete(self.url(path))
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {token}"))
            .send()
            .await?;
        Self::handle_empty(response).await
    }

    // ============ Auth ============

    /// Exchange credentials for a token + user payload. The only
    /// unauthenticated backend call.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&request)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    pub async fn permissions(&self, user_id: i64, token: &str) -> ClientResult<Vec<String>> {
        let response: PermissionListResponse = self
            .get(&format!("/api/saas/usuarios/{user_id}/permisos"), token)
            .await?;
        Ok(response.permisos)
    }

    // ============ Catalog ============

    pub async fn products(&self, token: &str) -> ClientResult<Vec<Product>> {
        let response: ProductListResponse = self.get("/api/saas/productos", token).await?;
        Ok(response.productos)
    }

    pub async fn create_product(
        &self,
        payload: &ProductPayload,
        token: &str,
    ) -> ClientResult<Product> {
        let response: ProductResponse = self.post("/api/saas/productos", payload, token).await?;
        Ok(response.producto)
    }

    pub async fn update_product(
        &self,
        id: i64,
        payload: &ProductPayload,
        token: &str,
    ) -> ClientResult<Product> {
        let response: ProductResponse = self
            .put(&format!("/api/saas/productos/{id}"), payload, token)
            .await?;
        Ok(response.producto)
    }

    pub async fn delete_product(&self, id: i64, token: &str) -> ClientResult<()> {
        self.delete(&format!("/api/saas/productos/{id}"), token)
            .await
    }

    pub async fn stock(&self, token: &str) -> ClientResult<Vec<StockItem>> {
        let response: StockListResponse = self.get("/api/saas/stock", token).await?;
        Ok(response.stock)
    }

    pub async fn upsert_stock(&self, payload: &StockUpsert, token: &str) -> ClientResult<()> {
        let response = self
            .client
            .post(self.url("/api/saas/stock"))
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {token}"))
            .json(payload)
            .send()
            .await?;
        Self::handle_empty(response).await
    }

    pub async fn sales(&self, token: &str) -> ClientResult<Vec<Sale>> {
        let response: SalesListResponse = self.get("/api/saas/ventas", token).await?;
        Ok(response.ventas)
    }

    pub async fn categories(&self, token: &str) -> ClientResult<Vec<Category>> {
        let response: CategoryListResponse = self.get("/api/saas/categorias", token).await?;
        Ok(response.categorias)
    }

    pub async fn create_category(
        &self,
        payload: &CategoryPayload,
        token: &str,
    ) -> ClientResult<Category> {
        let response: CategoryResponse = self.post("/api/saas/categorias", payload, token).await?;
        Ok(response.categoria)
    }

    pub async fn delete_category(&self, id: i64, token: &str) -> ClientResult<()> {
        self.delete(&format!("/api/saas/categorias/{id}"), token)
            .await
    }

    pub async fn locales(&self, token: &str) -> ClientResult<Vec<Local>> {
        let response: LocalListResponse = self.get("/api/saas/locales", token).await?;
        Ok(response.locales)
    }

    // ============ Chat ============

    pub async fn chat(&self, message: &str, token: &str) -> ClientResult<ChatResponse> {
        let request = ChatRequest {
            message: message.to_string(),
        };
        self.post("/api/saas/chat", &request, token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_taken_verbatim_from_body() {
        assert_eq!(
            parse_error_message(r#"{"success":false,"message":"Token inválido"}"#),
            "Token inválido"
        );
    }

    #[test]
    fn json_body_without_message_yields_unknown_error() {
        assert_eq!(parse_error_message(r#"{"success":false}"#), "Error desconocido");
    }

    #[test]
    fn unparseable_body_yields_connection_error() {
        assert_eq!(parse_error_message("<html>502</html>"), "Error de conexión");
        assert_eq!(parse_error_message(""), "Error de conexión");
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let client = ApiClient::new(&ClientConfig::new("http://localhost:3000/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.url("/api/saas/stock"), "http://localhost:3000/api/saas/stock");
    }
}
