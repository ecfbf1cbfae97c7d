//! Chat assistant passthrough

use crate::error::{CoreError, CoreResult};
use crate::session::SessionStore;
use siga_client::ApiClient;
use std::sync::Arc;

pub struct ChatService {
    client: Arc<ApiClient>,
    session: Arc<SessionStore>,
}

impl ChatService {
    pub fn new(client: Arc<ApiClient>, session: Arc<SessionStore>) -> Self {
        Self { client, session }
    }

    /// Send a message and return the assistant's reply text.
    pub async fn send_message(&self, message: &str) -> CoreResult<String> {
        let token = self.session.access_token().ok_or(CoreError::NoSession)?;
        let response = self.client.chat(message, &token).await?;
        Ok(response
            .response
            .or(response.message)
            .unwrap_or_else(|| "Respuesta sin contenido".to_string()))
    }
}
