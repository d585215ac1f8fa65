//! HTTP gateway against the form persistence service

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::domain::record::{FormPayload, FormRecord};
use crate::ports::gateway::{FormGateway, GatewayError};

const FORMS_PATH: &str = "/api/forms";

/// Gateway speaking JSON to `{base_url}/api/forms`
#[derive(Clone, Debug)]
pub struct HttpFormGateway {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl HttpFormGateway {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, FORMS_PATH)
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}{}/{}", self.base_url, FORMS_PATH, id)
    }

    /// Map a non-success response onto a gateway error
    async fn check(resp: Response, id: Option<i64>) -> Result<Response, GatewayError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        if let (StatusCode::NOT_FOUND, Some(id)) = (status, id) {
            return Err(GatewayError::NotFound(id));
        }
        let message = match resp.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status.canonical_reason().unwrap_or("request failed").to_string(),
        };
        Err(GatewayError::Status { status: status.as_u16(), message })
    }

    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, GatewayError> {
        resp.json().await.map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

fn transport(e: reqwest::Error) -> GatewayError {
    GatewayError::Transport(e.to_string())
}

#[async_trait]
impl FormGateway for HttpFormGateway {
    async fn list(&self) -> Result<Vec<FormRecord>, GatewayError> {
        debug!(url = %self.collection_url(), "listing forms");
        let resp = self.client.get(self.collection_url()).send().await.map_err(transport)?;
        Self::decode(Self::check(resp, None).await?).await
    }

    async fn get(&self, id: i64) -> Result<FormRecord, GatewayError> {
        debug!(id, "fetching form");
        let resp = self.client.get(self.item_url(id)).send().await.map_err(transport)?;
        Self::decode(Self::check(resp, Some(id)).await?).await
    }

    async fn create(&self, payload: &FormPayload) -> Result<FormRecord, GatewayError> {
        debug!(title = %payload.title, "creating form");
        let resp = self
            .client
            .post(self.collection_url())
            .json(payload)
            .send()
            .await
            .map_err(transport)?;
        Self::decode(Self::check(resp, None).await?).await
    }

    async fn update(&self, id: i64, payload: &FormPayload) -> Result<FormRecord, GatewayError> {
        debug!(id, title = %payload.title, "updating form");
        let resp = self
            .client
            .put(self.item_url(id))
            .json(payload)
            .send()
            .await
            .map_err(transport)?;
        Self::decode(Self::check(resp, Some(id)).await?).await
    }

    async fn delete(&self, id: i64) -> Result<(), GatewayError> {
        debug!(id, "deleting form");
        let resp = self.client.delete(self.item_url(id)).send().await.map_err(transport)?;
        Self::check(resp, Some(id)).await?;
        Ok(())
    }
}
