//! Sending field updates to the API.

use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use meditrack_core::RecordId;

use crate::config::EditorConfig;
use meditrack_inventory::{Field, InventoryRecord, RecordKind};

/// Body of an update response. `formatted_value` is ignored; the editor
/// derives display text itself.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateReply {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl UpdateReply {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({0}): {1}")]
    Status(u16, String),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("no response within {0:?}")]
    Timeout(Duration),
}

/// Delivers one field update and returns the server's verdict.
pub trait UpdateTransport: Send + Sync {
    fn send(
        &self,
        kind: RecordKind,
        record_id: RecordId,
        field: Field,
        value: &str,
    ) -> impl Future<Output = Result<UpdateReply, TransportError>> + Send;
}

/// `reqwest`-backed transport posting form-encoded `field`/`value` pairs.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Transport pointed at the API root named in `config`.
    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.base_url.as_str())
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check connectivity by hitting the health endpoint.
    pub async fn check_connectivity(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        matches!(self.client.get(&url).send().await, Ok(r) if r.status().is_success())
    }

    /// Load every record of `kind` for building a table.
    pub async fn fetch_records(
        &self,
        kind: RecordKind,
    ) -> Result<Vec<InventoryRecord>, TransportError> {
        let url = format!("{}/inventory/{}", self.base_url, kind);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            return Err(TransportError::Status(status, resp.text().await.unwrap_or_default()));
        }

        resp.json()
            .await
            .map_err(|e| TransportError::Malformed(e.to_string()))
    }
}

impl UpdateTransport for HttpTransport {
    async fn send(
        &self,
        kind: RecordKind,
        record_id: RecordId,
        field: Field,
        value: &str,
    ) -> Result<UpdateReply, TransportError> {
        let url = format!("{}/inventory/{}/{}/update", self.base_url, kind, record_id);
        let resp = self
            .client
            .post(&url)
            .form(&[("field", field.as_str()), ("value", value)])
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            return Err(TransportError::Status(status, resp.text().await.unwrap_or_default()));
        }

        let text = resp
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| TransportError::Malformed(e.to_string()))
    }
}
