//! REST client for the hosted backend.
//!
//! Endpoints (relative to `base_url`):
//! - `GET    /entities/{type}/schema`
//! - `GET    /entities/{type}?q=<json filters>`
//! - `POST   /entities/{type}`
//! - `PUT    /entities/{type}/{id}`
//! - `DELETE /entities/{type}/{id}`
//! - `POST   /integrations/upload-file` (multipart, field `file`)

use crate::backend::{FileStore, Filters, RecordStore, UploadedFile};
use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use portfolio_model::{Record, RecordSchema};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, warn};

/// Connection settings for [`HttpBackend`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpBackendConfig {
    /// Base URL of the backend API (e.g. `https://api.example.com/apps/portfolio`).
    pub base_url: String,
    /// Bearer token sent on every request, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for HttpBackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

/// Hosted-backend implementation of [`RecordStore`] and [`FileStore`].
pub struct HttpBackend {
    config: HttpBackendConfig,
    client: Client,
}

impl HttpBackend {
    /// Creates a client. Fails only if the TLS backend cannot be initialised
    /// or the base URL is empty.
    pub fn new(config: HttpBackendConfig) -> StoreResult<Self> {
        if config.base_url.trim().is_empty() {
            return Err(StoreError::Config("base_url must not be empty".to_string()));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StoreError::Config(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &HttpBackendConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn entity_url(&self, record_type: &str, suffix: Option<&str>) -> String {
        let base = self.url(&format!("entities/{}", urlencoding::encode(record_type)));
        match suffix {
            Some(s) => format!("{base}/{}", urlencoding::encode(s)),
            None => base,
        }
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    /// Sends a request and maps non-success statuses onto `StoreError`.
    async fn send(&self, request: RequestBuilder, what: &str) -> StoreResult<Response> {
        let response = self.authorized(request).send().await.map_err(|e| {
            warn!("Backend request failed ({what}): {e}");
            StoreError::Transport(format!("{what}: {e}"))
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        debug!("Backend answered {status} for {what}: {body}");
        match status {
            StatusCode::NOT_FOUND => Err(StoreError::NotFound(what.to_string())),
            _ => Err(StoreError::Transport(format!("{what}: HTTP {status}"))),
        }
    }

    async fn record_from(&self, response: Response) -> StoreResult<Record> {
        let value: Value = response.json().await?;
        Ok(Record::from_value(value)?)
    }
}

#[async_trait]
impl RecordStore for HttpBackend {
    fn backend_name(&self) -> &'static str {
        "http"
    }

    async fn schema(&self, record_type: &str) -> StoreResult<RecordSchema> {
        let request = self.client.get(self.entity_url(record_type, Some("schema")));
        let response = self
            .send(request, &format!("schema of {record_type}"))
            .await?;
        let value: Value = response.json().await?;
        Ok(RecordSchema::from_json(record_type, &value)?)
    }

    async fn list(&self, record_type: &str, filters: &Filters) -> StoreResult<Vec<Record>> {
        let mut request = self.client.get(self.entity_url(record_type, None));
        if !filters.is_empty() {
            let query = serde_json::to_string(filters)?;
            request = request.query(&[("q", query)]);
        }
        let response = self.send(request, &format!("list {record_type}")).await?;

        let values: Vec<Value> = response.json().await?;
        let records = values
            .into_iter()
            .map(Record::from_value)
            .collect::<Result<Vec<_>, _>>()?;
        debug!("Fetched {} {record_type} records", records.len());
        Ok(records)
    }

    async fn create(&self, record_type: &str, data: Map<String, Value>) -> StoreResult<Record> {
        let request = self
            .client
            .post(self.entity_url(record_type, None))
            .json(&data);
        let response = self.send(request, &format!("create {record_type}")).await?;
        self.record_from(response).await
    }

    async fn update(
        &self,
        record_type: &str,
        id: &str,
        data: Map<String, Value>,
    ) -> StoreResult<Record> {
        let request = self
            .client
            .put(self.entity_url(record_type, Some(id)))
            .json(&data);
        let response = self
            .send(request, &format!("{record_type} {id}"))
            .await?;
        self.record_from(response).await
    }

    async fn delete(&self, record_type: &str, id: &str) -> StoreResult<()> {
        let request = self.client.delete(self.entity_url(record_type, Some(id)));
        self.send(request, &format!("{record_type} {id}")).await?;
        Ok(())
    }
}

#[async_trait]
impl FileStore for HttpBackend {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> StoreResult<UploadedFile> {
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part("file", part);
        let request = self
            .client
            .post(self.url("integrations/upload-file"))
            .multipart(form);
        let response = self.send(request, &format!("upload {file_name}")).await?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_url_joins_without_double_slash() {
        let backend = HttpBackend::new(HttpBackendConfig {
            base_url: "http://host/api/".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            backend.entity_url("Evidence", Some("ev 1")),
            "http://host/api/entities/Evidence/ev%201"
        );
    }

    #[test]
    fn entity_url_escapes_reserved_characters() {
        let backend = HttpBackend::new(HttpBackendConfig::default()).unwrap();
        let url = backend.entity_url("a b/c", Some("Certificate_v2.1~x"));
        assert!(url.ends_with("/entities/a%20b%2Fc/Certificate_v2.1~x"));
    }
}
