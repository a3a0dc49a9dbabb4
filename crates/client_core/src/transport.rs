//! HTTP collaborator used by [`PagesClient`](crate::PagesClient).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use url::Url;

use crate::error::{ConfigError, TransportError};

/// Performs one request and returns the decoded JSON body.
///
/// An empty success body is returned as `Value::Null`.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: Url) -> Result<Value, TransportError>;
    async fn put(&self, url: Url, body: Value) -> Result<Value, TransportError>;
    async fn delete(&self, url: Url) -> Result<Value, TransportError>;
}

#[derive(Clone, Default)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, ConfigError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ConfigError::HttpClient(err.to_string()))?;
        Ok(Self { http })
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Value, TransportError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::from_status(status.as_u16(), &body));
        }

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|err| TransportError::Decode(err.to_string()))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: Url) -> Result<Value, TransportError> {
        self.execute(self.http.get(url)).await
    }

    async fn put(&self, url: Url, body: Value) -> Result<Value, TransportError> {
        self.execute(self.http.put(url).json(&body)).await
    }

    async fn delete(&self, url: Url) -> Result<Value, TransportError> {
        self.execute(self.http.delete(url)).await
    }
}
