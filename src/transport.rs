use async_trait::async_trait;

use crate::error::CacheError;
use crate::origin::{OriginRequest, OriginResponse};

/// The network transport used to fetch origin responses.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch the request and materialize the full response body as text.
    async fn fetch(&self, request: &OriginRequest) -> Result<OriginResponse, CacheError>;
}

/// HTTP transport backed by reqwest.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with a default client.
    pub fn new() -> Self {
        HttpTransport {
            client: reqwest::Client::new(),
        }
    }

    /// Create a transport around a preconfigured client (timeouts, proxies,
    /// connection pooling).
    pub fn with_client(client: reqwest::Client) -> Self {
        HttpTransport { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, request: &OriginRequest) -> Result<OriginResponse, CacheError> {
        let mut builder = self.client.get(request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| CacheError::transport(request.url.as_str(), e.to_string()))?;

        let status = response.status().as_u16();
        // Header values that are not valid UTF-8 are dropped
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = response
            .text()
            .await
            .map_err(|e| CacheError::transport(request.url.as_str(), e.to_string()))?;

        Ok(OriginResponse {
            status,
            headers,
            body,
        })
    }
}
