//! HTTP client for the graph server.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::protocol::{GraphRequest, NeighborResponse, ServerError, StartResponse};
use super::ProviderError;
use crate::storage::config::ServerSettings;
use crate::world::geo::Coordinate;

/// Source of round start data and neighbor edges.
#[async_trait]
pub trait NeighborProvider: Send + Sync {
    /// Start node, optional goal and the first neighbor set.
    async fn fetch_start(&self) -> Result<StartResponse, ProviderError>;

    /// Neighbor edges leaving `current`.
    async fn fetch_neighbors(&self, current: Coordinate) -> Result<NeighborResponse, ProviderError>;
}

/// [`NeighborProvider`] speaking JSON over HTTP `POST`.
pub struct HttpNeighborProvider {
    client: reqwest::Client,
    url: String,
}

impl HttpNeighborProvider {
    /// Create a client posting to `base_url` + `endpoint`.
    pub fn new(base_url: &str, endpoint: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(Self {
            client,
            url: join_url(base_url, endpoint),
        })
    }

    /// Create from the `[server]` config section.
    pub fn from_settings(settings: &ServerSettings) -> Result<Self, ProviderError> {
        Self::new(
            &settings.base_url,
            &settings.endpoint,
            Duration::from_secs(settings.timeout_secs.max(1)),
        )
    }

    /// Full request URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn post<R: DeserializeOwned>(&self, request: &GraphRequest) -> Result<R, ProviderError> {
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout
                } else {
                    ProviderError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ServerError>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(ProviderError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        serde_json::from_str(&body).map_err(|e| ProviderError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl NeighborProvider for HttpNeighborProvider {
    async fn fetch_start(&self) -> Result<StartResponse, ProviderError> {
        self.post(&GraphRequest::Start).await
    }

    async fn fetch_neighbors(&self, current: Coordinate) -> Result<NeighborResponse, ProviderError> {
        self.post(&GraphRequest::Neighbours { current }).await
    }
}

fn join_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}
