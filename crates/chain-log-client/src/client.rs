//! HTTP client for the chain log API.

use crate::error::Error;
use crate::types::*;
use reqwest::{Client, StatusCode};
use std::time::Duration;

#[cfg(test)]
mod tests;

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API (e.g., "http://localhost:8080").
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP client for the Chain Volume Log API.
#[derive(Debug, Clone)]
pub struct ChainLogClient {
    client: Client,
    base_url: String,
}

impl ChainLogClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Creates a new client with default configuration.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::new(ClientConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        })
    }

    /// Returns the base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Performs a health check.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn health_check(&self) -> Result<HealthResponse, Error> {
        let url = format!("{}/health", self.base_url);
        let resp = self.client.get(&url).send().await?;
        self.handle_response(resp).await
    }

    /// Records an observation and returns the stored record.
    ///
    /// # Errors
    /// Returns [`Error::Api`] with the server's failure details when the
    /// append fails, or a transport error.
    pub async fn record_observation(
        &self,
        params: &ObservationParams,
    ) -> Result<EventRecord, Error> {
        let url = self.observations_url(params)?;
        let resp = self.client.post(&url).send().await?;
        self.handle_response(resp).await
    }

    pub(crate) fn observations_url(&self, params: &ObservationParams) -> Result<String, Error> {
        let mut url = format!("{}/api/v1/observations", self.base_url);
        let query = serde_urlencoded::to_string(params)?;
        if !query.is_empty() {
            url.push_str(&format!("?{}", query));
        }
        Ok(url)
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        let text = resp.text().await?;
        parse_body(status, &text)
    }
}

/// Decodes a response body: the payload on success, the server's failure
/// `details` otherwise.
pub(crate) fn parse_body<T: serde::de::DeserializeOwned>(
    status: StatusCode,
    text: &str,
) -> Result<T, Error> {
    if status.is_success() {
        Ok(serde_json::from_str(text)?)
    } else {
        let message = serde_json::from_str::<ErrorResponse>(text)
            .map(|body| body.details)
            .unwrap_or_else(|_| text.to_string());
        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }
}
