//! Hoist HTTP Client
//!
//! A small, typed client for the Hoist server API.
//!
//! # Example
//!
//! ```no_run
//! use hoist_client::HoistClient;
//!
//! #[tokio::main]
//! async fn main() -> hoist_client::Result<()> {
//!     let client = HoistClient::new("http://127.0.0.1:3002");
//!
//!     let ack = client.trigger().await?;
//!     println!("Run {} started, log: {}", ack.run_id, ack.log_hint);
//!     Ok(())
//! }
//! ```

pub mod error;

pub use error::{ClientError, Result};

use hoist_core::dto::service::{HealthStatus, ServiceInfo};
use hoist_core::dto::trigger::TriggerAck;
use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the Hoist server
#[derive(Debug, Clone)]
pub struct HoistClient {
    /// Base URL of the server (e.g., "http://127.0.0.1:3002")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl HoistClient {
    /// Create a new client for the server at `base_url`
    ///
    /// # Example
    /// ```
    /// use hoist_client::HoistClient;
    ///
    /// let client = HoistClient::new("http://127.0.0.1:3002");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET /health
    pub async fn health(&self) -> Result<HealthStatus> {
        let response = self.client.get(self.url("/health")).send().await?;
        self.handle_response(response).await
    }

    /// GET /
    pub async fn info(&self) -> Result<ServiceInfo> {
        let response = self.client.get(self.url("/")).send().await?;
        self.handle_response(response).await
    }

    /// POST /trigger
    ///
    /// Returns as soon as the server has accepted the run. The run's outcome
    /// has to be read from the log named in `log_hint`.
    pub async fn trigger(&self) -> Result<TriggerAck> {
        tracing::debug!("Triggering pipeline run on {}", self.base_url);
        let response = self.client.post(self.url("/trigger")).send().await?;
        self.handle_response(response).await
    }

    /// Handle an API response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HoistClient::new("http://127.0.0.1:3002");
        assert_eq!(client.base_url(), "http://127.0.0.1:3002");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = HoistClient::new("http://127.0.0.1:3002/");
        assert_eq!(client.url("/health"), "http://127.0.0.1:3002/health");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_request_error() {
        // Port 1 is reserved and never has a listener in test environments
        let client = HoistClient::new("http://127.0.0.1:1");
        let err = client.health().await.unwrap_err();
        assert!(matches!(err, ClientError::RequestFailed(_)));
    }
}
