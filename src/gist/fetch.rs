// src/gist/fetch.rs
// =============================================================================
// This module makes the HTTP requests behind a resolution.
//
// Key functionality:
// - One GET per call, no retries
// - A fixed timeout per request
// - A cap on how many requests are in flight at once, and on how many idle
//   connections are kept around for reuse
// - Network failures (timeout, DNS, TLS, refused connection) are reported
//   separately from HTTP statuses
//
// The resolver only sees the `Fetcher` trait, so tests can swap the network
// for a scripted stub.
// =============================================================================

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;

use super::error::TransportError;

/// Transport sizing knobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpConfig {
    /// Timeout for a single request, in seconds
    pub timeout_secs: u64,
    /// Upper bound on requests in flight at the same time
    pub max_connections: usize,
    /// Idle connections kept per host for reuse
    pub max_idle_connections: usize,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            max_connections: 10,
            max_idle_connections: 5,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"))
                .to_string(),
        }
    }
}

/// What came back from a GET that reached the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    /// Response text; only read for 200 responses, empty otherwise
    pub body: String,
}

impl FetchResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Anything that can perform a GET for the resolver.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn get(&self, url: &str) -> Result<FetchResponse, TransportError>;
}

/// The real network, backed by a pooled reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    // Bounds total concurrent requests; reqwest only bounds idle connections
    permits: Arc<Semaphore>,
}

impl HttpFetcher {
    pub fn new(config: &HttpConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(config.max_idle_connections)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            permits: Arc::new(Semaphore::new(config.max_connections)),
        })
    }

    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get(&self, url: &str) -> Result<FetchResponse, TransportError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| TransportError::new("HTTP client is shut down"))?;

        let response = self.client.get(url).send().await.map_err(categorize_error)?;
        let status = response.status();

        if status != StatusCode::OK {
            return Ok(FetchResponse::status(status.as_u16()));
        }

        let body = response.text().await.map_err(categorize_error)?;
        Ok(FetchResponse {
            status: status.as_u16(),
            body,
        })
    }
}

// Turns a reqwest failure into a short, readable message.
fn categorize_error(error: reqwest::Error) -> TransportError {
    let error_string = error.to_string();

    let message = if error.is_timeout() {
        "Request timed out".to_string()
    } else if error.is_connect() {
        if error_string.contains("dns") {
            "Could not resolve hostname".to_string()
        } else {
            format!("Connection failed: {error_string}")
        }
    } else if error_string.contains("certificate") || error_string.contains("ssl") {
        "SSL certificate error".to_string()
    } else {
        error_string
    };

    TransportError::new(message)
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why a Semaphore next to the connection pool?
//    - reqwest's pool only limits connections that sit idle
//    - A page with many gists would otherwise open as many sockets as there
//      are references
//    - Each request holds a permit until its body has been read
//
// 2. Why #[async_trait]?
//    - The resolver stores an `Arc<dyn Fetcher>`
//    - Plain `async fn` in traits is not object safe, async_trait boxes the
//      returned future so the trait can be used behind `dyn`
//
// 3. Why not read the body of error responses?
//    - Only the status is reported for non-200 answers
//    - Skipping the read frees the permit and the connection sooner
// -----------------------------------------------------------------------------
