//! Fetch Client Module
//!
//! The `Fetcher` seam and its reqwest-backed implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use tracing::debug;

use crate::fetch::FetchResult;

/// Identification header sent with every upstream request.
pub const IDENTIFICATION_HEADER_VALUE: &str = "";

// == Fetcher Trait ==
/// Performs exactly one GET and never fails: every outcome is a `FetchResult`.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> FetchResult;
}

// == HTTP Fetcher ==
/// Fetcher backed by a shared reqwest client with a bounded per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Creates a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult {
        debug!("GET {}", url);

        let response = match self
            .client
            .get(url)
            .header(USER_AGENT, IDENTIFICATION_HEADER_VALUE)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return FetchResult::transport_failure(url, e.to_string()),
        };

        let status = response.status().as_u16();
        match response.bytes().await {
            Ok(body) => FetchResult::from_response(url, status, body.to_vec()),
            Err(e) => FetchResult::transport_failure(url, e.to_string()),
        }
    }
}
