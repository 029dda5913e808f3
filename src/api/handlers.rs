//! API Handlers
//!
//! The single read endpoint of the relay.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};

use crate::cache::CacheGate;
use crate::config::Config;
use crate::error::Result;
use crate::fetch::HttpFetcher;
use crate::refresh::RefreshOrchestrator;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Process-wide cache gate
    pub gate: Arc<CacheGate>,
    /// Value of `Access-Control-Allow-Origin` on every response
    pub allowed_origin: HeaderValue,
}

impl AppState {
    /// Creates a new AppState around an existing gate.
    pub fn new(gate: CacheGate, allowed_origin: HeaderValue) -> Self {
        Self {
            gate: Arc::new(gate),
            allowed_origin,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the HTTP fetcher, the refresh orchestrator and the cache gate.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let fetcher = HttpFetcher::new(config.fetch_timeout())?;
        let orchestrator = RefreshOrchestrator::new(Arc::new(fetcher), config.upstream.clone());
        let gate = CacheGate::new(orchestrator, config.cache_policy());
        let allowed_origin = HeaderValue::from_str(&config.allowed_origin)?;
        Ok(Self::new(gate, allowed_origin))
    }
}

/// Handler for GET /data.json
///
/// Serves the cached document, refreshing it first when stale.
pub async fn data_handler(State(state): State<AppState>) -> Result<Response> {
    let cached = state.gate.serve().await?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain")],
        cached.body.clone(),
    )
        .into_response())
}
