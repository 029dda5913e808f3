//! Stats Relay - A caching aggregator for project statistics
//!
//! Merges release, popularity and translation data from several upstream
//! sources into one JSON document, refreshed at most once per TTL.

pub mod api;
pub mod assemble;
pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod refresh;

pub use api::AppState;
pub use cache::CacheGate;
pub use config::Config;
pub use fetch::{FetchResult, Fetcher};
pub use refresh::RefreshOrchestrator;
