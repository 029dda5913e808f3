//! Refresh State Module
//!
//! Timestamps of the last refresh outcomes and the pure decision taken on
//! every inbound request.

use chrono::{DateTime, Utc};
use tokio::time::Instant;

use crate::config::CachePolicy;
use crate::error::{RelayError, Result};
use crate::models::Document;

// == Cached Document ==
/// The last successfully assembled document, encoded once for serving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedDocument {
    pub document: Document,
    /// Encoded JSON served verbatim on every cache hit
    pub body: String,
    pub produced_at: DateTime<Utc>,
}

impl CachedDocument {
    pub fn new(document: Document) -> Result<Self> {
        let body = serde_json::to_string(&document)
            .map_err(|e| RelayError::Serialization(e.to_string()))?;
        Ok(Self {
            document,
            body,
            produced_at: Utc::now(),
        })
    }
}

// == Refresh State ==
/// Process-wide refresh bookkeeping.
///
/// `None` timestamps mean "never", which behaves like a time infinitely far in the past.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshState {
    pub last_success_at: Option<Instant>,
    pub last_failure_at: Option<Instant>,
    pub in_flight: bool,
    /// Number of completed refresh attempts
    pub generation: u64,
}

impl RefreshState {
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Outcomes ==
    // Timestamps never move backwards.
    pub fn record_success(&mut self, at: Instant) {
        self.last_success_at = Some(self.last_success_at.map_or(at, |prev| prev.max(at)));
        self.generation += 1;
    }

    pub fn record_failure(&mut self, at: Instant) {
        self.last_failure_at = Some(self.last_failure_at.map_or(at, |prev| prev.max(at)));
        self.generation += 1;
    }
}

// == Decision ==
/// What the gate does with one inbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// A refresh failed less than one backoff window ago
    RejectBackoff,
    /// The cached document is fresh
    ServeCached,
    /// Run (or join) a refresh and wait for it
    Refresh,
}

/// Decides how to answer a request arriving at `now`.
///
/// Backoff is checked first, then freshness. A failure exactly one backoff
/// window old no longer blocks; a success exactly one TTL old is still fresh.
pub fn decide(state: &RefreshState, has_cached: bool, now: Instant, policy: &CachePolicy) -> Decision {
    if let Some(failed_at) = state.last_failure_at {
        if now.saturating_duration_since(failed_at) < policy.backoff {
            return Decision::RejectBackoff;
        }
    }

    if has_cached {
        if let Some(succeeded_at) = state.last_success_at {
            if now.saturating_duration_since(succeeded_at) <= policy.ttl {
                return Decision::ServeCached;
            }
        }
    }

    Decision::Refresh
}
