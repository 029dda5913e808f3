//! Cache Gate Module
//!
//! Answers every inbound request from the cache, with a backoff rejection,
//! or by running a single-flight refresh that concurrent requests share.

use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, RwLock};
use tokio::time::Instant;
use tracing::{debug, info};

use crate::cache::state::{decide, CachedDocument, Decision, RefreshState};
use crate::cache::GateStats;
use crate::config::CachePolicy;
use crate::error::{RelayError, Result};
use crate::refresh::RefreshOrchestrator;

type Outcome = Result<Arc<CachedDocument>>;

/// Everything the read path needs, swapped as a unit.
#[derive(Debug, Default)]
struct Shared {
    state: RefreshState,
    cached: Option<Arc<CachedDocument>>,
    /// Result of the most recent completed refresh, handed to requests that waited on it
    last_outcome: Option<Outcome>,
}

// == Cache Gate ==
/// Process-wide cache in front of the refresh orchestrator.
///
/// `shared` is only written while `refresh_lock` is held, and the lock is held
/// for the whole refresh, so at most one refresh ever talks to upstream.
pub struct CacheGate {
    orchestrator: RefreshOrchestrator,
    policy: CachePolicy,
    shared: RwLock<Shared>,
    refresh_lock: AsyncMutex<()>,
    stats: Mutex<GateStats>,
}

impl CacheGate {
    // == Constructor ==
    pub fn new(orchestrator: RefreshOrchestrator, policy: CachePolicy) -> Self {
        Self {
            orchestrator,
            policy,
            shared: RwLock::new(Shared::default()),
            refresh_lock: AsyncMutex::new(()),
            stats: Mutex::new(GateStats::new()),
        }
    }

    // == Serve ==
    /// Answers one request.
    ///
    /// The refresh runs on its own task, so it completes even if the request
    /// that started it goes away.
    pub async fn serve(self: &Arc<Self>) -> Result<Arc<CachedDocument>> {
        let seen_generation = {
            let shared = self.shared.read().await;
            let decision = decide(
                &shared.state,
                shared.cached.is_some(),
                Instant::now(),
                &self.policy,
            );
            match (decision, &shared.cached) {
                (Decision::RejectBackoff, _) => {
                    info!("Request failed recently, waiting for timeout");
                    self.record(GateStats::record_rejection);
                    return Err(RelayError::RecentFailureBackoff);
                }
                (Decision::ServeCached, Some(cached)) => {
                    debug!("Serving cached document from {}", cached.produced_at);
                    self.record(GateStats::record_hit);
                    return Ok(Arc::clone(cached));
                }
                _ => shared.state.generation,
            }
        };

        let gate = Arc::clone(self);
        tokio::spawn(async move { gate.refresh(seen_generation).await })
            .await
            .map_err(|e| RelayError::Internal(e.to_string()))?
    }

    // == Refresh ==
    /// Runs a refresh unless one completed since `seen_generation`, in which
    /// case its outcome is returned instead.
    async fn refresh(&self, seen_generation: u64) -> Outcome {
        let _permit = self.refresh_lock.lock().await;

        {
            let mut shared = self.shared.write().await;
            if shared.state.generation != seen_generation {
                if let Some(outcome) = &shared.last_outcome {
                    debug!("Joined refresh completed while waiting");
                    self.record(GateStats::record_join);
                    return outcome.clone();
                }
            }
            shared.state.in_flight = true;
        }
        self.record(GateStats::record_refresh);

        let outcome = self
            .orchestrator
            .run()
            .await
            .and_then(CachedDocument::new)
            .map(Arc::new);

        let mut shared = self.shared.write().await;
        let now = Instant::now();
        match &outcome {
            Ok(cached) => {
                shared.state.record_success(now);
                shared.cached = Some(Arc::clone(cached));
            }
            Err(_) => {
                shared.state.record_failure(now);
                self.record(GateStats::record_failure);
            }
        }
        shared.state.in_flight = false;
        shared.last_outcome = Some(outcome.clone());

        let stats = self.stats();
        info!(
            "Refresh {}: refreshes={}, failures={}, hits={}, rejections={}, hit_rate={:.2}",
            if outcome.is_ok() { "succeeded" } else { "failed" },
            stats.refreshes,
            stats.refresh_failures,
            stats.cache_hits,
            stats.backoff_rejections,
            stats.hit_rate()
        );

        outcome
    }

    // == Introspection ==
    /// Snapshot of the refresh bookkeeping.
    pub async fn state(&self) -> RefreshState {
        self.shared.read().await.state.clone()
    }

    /// The cached document, fresh or not.
    pub async fn cached(&self) -> Option<Arc<CachedDocument>> {
        self.shared.read().await.cached.clone()
    }

    pub fn stats(&self) -> GateStats {
        self.stats
            .lock()
            .map(|stats| stats.clone())
            .unwrap_or_default()
    }

    fn record(&self, update: fn(&mut GateStats)) {
        if let Ok(mut stats) = self.stats.lock() {
            update(&mut stats);
        }
    }
}
