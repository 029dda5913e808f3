//! Gate Statistics Module
//!
//! Counts how inbound requests were answered.

// == Gate Stats ==
/// Tracks how the cache gate answered requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GateStats {
    /// Requests answered from the cached document
    pub cache_hits: u64,
    /// Refresh attempts actually executed
    pub refreshes: u64,
    /// Refresh attempts that failed
    pub refresh_failures: u64,
    /// Requests rejected inside the backoff window
    pub backoff_rejections: u64,
    /// Requests that waited on a refresh started by another request
    pub joined_refreshes: u64,
}

impl GateStats {
    // == Constructor ==
    /// Creates a new GateStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Share of non-rejected requests served without touching upstream.
    ///
    /// Returns 0.0 if no request has been answered yet.
    pub fn hit_rate(&self) -> f64 {
        let total = self.cache_hits + self.refreshes + self.joined_refreshes;
        if total == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.cache_hits += 1;
    }

    pub fn record_refresh(&mut self) {
        self.refreshes += 1;
    }

    pub fn record_failure(&mut self) {
        self.refresh_failures += 1;
    }

    pub fn record_rejection(&mut self) {
        self.backoff_rejections += 1;
    }

    pub fn record_join(&mut self) {
        self.joined_refreshes += 1;
    }
}
