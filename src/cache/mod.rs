//! Cache Module
//!
//! Time-bounded caching of the assembled document with failure backoff and
//! single-flight refresh.

mod gate;
mod state;
mod stats;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use gate::CacheGate;
pub use state::{decide, CachedDocument, Decision, RefreshState};
pub use stats::GateStats;
