//! Refresh Module
//!
//! Runs one refresh attempt: concurrent core fetches, the chained build-file
//! fetch, and assembly.

mod orchestrator;

pub use orchestrator::RefreshOrchestrator;
