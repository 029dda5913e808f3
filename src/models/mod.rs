//! Models served by the relay
//!
//! This module defines the aggregated document and its best-effort field type.

pub mod document;

// Re-export commonly used types
pub use document::{Channel, Derived, Document, Flavors, Release, Stats, UNKNOWN_SENTINEL};
