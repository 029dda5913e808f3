//! Document model served by the relay
//!
//! Every field is derived independently; a field that could not be derived
//! serializes as the `-1` sentinel instead of failing the whole document.

use serde::{Serialize, Serializer};

/// Serialized value of a field whose derivation failed.
pub const UNKNOWN_SENTINEL: i64 = -1;

// == Derived Field ==
/// A best-effort field: either the derived value or unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Derived<T> {
    Known(T),
    Unknown,
}

impl<T> Derived<T> {
    pub fn is_known(&self) -> bool {
        matches!(self, Derived::Known(_))
    }
}

impl<T, E> From<Result<T, E>> for Derived<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Derived::Known(value),
            Err(_) => Derived::Unknown,
        }
    }
}

impl<T: Serialize> Serialize for Derived<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Derived::Known(value) => value.serialize(serializer),
            Derived::Unknown => serializer.serialize_i64(UNKNOWN_SENTINEL),
        }
    }
}

// == Document ==
/// The aggregated payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub stats: Stats,
    pub flavors: Flavors,
}

/// Popularity figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub stargazers: Derived<u64>,
    pub watchers: Derived<u64>,
    pub forks: Derived<u64>,
    pub contributors: Derived<u64>,
    pub translations: Derived<u64>,
}

/// Release information per distribution channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flavors {
    pub github: Channel,
    pub fdroid: Channel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Channel {
    pub stable: Release,
}

/// One released build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Release {
    pub version: Derived<String>,
    pub version_code: Derived<u64>,
    pub apk: Derived<String>,
}
