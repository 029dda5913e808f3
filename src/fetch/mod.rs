//! Fetch Module
//!
//! One outbound GET per call, with failures reported as values instead of errors.

mod client;
mod result;

#[cfg(test)]
pub(crate) mod stub;

use std::fmt;

pub use client::{Fetcher, HttpFetcher, IDENTIFICATION_HEADER_VALUE};
pub use result::FetchResult;

// == Source ==
/// The upstream sources a refresh reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// Repository metadata REST API
    RepoApi,
    /// F-Droid stable release metadata
    FdroidMetadata,
    /// GitHub releases page
    ReleasesPage,
    /// GitHub repository page (contributors)
    RepoPage,
    /// Translation service API
    Translations,
    /// Build file fetched at the release commit
    BuildFile,
}

impl Source {
    /// The five independent sources fetched concurrently on every refresh.
    pub const CORE: [Source; 5] = [
        Source::RepoApi,
        Source::FdroidMetadata,
        Source::ReleasesPage,
        Source::RepoPage,
        Source::Translations,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Source::RepoApi => "repository api",
            Source::FdroidMetadata => "fdroid metadata",
            Source::ReleasesPage => "releases page",
            Source::RepoPage => "repo page",
            Source::Translations => "translations",
            Source::BuildFile => "build file",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
