//! Refresh Orchestrator
//!
//! Core sources are hard requirements: any failure aborts the refresh. The
//! chained build-file fetch only feeds one field and degrades to unknown.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{error, info, warn};

use crate::assemble::{Assembler, SourceBodies};
use crate::config::UpstreamConfig;
use crate::error::{RelayError, Result};
use crate::fetch::{Fetcher, Source};
use crate::models::Document;

// == Refresh Orchestrator ==
#[derive(Clone)]
pub struct RefreshOrchestrator {
    fetcher: Arc<dyn Fetcher>,
    upstream: UpstreamConfig,
    assembler: Assembler,
}

impl RefreshOrchestrator {
    pub fn new(fetcher: Arc<dyn Fetcher>, upstream: UpstreamConfig) -> Self {
        let assembler = Assembler::new(upstream.fdroid_apk_prefix.clone());
        Self {
            fetcher,
            upstream,
            assembler,
        }
    }

    /// URL a source is fetched from; the build file yields its unexpanded template.
    pub fn url_for(&self, source: Source) -> &str {
        match source {
            Source::RepoApi => &self.upstream.repo_api,
            Source::FdroidMetadata => &self.upstream.fdroid_metadata,
            Source::ReleasesPage => &self.upstream.releases_page,
            Source::RepoPage => &self.upstream.repo_page,
            Source::Translations => &self.upstream.translations_api,
            Source::BuildFile => &self.upstream.build_file_template,
        }
    }

    // == Run ==
    /// Executes one refresh attempt to completion.
    pub async fn run(&self) -> Result<Document> {
        info!("Fetching latest release data");

        // Fan out the independent sources and wait for all of them
        let results = join_all(Source::CORE.iter().map(|&source| async move {
            (source, self.fetcher.fetch(self.url_for(source)).await)
        }))
        .await;

        let mut bodies = SourceBodies::new();
        for (source, result) in results {
            if !result.succeeded() {
                let detail = result.failure_detail();
                error!("Upstream error: {} {} -> {}", source, result.url, detail);
                return Err(RelayError::UpstreamUnavailable {
                    upstream: source,
                    url: result.url,
                    detail,
                });
            }
            bodies.insert(source, result.body);
        }

        self.fetch_build_file(&mut bodies).await;

        Ok(self.assembler.assemble(&bodies))
    }

    // == Chained Fetch ==
    /// Adds the build file at the release commit to `bodies`, if it can be had.
    async fn fetch_build_file(&self, bodies: &mut SourceBodies) {
        let commit = match self.assembler.release_commit(bodies) {
            Ok(commit) => commit,
            Err(e) => {
                warn!("Skipping build file fetch: {}", e);
                return;
            }
        };

        let result = self.fetcher.fetch(&self.upstream.build_file_url(&commit)).await;
        if result.succeeded() {
            bodies.insert(Source::BuildFile, result.body);
        } else {
            warn!(
                "Build file unavailable: {} -> {}",
                result.url,
                result.failure_detail()
            );
        }
    }
}
