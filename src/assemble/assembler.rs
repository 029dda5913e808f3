//! Document Assembler
//!
//! Turns the raw bodies of one refresh into a `Document`. Never fails: any
//! field that cannot be derived becomes `Derived::Unknown`.

use std::collections::HashMap;

use tracing::warn;

use crate::assemble::parse::{self, ParseError, ParseResult};
use crate::fetch::Source;
use crate::models::{Channel, Derived, Document, Flavors, Release, Stats};

/// Raw bodies keyed by the source they came from.
pub type SourceBodies = HashMap<Source, Vec<u8>>;

// == Assembler ==
#[derive(Debug, Clone)]
pub struct Assembler {
    /// Prefix of F-Droid APK URLs; the version code and `.apk` follow
    fdroid_apk_prefix: String,
}

impl Assembler {
    pub fn new(fdroid_apk_prefix: impl Into<String>) -> Self {
        Self {
            fdroid_apk_prefix: fdroid_apk_prefix.into(),
        }
    }

    // == Chain Input ==
    /// Commit the latest GitHub release was built from, used to locate its build file.
    pub fn release_commit(&self, bodies: &SourceBodies) -> ParseResult<String> {
        body(bodies, Source::ReleasesPage, "release commit").and_then(parse::release_commit)
    }

    // == Assemble ==
    /// Builds the document from the core bodies plus the build file, if one was fetched.
    pub fn assemble(&self, bodies: &SourceBodies) -> Document {
        let repo = |field: &'static str, key: &str| {
            known(body(bodies, Source::RepoApi, field).and_then(|b| parse::json_count(field, b, key)))
        };

        let stats = Stats {
            stargazers: repo("stargazers", "stargazers_count"),
            watchers: repo("watchers", "subscribers_count"),
            forks: repo("forks", "forks_count"),
            contributors: known(
                body(bodies, Source::RepoPage, "contributors").and_then(parse::contributors),
            ),
            translations: known(
                body(bodies, Source::Translations, "translations")
                    .and_then(|b| parse::json_count("translations", b, "count")),
            ),
        };

        let github = Release {
            version: known(
                body(bodies, Source::ReleasesPage, "github version").and_then(parse::github_version),
            ),
            version_code: known(
                body(bodies, Source::BuildFile, "github version code")
                    .and_then(parse::build_file_version_code),
            ),
            apk: known(body(bodies, Source::ReleasesPage, "github apk").and_then(parse::github_apk)),
        };

        let fdroid_code = known(
            body(bodies, Source::FdroidMetadata, "fdroid version code")
                .and_then(parse::fdroid_version_code),
        );
        let fdroid = Release {
            version: known(
                body(bodies, Source::FdroidMetadata, "fdroid version").and_then(parse::fdroid_version),
            ),
            apk: match &fdroid_code {
                Derived::Known(code) => Derived::Known(format!("{}{}.apk", self.fdroid_apk_prefix, code)),
                Derived::Unknown => Derived::Unknown,
            },
            version_code: fdroid_code,
        };

        Document {
            stats,
            flavors: Flavors {
                github: Channel { stable: github },
                fdroid: Channel { stable: fdroid },
            },
        }
    }
}

fn body<'a>(bodies: &'a SourceBodies, source: Source, field: &'static str) -> ParseResult<&'a [u8]> {
    bodies
        .get(&source)
        .map(Vec::as_slice)
        .ok_or_else(|| ParseError::new(field, format!("no {} body", source)))
}

fn known<T>(result: ParseResult<T>) -> Derived<T> {
    if let Err(e) = &result {
        warn!("{}", e);
    }
    result.into()
}
