//! Configuration Module
//!
//! Handles loading the relay configuration from environment variables.
//! Values are read once at startup and never change afterwards.

use std::env;
use std::time::Duration;

/// Relay configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// How long a successful refresh stays fresh, in seconds
    pub cache_ttl: u64,
    /// How long a failed refresh suppresses new attempts, in seconds
    pub failure_backoff: u64,
    /// Upper bound for every single upstream fetch, in seconds
    pub fetch_timeout: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Origin advertised in `Access-Control-Allow-Origin`
    pub allowed_origin: String,
    /// Upstream endpoints
    pub upstream: UpstreamConfig,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL_SECS` - Freshness window in seconds (default: 3600)
    /// - `FAILURE_BACKOFF_SECS` - Backoff window in seconds (default: 3600)
    /// - `FETCH_TIMEOUT_SECS` - Per-fetch timeout in seconds (default: 20)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `ALLOWED_ORIGIN` - Cross-origin header value (default: newpipe.schabi.org)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_ttl: parse_var("CACHE_TTL_SECS").unwrap_or(defaults.cache_ttl),
            failure_backoff: parse_var("FAILURE_BACKOFF_SECS").unwrap_or(defaults.failure_backoff),
            fetch_timeout: parse_var("FETCH_TIMEOUT_SECS").unwrap_or(defaults.fetch_timeout),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            allowed_origin: env::var("ALLOWED_ORIGIN").unwrap_or(defaults.allowed_origin),
            upstream: defaults.upstream,
        }
    }

    /// The TTL/backoff pair the cache gate works with.
    pub fn cache_policy(&self) -> CachePolicy {
        CachePolicy {
            ttl: Duration::from_secs(self.cache_ttl),
            backoff: Duration::from_secs(self.failure_backoff),
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl: 3600,
            failure_backoff: 3600,
            fetch_timeout: 20,
            server_port: 3000,
            allowed_origin: "newpipe.schabi.org".to_string(),
            upstream: UpstreamConfig::default(),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

// == Cache Policy ==
/// Fixed durations driving the cache gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// A success younger than or equal to this is served from cache
    pub ttl: Duration,
    /// A failure younger than this rejects requests outright
    pub backoff: Duration,
}

// == Upstream Endpoints ==
/// The five core sources plus the chained build-file location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    /// Repository metadata REST API
    pub repo_api: String,
    /// Raw F-Droid metadata file for the stable release
    pub fdroid_metadata: String,
    /// GitHub releases page
    pub releases_page: String,
    /// GitHub repository page, scraped for the contributor count
    pub repo_page: String,
    /// Translation service API
    pub translations_api: String,
    /// Build file location; `{commit}` is replaced by the release commit
    pub build_file_template: String,
    /// F-Droid APK URL prefix, followed by the version code and `.apk`
    pub fdroid_apk_prefix: String,
}

impl UpstreamConfig {
    /// Builds the chained build-file URL for a release commit.
    pub fn build_file_url(&self, commit: &str) -> String {
        self.build_file_template.replace("{commit}", commit)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            repo_api: "https://api.github.com/repos/TeamNewPipe/NewPipe".to_string(),
            fdroid_metadata:
                "https://gitlab.com/fdroid/fdroiddata/raw/master/metadata/org.schabi.newpipe.txt"
                    .to_string(),
            releases_page: "https://github.com/TeamNewPipe/NewPipe/releases/".to_string(),
            repo_page: "https://github.com/TeamNewPipe/NewPipe".to_string(),
            translations_api:
                "https://hosted.weblate.org/api/components/newpipe/strings/translations/"
                    .to_string(),
            build_file_template:
                "https://raw.githubusercontent.com/TeamNewPipe/NewPipe/{commit}/app/build.gradle"
                    .to_string(),
            fdroid_apk_prefix: "https://f-droid.org/repo/org.schabi.newpipe_".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache_ttl, 3600);
        assert_eq!(config.failure_backoff, 3600);
        assert_eq!(config.fetch_timeout, 20);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.allowed_origin, "newpipe.schabi.org");
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("CACHE_TTL_SECS");
        env::remove_var("FAILURE_BACKOFF_SECS");
        env::remove_var("FETCH_TIMEOUT_SECS");
        env::remove_var("SERVER_PORT");
        env::remove_var("ALLOWED_ORIGIN");

        let config = Config::from_env();
        assert_eq!(config.cache_ttl, 3600);
        assert_eq!(config.failure_backoff, 3600);
        assert_eq!(config.fetch_timeout, 20);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.upstream, UpstreamConfig::default());
    }

    #[test]
    fn test_cache_policy_durations() {
        let config = Config {
            cache_ttl: 60,
            failure_backoff: 120,
            ..Config::default()
        };
        let policy = config.cache_policy();
        assert_eq!(policy.ttl, Duration::from_secs(60));
        assert_eq!(policy.backoff, Duration::from_secs(120));
    }

    #[test]
    fn test_build_file_url() {
        let upstream = UpstreamConfig::default();
        assert_eq!(
            upstream.build_file_url("abc123"),
            "https://raw.githubusercontent.com/TeamNewPipe/NewPipe/abc123/app/build.gradle"
        );
    }
}
