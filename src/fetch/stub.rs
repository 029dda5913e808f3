//! Scripted in-memory fetcher for unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::fetch::{FetchResult, Fetcher};

#[derive(Debug, Clone)]
enum Reply {
    Status(u16, Vec<u8>),
    Transport(String),
}

/// Answers from a URL table; unknown URLs answer 404.
#[derive(Debug, Default)]
pub struct ScriptedFetcher {
    replies: Mutex<HashMap<String, Reply>>,
    calls: Mutex<Vec<String>>,
    total: AtomicUsize,
    delay: Option<Duration>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every fetch sleeps this long before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn respond(&self, url: &str, status: u16, body: impl Into<Vec<u8>>) {
        self.replies
            .lock()
            .unwrap()
            .insert(url.to_string(), Reply::Status(status, body.into()));
    }

    pub fn fail(&self, url: &str, detail: &str) {
        self.replies
            .lock()
            .unwrap()
            .insert(url.to_string(), Reply::Transport(detail.to_string()));
    }

    pub fn total_calls(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }

    pub fn calls_to(&self, url: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|u| *u == url).count()
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> FetchResult {
        self.total.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().unwrap().push(url.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let reply = self.replies.lock().unwrap().get(url).cloned();
        match reply {
            Some(Reply::Status(status, body)) => FetchResult::from_response(url, status, body),
            Some(Reply::Transport(detail)) => FetchResult::transport_failure(url, detail),
            None => FetchResult::from_response(url, 404, Vec::new()),
        }
    }
}

// == Fixtures ==
pub const BUILD_FILE_URL: &str = "https://up/raw/deadbeef/build.gradle";

pub const RELEASES_PAGE: &str = r#"<div class="release"><div class="float-left"><ul>
    <li><a class="css-truncate"><span class="css-truncate-target">v0.21.0</span></a></li>
    <li><a><code>deadbeef</code></a></li></ul></div>
    <div class="release-main-section"><ul><li class="d-block"><a href="/r/app.apk">apk</a></li></ul></div></div>"#;

/// Upstream endpoints pointing at the scripted table.
pub fn upstream() -> crate::config::UpstreamConfig {
    crate::config::UpstreamConfig {
        repo_api: "https://up/repo-api".to_string(),
        fdroid_metadata: "https://up/fdroid".to_string(),
        releases_page: "https://up/releases".to_string(),
        repo_page: "https://up/repo".to_string(),
        translations_api: "https://up/translations".to_string(),
        build_file_template: "https://up/raw/{commit}/build.gradle".to_string(),
        fdroid_apk_prefix: "https://fdroid/app_".to_string(),
    }
}

/// A fetcher where every source of `upstream()` answers well-formed content.
pub fn healthy() -> ScriptedFetcher {
    let fetcher = ScriptedFetcher::new();
    fetcher.script_healthy();
    fetcher
}

impl ScriptedFetcher {
    pub fn script_healthy(&self) {
        self.respond(
            "https://up/repo-api",
            200,
            r#"{"stargazers_count": 9, "subscribers_count": 1, "forks_count": 2}"#,
        );
        self.respond("https://up/fdroid", 200, "Build:0.21.0,970\n commit=v0.21.0\n");
        self.respond("https://up/releases", 200, RELEASES_PAGE);
        self.respond(
            "https://up/repo",
            200,
            r#"<ul class="numbers-summary"><li><a href="/graphs/contributors"><span class="num">12</span></a></li></ul>"#,
        );
        self.respond("https://up/translations", 200, r#"{"count": 3}"#);
        self.respond(BUILD_FILE_URL, 200, "versionCode 971");
    }
}
