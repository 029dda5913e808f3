//! Fetch Result Module
//!
//! Outcome of a single upstream call.

// == Fetch Result ==
/// Outcome of one upstream GET.
///
/// A request that reached the server carries its status; a transport failure
/// (DNS, refused connection, timeout) has no status and an error detail instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    /// The URL that was requested
    pub url: String,
    /// HTTP status, absent on transport failure
    pub status: Option<u16>,
    /// Response body, empty on transport failure
    pub body: Vec<u8>,
    /// Why the call failed, if it did
    pub error: Option<String>,
}

impl FetchResult {
    // == Constructors ==
    /// Builds a result from a completed HTTP exchange.
    ///
    /// Non-2xx statuses are recorded as failures but keep their body for diagnostics.
    pub fn from_response(url: impl Into<String>, status: u16, body: Vec<u8>) -> Self {
        let error = if (200..300).contains(&status) {
            None
        } else {
            Some(format!("HTTP {}", status))
        };
        Self {
            url: url.into(),
            status: Some(status),
            body,
            error,
        }
    }

    /// Builds a result for a request that never produced a response.
    pub fn transport_failure(url: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: None,
            body: Vec::new(),
            error: Some(detail.into()),
        }
    }

    // == Succeeded ==
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }

    /// Body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Human-readable failure description including a body excerpt.
    pub fn failure_detail(&self) -> String {
        let error = self.error.as_deref().unwrap_or("ok");
        if self.body.is_empty() {
            return error.to_string();
        }
        let text = self.text();
        let excerpt: String = text.chars().take(200).collect();
        format!("{} ({})", error, excerpt)
    }
}
