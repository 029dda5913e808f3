//! Field Parsers
//!
//! Each parser derives one field from one raw body. Every way a derivation can
//! go wrong (missing markup, no match, bad number) collapses into `ParseError`.

use regex::Regex;
use scraper::{Html, Selector};
use thiserror::Error;

// == Parse Error ==
/// A single field could not be derived.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("could not derive {field}: {reason}")]
pub struct ParseError {
    pub field: &'static str,
    pub reason: String,
}

impl ParseError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

pub type ParseResult<T> = std::result::Result<T, ParseError>;

// == Selectors ==
const CONTRIBUTORS_SELECTOR: &str = ".numbers-summary a[href$=contributors] .num";
const RELEASE_APK_SELECTOR: &str = r#".release-main-section li.d-block a[href$=".apk"]"#;
const RELEASE_VERSION_SELECTOR: &str =
    ".release .float-left ul li a.css-truncate > span.css-truncate-target";
const RELEASE_COMMIT_SELECTOR: &str = ".release .float-left ul li a code";

const GITHUB_BASE_URL: &str = "https://github.com";

fn selector(field: &'static str, css: &str) -> ParseResult<Selector> {
    Selector::parse(css).map_err(|e| ParseError::new(field, e.to_string()))
}

fn regex(field: &'static str, pattern: &str) -> ParseResult<Regex> {
    Regex::new(pattern).map_err(|e| ParseError::new(field, e.to_string()))
}

fn parse_count(field: &'static str, text: &str) -> ParseResult<u64> {
    let digits: String = text.trim().chars().filter(|c| *c != ',').collect();
    digits
        .parse()
        .map_err(|_| ParseError::new(field, format!("not a count: {:?}", text.trim())))
}

/// Text of every element matching `css`, in document order.
fn select_texts(field: &'static str, body: &[u8], css: &str) -> ParseResult<Vec<String>> {
    let selector = selector(field, css)?;
    let document = Html::parse_document(&String::from_utf8_lossy(body));
    Ok(document
        .select(&selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .collect())
}

fn first_text(field: &'static str, body: &[u8], css: &str) -> ParseResult<String> {
    select_texts(field, body, css)?
        .into_iter()
        .next()
        .filter(|text| !text.is_empty())
        .ok_or_else(|| ParseError::new(field, "no matching element"))
}

// == JSON Counters ==
/// Reads a non-negative integer member of a JSON object.
///
/// Numeric strings are accepted as well as numbers.
pub fn json_count(field: &'static str, body: &[u8], key: &str) -> ParseResult<u64> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| ParseError::new(field, e.to_string()))?;
    match value.get(key) {
        Some(serde_json::Value::Number(n)) => n
            .as_u64()
            .ok_or_else(|| ParseError::new(field, format!("{} is not a count", key))),
        Some(serde_json::Value::String(s)) => parse_count(field, s),
        Some(_) => Err(ParseError::new(field, format!("{} has unexpected type", key))),
        None => Err(ParseError::new(field, format!("{} missing", key))),
    }
}

// == Repository Page ==
/// Contributor count from the repository page; exactly one match is required.
pub fn contributors(body: &[u8]) -> ParseResult<u64> {
    const FIELD: &str = "contributors";
    let texts = select_texts(FIELD, body, CONTRIBUTORS_SELECTOR)?;
    match texts.as_slice() {
        [text] => parse_count(FIELD, text),
        other => Err(ParseError::new(
            FIELD,
            format!("expected one match, found {}", other.len()),
        )),
    }
}

// == Releases Page ==
/// Absolute URL of the first APK asset of the latest release.
pub fn github_apk(body: &[u8]) -> ParseResult<String> {
    const FIELD: &str = "github apk";
    let selector = selector(FIELD, RELEASE_APK_SELECTOR)?;
    let document = Html::parse_document(&String::from_utf8_lossy(body));
    let href = document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("href"))
        .ok_or_else(|| ParseError::new(FIELD, "no apk link"))?;
    Ok(format!("{}{}", GITHUB_BASE_URL, href))
}

/// Tag name of the latest release.
pub fn github_version(body: &[u8]) -> ParseResult<String> {
    first_text("github version", body, RELEASE_VERSION_SELECTOR)
}

/// Commit hash the latest release was tagged at.
pub fn release_commit(body: &[u8]) -> ParseResult<String> {
    first_text("release commit", body, RELEASE_COMMIT_SELECTOR)
}

// == Build File ==
/// Version code declared by the first `versionCode` line of a build file.
pub fn build_file_version_code(body: &[u8]) -> ParseResult<u64> {
    const FIELD: &str = "github version code";
    let pattern = regex(FIELD, r"versionCode(.*)")?;
    let text = String::from_utf8_lossy(body);
    let line = pattern
        .captures(&text)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| ParseError::new(FIELD, "no versionCode"))?;
    let token = line
        .as_str()
        .split_whitespace()
        .last()
        .ok_or_else(|| ParseError::new(FIELD, "empty versionCode"))?;
    parse_count(FIELD, token)
}

// == F-Droid Metadata ==
/// Last `commit=` value of the metadata file.
pub fn fdroid_version(body: &[u8]) -> ParseResult<String> {
    const FIELD: &str = "fdroid version";
    let pattern = regex(FIELD, r"commit=(.*)")?;
    let text = String::from_utf8_lossy(body);
    pattern
        .captures_iter(&text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .last()
        .filter(|version| !version.is_empty())
        .ok_or_else(|| ParseError::new(FIELD, "no commit entry"))
}

/// Version code of the last `Build:` line of the metadata file.
pub fn fdroid_version_code(body: &[u8]) -> ParseResult<u64> {
    const FIELD: &str = "fdroid version code";
    let pattern = regex(FIELD, r"Build:(.*)")?;
    let text = String::from_utf8_lossy(body);
    let line = pattern
        .captures_iter(&text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .last()
        .ok_or_else(|| ParseError::new(FIELD, "no build entry"))?;
    let code = line.split(',').last().unwrap_or_default();
    parse_count(FIELD, code)
}
