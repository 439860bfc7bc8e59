//! App-icon lookup via the iTunes Search API.
//!
//! Parsed receipts reference most app icons by bundled key, but apps
//! without bundled artwork can be upgraded to real App Store artwork with
//! one search request per app name. Results are cached at-most-once per
//! name in an [`IconCache`] owned by the caller, so repeated receipts in
//! one session never re-fetch, and lookup failures silently keep the
//! bundled fallback.

use std::collections::HashMap;

use serde::Deserialize;

/// Default search endpoint.
pub const ICON_SEARCH_URL: &str = "https://itunes.apple.com/search";

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Errors from the icon lookup service.
#[derive(Debug, thiserror::Error)]
pub enum IconError {
    /// Transport-level failure (connection, body decoding).
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Response envelope of the search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// One software search result; only the artwork fields matter here.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub artwork_url512: Option<String>,
    pub artwork_url100: Option<String>,
    pub artwork_url60: Option<String>,
}

/// Highest-resolution artwork of the first result, if any.
pub fn best_artwork_url(response: &SearchResponse) -> Option<String> {
    let first = response.results.first()?;
    first
        .artwork_url512
        .clone()
        .or_else(|| first.artwork_url100.clone())
        .or_else(|| first.artwork_url60.clone())
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

/// In-process artwork cache keyed by app name.
///
/// Owned explicitly by the caller (the API keeps one per process) rather
/// than living in module-global state, so tests can inject a fresh cache
/// and assert lookup counts.
#[derive(Debug, Default)]
pub struct IconCache {
    entries: HashMap<String, String>,
}

impl IconCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, app_name: &str) -> Option<&str> {
        self.entries.get(app_name).map(String::as_str)
    }

    pub fn insert(&mut self, app_name: &str, url: String) {
        self.entries.insert(app_name.to_string(), url);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Client for the icon search endpoint.
pub struct IconClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for IconClient {
    fn default() -> Self {
        Self::new()
    }
}

impl IconClient {
    /// Create a client against the public search endpoint.
    pub fn new() -> Self {
        Self::with_base_url(ICON_SEARCH_URL)
    }

    /// Create a client against an alternative endpoint (tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Look up artwork for an app name, consulting the cache first.
    ///
    /// Returns `None` on cache miss plus lookup failure of any kind; the
    /// caller keeps its bundled fallback icon in that case.
    pub async fn lookup(&self, cache: &mut IconCache, app_name: &str) -> Option<String> {
        if let Some(hit) = cache.get(app_name) {
            return Some(hit.to_string());
        }

        match self.search(app_name).await {
            Ok(Some(url)) => {
                tracing::debug!(app = app_name, url = %url, "Icon artwork found");
                cache.insert(app_name, url.clone());
                Some(url)
            }
            Ok(None) => {
                tracing::warn!(app = app_name, "No icon artwork found");
                None
            }
            Err(err) => {
                tracing::warn!(app = app_name, error = %err, "Icon lookup failed");
                None
            }
        }
    }

    async fn search(&self, term: &str) -> Result<Option<String>, IconError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("term", term), ("entity", "software"), ("limit", "1")])
            .send()
            .await?
            .error_for_status()?
            .json::<SearchResponse>()
            .await?;

        Ok(best_artwork_url(&response))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
