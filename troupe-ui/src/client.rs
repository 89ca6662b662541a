//! HTTP client for the artist directory backend
//!
//! Thin JSON client over the read endpoints plus the cache-refresh
//! trigger. All failures are mapped to the shared error taxonomy at the
//! call boundary: transport failures and non-2xx statuses become
//! [`Error::Network`], unparseable bodies become
//! [`Error::MalformedResponse`]. Nothing here panics on a bad response.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use troupe_common::{Artist, Error, Result};

/// Default timeout for directory API requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default limit passed to the location suggestion endpoint
pub const LOCATION_SUGGESTION_LIMIT: usize = 3;

/// JSON client for the directory backend.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    /// HTTP client for API requests
    http_client: Client,
    /// Base URL of the backend, no trailing slash
    base_url: String,
    /// Maximum accepted query length in characters
    query_max_len: usize,
}

impl DirectoryClient {
    /// Create a new client for the backend at `base_url`.
    pub fn new(base_url: impl Into<String>, query_max_len: usize) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            query_max_len,
        }
    }

    /// `GET /api/artists` - the full entity collection.
    pub async fn artists(&self) -> Result<Vec<Artist>> {
        self.get_json("/api/artists", &[]).await
    }

    /// `GET /api/search?q=` - server-side search over artist fields.
    pub async fn search(&self, query: &str) -> Result<Vec<Artist>> {
        let query = self.validate_query(query)?;
        self.get_json("/api/search", &[("q", query)]).await
    }

    /// `GET /api/search/locations?q=` - artists filtered by venue/location.
    pub async fn search_locations(&self, query: &str) -> Result<Vec<Artist>> {
        let query = self.validate_query(query)?;
        self.get_json("/api/search/locations", &[("q", query)]).await
    }

    /// `GET /api/suggestions/locations?q=&limit=` - plain location strings.
    pub async fn location_suggestions(&self, query: &str, limit: usize) -> Result<Vec<String>> {
        let query = self.validate_query(query)?;
        let limit = limit.to_string();
        self.get_json("/api/suggestions/locations", &[("q", query), ("limit", &limit)])
            .await
    }

    /// `POST /api/refresh-cache` - ask the backend to invalidate its cache.
    ///
    /// The caller is expected to drop its own snapshot and reload after a
    /// successful refresh.
    pub async fn refresh_cache(&self) -> Result<()> {
        let url = format!("{}/api/refresh-cache", self.base_url);
        debug!(%url, "directory request");

        let response = self
            .http_client
            .post(&url)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Cache refresh request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Network(format!(
                "Cache refresh returned {}",
                response.status()
            )));
        }
        Ok(())
    }

    /// `GET /api/cache/status` - informational backend cache status.
    pub async fn cache_status(&self) -> Result<Value> {
        self.get_json("/api/cache/status", &[]).await
    }

    /// Reject queries over the configured length before any request is made.
    fn validate_query<'a>(&self, query: &'a str) -> Result<&'a str> {
        let query = query.trim();
        if query.chars().count() > self.query_max_len {
            return Err(Error::InvalidInput(format!(
                "Search query must be under {} characters",
                self.query_max_len
            )));
        }
        Ok(query)
    }

    /// Execute a GET request and parse the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "directory request");

        let mut request = self.http_client.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request to {} failed: {}", path, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Network(format!(
                "{} returned {}: {}",
                path, status, body
            )));
        }

        response.json::<T>().await.map_err(|e| {
            Error::MalformedResponse(format!("Failed to parse {} response: {}", path, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = DirectoryClient::new("http://localhost:8080/", 100);
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[tokio::test]
    async fn test_over_long_query_rejected_without_request() {
        // Unroutable base: if validation did not short-circuit, this
        // would fail with a network error instead of InvalidInput.
        let client = DirectoryClient::new("http://localhost:1", 10);
        let result = client.search("a query far longer than ten characters").await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_query_trimmed_before_length_check() {
        let client = DirectoryClient::new("http://localhost:8080", 5);
        assert_eq!(client.validate_query("  abc  ").unwrap(), "abc");
        assert!(client.validate_query("abcdef").is_err());
    }
}
