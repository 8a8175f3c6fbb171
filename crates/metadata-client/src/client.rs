//! TMDB client with timeout and a single retry.
//!
//! The three lookups (`search_title`, `get_trending`, `get_reviews`) never
//! fail at the boundary: a missing key, a network error, a bad status or an
//! undecodable body all become `None`, logged at warn. The `try_*` variants
//! expose the typed error for callers that want it.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::TmdbConfig;
use crate::error::{MetadataError, Result};
use crate::types::{ResultsPage, Review, TitleDetails, TitleSummary, WireReview, WireTitle};

/// Pause before the single retry.
const RETRY_DELAY: Duration = Duration::from_millis(250);

/// TMDB API client.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    http: Client,
    config: TmdbConfig,
}

impl TmdbClient {
    /// Build a client. Works without an API key; lookups then return `None`.
    pub fn new(config: TmdbConfig) -> Result<Self> {
        let http = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &TmdbConfig {
        &self.config
    }

    pub fn is_configured(&self) -> bool {
        self.config.has_credentials()
    }

    /// First movie matching `query`.
    pub async fn search_title(&self, query: &str) -> Option<TitleDetails> {
        if !self.is_configured() {
            return None;
        }
        absorb("search", self.try_search_title(query).await).flatten()
    }

    /// Movies trending today, in TMDB's order.
    pub async fn get_trending(&self) -> Option<Vec<TitleSummary>> {
        if !self.is_configured() {
            return None;
        }
        absorb("trending", self.try_get_trending().await)
    }

    /// Reviews of a movie. An id of 0 means "no title" and returns `None`.
    pub async fn get_reviews(&self, title_id: u64) -> Option<Vec<Review>> {
        if !self.is_configured() || title_id == 0 {
            return None;
        }
        absorb("reviews", self.try_get_reviews(title_id).await)
    }

    pub async fn try_search_title(&self, query: &str) -> Result<Option<TitleDetails>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }
        debug!("TMDB title search: query='{}'", query);

        let page: ResultsPage<WireTitle> = self.get_json("search/movie", &[("query", query)]).await?;
        Ok(page.results.into_iter().next().map(TitleDetails::from))
    }

    pub async fn try_get_trending(&self) -> Result<Vec<TitleSummary>> {
        debug!("TMDB trending movies");
        let page: ResultsPage<WireTitle> = self.get_json("trending/movie/day", &[]).await?;
        Ok(page.results.into_iter().map(TitleSummary::from).collect())
    }

    pub async fn try_get_reviews(&self, title_id: u64) -> Result<Vec<Review>> {
        debug!("TMDB reviews: id={}", title_id);
        let path = format!("movie/{}/reviews", title_id);
        let page: ResultsPage<WireReview> = self.get_json(&path, &[]).await?;
        Ok(page.results.into_iter().map(Review::from).collect())
    }

    /// GET `path` and decode the body, retrying once on a retryable failure.
    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        match self.get_json_once(path, query).await {
            Err(e) if e.is_retryable() => {
                warn!("TMDB request to {} failed ({}), retrying once", path, e);
                tokio::time::sleep(RETRY_DELAY).await;
                self.get_json_once(path, query).await
            }
            other => other,
        }
    }

    async fn get_json_once<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let api_key = self
            .config
            .api_key()
            .ok_or_else(|| MetadataError::NotConfigured("TMDB API key is required".to_string()))?;

        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), path);
        let response = self
            .http
            .get(&url)
            .query(&[("api_key", api_key)])
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(MetadataError::NotConfigured("Invalid TMDB API key".to_string()));
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(MetadataError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MetadataError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| {
            MetadataError::Parse(format!("Failed to parse response from {}: {}", path, e))
        })
    }
}

/// Turn a typed failure into a logged `None`.
fn absorb<T>(operation: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("TMDB {} failed: {}", operation, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_client_returns_none() {
        let client = TmdbClient::new(TmdbConfig::default()).unwrap();
        assert!(!client.is_configured());
        assert!(client.search_title("The Matrix").await.is_none());
        assert!(client.get_trending().await.is_none());
        assert!(client.get_reviews(603).await.is_none());
    }

    #[tokio::test]
    async fn test_try_variant_reports_missing_key() {
        let client = TmdbClient::new(TmdbConfig::default()).unwrap();
        let err = client.try_get_trending().await.unwrap_err();
        assert!(matches!(err, MetadataError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn test_empty_inputs_skip_the_request() {
        let mut config = TmdbConfig::with_api_key("key");
        config.base_url = "http://127.0.0.1:9".to_string();
        let client = TmdbClient::new(config).unwrap();

        assert!(client.get_reviews(0).await.is_none());
        assert!(client.try_search_title("   ").await.unwrap().is_none());
    }
}
