//! NewsAPI client for recent company news

use super::NewsCollector;
use crate::error::{Result, ResearchError};
use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde::Deserialize;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

const PROVIDER: &str = "NewsAPI";
const EVERYTHING_URL: &str = "https://newsapi.org/v2/everything";
const DEFAULT_RATE_LIMIT: NonZeroU32 = NonZeroU32::new(60).unwrap();

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<NewsArticle>,
}

/// Article as returned by `/v2/everything`
#[derive(Debug, Clone, Deserialize)]
pub struct NewsArticle {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewsArticle {
    /// `"{title}. {description}"`, the bare title, or nothing without a title
    pub fn to_text(&self) -> Option<String> {
        let title = self.title.as_deref().map(str::trim).filter(|t| !t.is_empty())?;
        match self.description.as_deref().map(str::trim) {
            Some(desc) if !desc.is_empty() => Some(format!("{title}. {desc}")),
            _ => Some(title.to_string()),
        }
    }
}

/// NewsAPI client with client-side rate limiting
///
/// Without an API key every fetch returns an empty corpus.
#[derive(Clone)]
pub struct NewsApiClient {
    client: Client,
    api_key: Option<String>,
    page_size: usize,
    rate_limiter: SharedRateLimiter,
}

impl NewsApiClient {
    /// Create a new NewsAPI client
    ///
    /// # Arguments
    /// * `api_key` - NewsAPI key, `None` disables fetching
    /// * `page_size` - Articles per request
    /// * `rate_limit` - Requests per minute
    /// * `timeout` - Per-request timeout
    pub fn new(
        api_key: Option<String>,
        page_size: usize,
        rate_limit: u32,
        timeout: Duration,
    ) -> Result<Self> {
        let quota = Quota::per_minute(NonZeroU32::new(rate_limit).unwrap_or(DEFAULT_RATE_LIMIT));
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            page_size,
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
        })
    }

    /// Whether an API key is present
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetch article texts for a company, most recent first
    #[instrument(skip(self))]
    pub async fn get_company_news(&self, company_name: &str) -> Result<Vec<String>> {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("NEWS_API_KEY not set - skipping news fetch");
            return Ok(Vec::new());
        };

        self.rate_limiter.until_ready().await;

        let page_size = self.page_size.to_string();
        let response = self
            .client
            .get(EVERYTHING_URL)
            .query(&[
                ("q", company_name),
                ("sortBy", "publishedAt"),
                ("language", "en"),
                ("pageSize", page_size.as_str()),
                ("apiKey", api_key),
            ])
            .send()
            .await
            .map_err(|e| ResearchError::provider(PROVIDER, format!("request failed: {e}")))?;

        let status = response.status();
        let body: EverythingResponse = response
            .json()
            .await
            .map_err(|e| ResearchError::provider(PROVIDER, format!("Failed to parse response: {e}")))?;

        let articles = into_texts(status.is_success(), body)?;
        if articles.is_empty() {
            warn!("No news articles found for {}", company_name);
        } else {
            info!("Fetched {} news articles for {}", articles.len(), company_name);
        }
        Ok(articles)
    }
}

fn into_texts(http_ok: bool, body: EverythingResponse) -> Result<Vec<String>> {
    if !http_ok || body.status != "ok" {
        let message = body.message.unwrap_or_else(|| format!("status '{}'", body.status));
        return Err(ResearchError::provider(PROVIDER, message));
    }

    Ok(body.articles.iter().filter_map(NewsArticle::to_text).collect())
}

#[async_trait]
impl NewsCollector for NewsApiClient {
    async fn fetch(&self, query: &str) -> Result<Vec<String>> {
        self.get_company_news(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(key: Option<&str>) -> NewsApiClient {
        NewsApiClient::new(key.map(String::from), 5, 60, Duration::from_secs(10)).unwrap()
    }

    #[test]
    fn test_client_creation() {
        assert!(client(Some("test_key")).is_configured());
        assert!(!client(Some("  ")).is_configured());
        assert!(!client(None).is_configured());
    }

    #[test]
    fn test_unconfigured_returns_empty() {
        let articles = tokio_test::block_on(client(None).fetch("Apple")).unwrap();
        assert!(articles.is_empty());
    }

    #[test]
    fn test_article_text() {
        let full = NewsArticle {
            title: Some("Apple beats estimates".to_string()),
            description: Some("Record iPhone sales".to_string()),
        };
        assert_eq!(full.to_text().as_deref(), Some("Apple beats estimates. Record iPhone sales"));

        let title_only = NewsArticle {
            title: Some("Apple beats estimates".to_string()),
            description: None,
        };
        assert_eq!(title_only.to_text().as_deref(), Some("Apple beats estimates"));

        let untitled = NewsArticle {
            title: None,
            description: Some("orphan".to_string()),
        };
        assert_eq!(untitled.to_text(), None);
    }

    #[test]
    fn test_error_status_is_provider_error() {
        let body: EverythingResponse = serde_json::from_value(serde_json::json!({
            "status": "error",
            "code": "apiKeyInvalid",
            "message": "Your API key is invalid"
        }))
        .unwrap();

        let err = into_texts(false, body).unwrap_err();
        assert!(matches!(err, ResearchError::Provider { .. }));
        assert!(err.to_string().contains("invalid"));
    }

    #[test]
    fn test_ok_body_keeps_order() {
        let body: EverythingResponse = serde_json::from_value(serde_json::json!({
            "status": "ok",
            "articles": [
                {"title": "newest", "description": null},
                {"title": null, "description": "skipped"},
                {"title": "older", "description": "detail"}
            ]
        }))
        .unwrap();

        assert_eq!(into_texts(true, body).unwrap(), vec!["newest", "older. detail"]);
    }
}
