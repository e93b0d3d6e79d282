//! Cached, optionally retried access to the provider's chart endpoint.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::{CacheMode, CacheStore};
use crate::data_source::{ChartRequest, SourceError};
use crate::http_client::{HttpClient, HttpErrorKind, HttpRequest, DEFAULT_USER_AGENT};
use crate::ingest::parse_chart;
use crate::retry::RetryConfig;
use crate::ChartSeries;

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Fetches chart documents through an [`HttpClient`], caching every body
/// that parses into a [`ChartSeries`].
#[derive(Clone)]
pub struct ChartClient {
    http_client: Arc<dyn HttpClient>,
    cache: CacheStore,
    retry: RetryConfig,
    base_url: String,
    timeout_ms: u64,
    user_agent: String,
}

impl ChartClient {
    pub fn new(http_client: Arc<dyn HttpClient>, cache: CacheStore) -> Self {
        Self {
            http_client,
            cache,
            retry: RetryConfig::no_retry(),
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_ms: 10_000,
            user_agent: String::from(DEFAULT_USER_AGENT),
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one chart, consulting the cache according to `mode`.
    ///
    /// A cached body is re-parsed on every hit. Provider errors, HTTP errors
    /// and unparseable bodies are never written to the cache.
    pub async fn fetch_with_cache(
        &self,
        request: &ChartRequest,
        mode: CacheMode,
    ) -> Result<ChartSeries, SourceError> {
        let url = request.url(&self.base_url);

        if mode.reads() {
            if let Some(body) = self.cache.get(&url).await {
                debug!(url = %url, "chart cache hit");
                return parse_chart(&body);
            }
        }

        debug!(url = %url, ?mode, "fetching chart");
        let body = self.fetch_body(&url).await?;
        let series = parse_chart(&body)?;

        if mode.writes() {
            self.cache.put(url, body).await;
        }

        Ok(series)
    }

    async fn fetch_body(&self, url: &str) -> Result<String, SourceError> {
        let mut attempt = 0;
        loop {
            match self.fetch_once(url).await {
                Ok(body) => return Ok(body),
                Err(error) if self.retry.should_retry(&error, attempt) => {
                    let delay = self.retry.delay_for_attempt(attempt);
                    warn!(
                        url,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "chart fetch failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => {
                    warn!(url, attempt, error = %error, "chart fetch failed");
                    return Err(error);
                }
            }
        }
    }

    async fn fetch_once(&self, url: &str) -> Result<String, SourceError> {
        let request = HttpRequest::get(url)
            .with_header("user-agent", self.user_agent.as_str())
            .with_timeout_ms(self.timeout_ms);

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| match e.kind() {
                HttpErrorKind::Timeout => {
                    SourceError::timeout(format!("chart request timed out: {}", e.message()))
                }
                _ => SourceError::transport(
                    format!("chart transport error: {}", e.message()),
                    e.retryable(),
                ),
            })?;

        if !response.is_success() {
            return Err(SourceError::http_status(response.status));
        }

        Ok(response.body)
    }
}
