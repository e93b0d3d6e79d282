//! Dashboard configuration.
//!
//! Every field carries a serde default, so an empty JSON object (or a file
//! written by an older build) loads cleanly. A handful of settings can also
//! be overridden from the environment:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `TICKBOARD_BASE_URL` | `provider.base_url` |
//! | `TICKBOARD_REQUEST_DELAY_MS` | `scheduler.request_delay_ms` |
//! | `TICKBOARD_CACHE_TTL_SECS` | `cache.ttl_secs` |

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::http_client::DEFAULT_USER_AGENT;
use crate::indicators::{BundleParams, SummaryParams};
use crate::retry::{Backoff, RetryConfig};
use crate::scheduler::SchedulerConfig;
use crate::ConfigError;

pub const ENV_BASE_URL: &str = "TICKBOARD_BASE_URL";
pub const ENV_REQUEST_DELAY_MS: &str = "TICKBOARD_REQUEST_DELAY_MS";
pub const ENV_CACHE_TTL_SECS: &str = "TICKBOARD_CACHE_TTL_SECS";

fn default_base_url() -> String {
    String::from("https://query1.finance.yahoo.com")
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_user_agent() -> String {
    String::from(DEFAULT_USER_AGENT)
}

fn default_request_delay_ms() -> u64 {
    500
}

fn default_ttl_secs() -> u64 {
    300
}

fn default_base_delay_ms() -> u64 {
    500
}

/// Where chart data comes from and how each HTTP call is made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request HTTP timeout.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: default_request_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerSettings {
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
    /// Deadline for one queued task. Absent means no deadline.
    #[serde(default)]
    pub task_timeout_ms: Option<u64>,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            request_delay_ms: default_request_delay_ms(),
            task_timeout_ms: None,
        }
    }
}

impl SchedulerSettings {
    pub fn to_scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            request_delay: Duration::from_millis(self.request_delay_ms),
            task_timeout: self.task_timeout_ms.map(Duration::from_millis),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Zero disables caching.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default)]
    pub max_entries: Option<usize>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            max_entries: None,
        }
    }
}

impl CacheSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// Retry settings. `max_retries = 0` keeps the fail-fast default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrySettings {
    #[serde(default)]
    pub max_retries: u32,
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    #[serde(default)]
    pub jitter: bool,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: 0,
            base_delay_ms: default_base_delay_ms(),
            jitter: false,
        }
    }
}

impl RetrySettings {
    pub fn to_retry_config(&self) -> RetryConfig {
        if self.max_retries == 0 {
            return RetryConfig::no_retry();
        }

        let mut config = RetryConfig::exponential(self.max_retries);
        if let Backoff::Exponential { base, jitter, .. } = &mut config.backoff {
            *base = Duration::from_millis(self.base_delay_ms);
            *jitter = self.jitter;
        }
        config
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IndicatorSettings {
    #[serde(default)]
    pub summary: SummaryParams,
    #[serde(default)]
    pub bundle: BundleParams,
}

/// Top-level configuration for a [`MarketDataService`](crate::MarketDataService).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub provider: ProviderSettings,
    #[serde(default)]
    pub scheduler: SchedulerSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub retry: RetrySettings,
    #[serde(default)]
    pub indicators: IndicatorSettings,
}

impl DashboardConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        config
            .indicators
            .bundle
            .validate()
            .map_err(|source| ConfigError::Indicators {
                path: path.display().to_string(),
                source,
            })?;

        info!(
            path = %path.display(),
            base_url = %config.provider.base_url,
            request_delay_ms = config.scheduler.request_delay_ms,
            cache_ttl_secs = config.cache.ttl_secs,
            "dashboard config loaded"
        );

        Ok(config)
    }

    /// Apply `TICKBOARD_*` overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides_with(|name| std::env::var(name).ok())
    }

    /// Apply overrides looked up through `lookup` instead of the environment.
    pub fn apply_overrides_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|value| !value.trim().is_empty()) {
            self.provider.base_url = base_url.trim().to_owned();
        }
        if let Some(raw) = lookup(ENV_REQUEST_DELAY_MS) {
            self.scheduler.request_delay_ms = parse_override(ENV_REQUEST_DELAY_MS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_CACHE_TTL_SECS) {
            self.cache.ttl_secs = parse_override(ENV_CACHE_TTL_SECS, &raw)?;
        }
        Ok(())
    }
}

fn parse_override(name: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidOverride {
            name,
            value: raw.to_owned(),
        })
}
