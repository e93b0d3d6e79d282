//! # Tickboard Core
//!
//! Market-data retrieval and indicator engine behind the tickboard dashboard.
//!
//! ## Overview
//!
//! - **Request scheduling**: one FIFO lane with a pause between provider calls
//! - **Response caching**: URL-keyed bodies with TTL checked on read
//! - **Ingestion**: the provider's loosely typed chart JSON becomes validated bars
//! - **Indicators**: SMAs, cross-granularity interpolation, Bollinger bands,
//!   and the quote card and candlestick views built from them
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | TTL response cache and cache modes |
//! | [`chart_client`] | Cached, optionally retried chart fetches |
//! | [`config`] | `DashboardConfig` loading and environment overrides |
//! | [`data_source`] | Chart requests and structured source errors |
//! | [`domain`] | Symbols, ranges, intervals, price series |
//! | [`error`] | Validation, indicator, config and top-level errors |
//! | [`http_client`] | HTTP transport seam and reqwest implementation |
//! | [`indicators`] | Pure indicator math and view assembly |
//! | [`ingest`] | Provider payload parsing |
//! | [`retry`] | Opt-in retry policy |
//! | [`scheduler`] | Single-lane request queue |
//! | [`service`] | `MarketDataService` facade |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tickboard_core::{DashboardConfig, MarketDataService, Symbol};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = MarketDataService::from_config(&DashboardConfig::default());
//!
//!     let summary = service.quote_summary(&Symbol::parse("AAPL")?).await?;
//!     println!("{} {:.2} ({}%)", summary.symbol, summary.current_price, summary.day_change_percent);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │  CLI / Dashboard    │
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐     ┌──────────────────┐
//! │  MarketDataService  │────▶│ Indicator Engine │
//! └──────────┬──────────┘     └──────────────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │  RequestScheduler   │
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐     ┌──────────────────┐
//! │  ChartClient        │────▶│ CacheStore       │
//! └──────────┬──────────┘     └──────────────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │  HttpClient         │
//! └─────────────────────┘
//! ```

pub mod cache;
pub mod chart_client;
pub mod config;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod indicators;
pub mod ingest;
pub mod retry;
pub mod scheduler;
pub mod service;

pub use cache::{CacheMode, CacheStore};
pub use chart_client::{ChartClient, DEFAULT_BASE_URL};
pub use config::{
    CacheSettings, DashboardConfig, IndicatorSettings, ProviderSettings, RetrySettings,
    SchedulerSettings,
};
pub use data_source::{ChartRequest, SourceError, SourceErrorKind};
pub use domain::{
    format_epoch_date, ChartRange, ChartSeries, ClosePoint, Interval, OhlcBar, Percent, Symbol,
    TimeSeriesPoint,
};
pub use error::{ConfigError, CoreError, IndicatorError, ValidationError};
pub use http_client::{
    HttpClient, HttpError, HttpErrorKind, HttpRequest, HttpResponse, ReqwestHttpClient,
    DEFAULT_USER_AGENT,
};
pub use indicators::{
    bollinger_bands, change, interpolate, moving_average, moving_average_series,
    percent_change, percent_deviation, sma_points, BollingerBands, BundleParams,
    CandlestickBundle, QuoteSummary, SmaOverlay, SmaOverlays, SmaSpec, SummaryParams,
};
pub use ingest::parse_chart;
pub use retry::{Backoff, RetryConfig};
pub use scheduler::{RequestScheduler, SchedulerConfig, SchedulerState};
pub use service::{chart_options, MarketDataService, RangeOption};
