//! The dashboard facade.
//!
//! A [`MarketDataService`] is built explicitly from a [`DashboardConfig`] and
//! owns one request queue and one response cache for its whole lifetime.
//! Every lookup it performs goes through that queue, and every view it
//! returns is recomputed from (possibly cached) provider data.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::cache::{CacheMode, CacheStore};
use crate::chart_client::ChartClient;
use crate::config::DashboardConfig;
use crate::data_source::{ChartRequest, SourceError};
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::indicators::{BundleParams, CandlestickBundle, QuoteSummary, SummaryParams};
use crate::scheduler::RequestScheduler;
use crate::{
    format_epoch_date, ChartRange, CoreError, Interval, Symbol, TimeSeriesPoint, ValidationError,
};

/// One row of the chart view's range picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeOption {
    pub range: ChartRange,
    pub intervals: Vec<Interval>,
    pub default_interval: Interval,
}

pub struct MarketDataService {
    client: ChartClient,
    scheduler: RequestScheduler,
    summary_params: SummaryParams,
    bundle_params: BundleParams,
}

impl MarketDataService {
    /// Build a service over `http_client`.
    ///
    /// Spawns the request worker, so this must run inside a Tokio runtime.
    pub fn new(config: &DashboardConfig, http_client: Arc<dyn HttpClient>) -> Self {
        let cache = CacheStore::with_capacity(config.cache.ttl(), config.cache.max_entries);
        let client = ChartClient::new(http_client, cache)
            .with_retry(config.retry.to_retry_config())
            .with_base_url(config.provider.base_url.clone())
            .with_timeout_ms(config.provider.request_timeout_ms)
            .with_user_agent(config.provider.user_agent.clone());
        let scheduler = RequestScheduler::new(config.scheduler.to_scheduler_config());

        info!(
            base_url = %config.provider.base_url,
            request_delay_ms = config.scheduler.request_delay_ms,
            cache_ttl_secs = config.cache.ttl_secs,
            retries = config.retry.max_retries,
            "market data service started"
        );

        Self {
            client,
            scheduler,
            summary_params: config.indicators.summary,
            bundle_params: config.indicators.bundle,
        }
    }

    /// Build a service that talks to the real provider over reqwest.
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config, Arc::new(ReqwestHttpClient::new()))
    }

    pub fn cache(&self) -> &CacheStore {
        self.client.cache()
    }

    pub fn scheduler(&self) -> &RequestScheduler {
        &self.scheduler
    }

    /// Card view for `symbol`: one month of daily closes for the price moves
    /// and four years of weekly closes for the chart and long SMAs.
    pub async fn quote_summary(&self, symbol: &Symbol) -> Result<QuoteSummary, CoreError> {
        let daily_request = ChartRequest::new(symbol.clone(), ChartRange::OneMonth, Interval::Daily)?;
        let weekly_request =
            ChartRequest::new(symbol.clone(), ChartRange::FourYears, Interval::Weekly)?;

        let client = self.client.clone();
        let (daily, weekly) = self
            .scheduler
            .enqueue(move || async move {
                let daily = client
                    .fetch_with_cache(&daily_request, CacheMode::Use)
                    .await?;
                let weekly = client
                    .fetch_with_cache(&weekly_request, CacheMode::Use)
                    .await?;
                Ok::<_, SourceError>((daily, weekly))
            })
            .await?;

        let summary = QuoteSummary::compute(
            symbol.clone(),
            daily.regular_market_price,
            &daily.closes,
            &weekly.closes,
            &self.summary_params,
        )?;
        debug!(
            symbol = %symbol,
            price = summary.current_price,
            day_change_percent = %summary.day_change_percent,
            "quote summary computed"
        );
        Ok(summary)
    }

    /// Detailed chart view: candles for `(range, interval)` with SMA overlays
    /// computed from twenty years of weekly and all-time monthly closes.
    pub async fn candlestick_bundle(
        &self,
        symbol: &Symbol,
        range: ChartRange,
        interval: Interval,
    ) -> Result<CandlestickBundle, CoreError> {
        if !range.is_selectable() {
            return Err(ValidationError::RangeNotSelectable {
                value: range.to_string(),
            }
            .into());
        }
        let candle_request = ChartRequest::new(symbol.clone(), range, interval)?;
        let weekly_request =
            ChartRequest::new(symbol.clone(), ChartRange::TwentyYears, Interval::Weekly)?;
        let monthly_request = ChartRequest::new(symbol.clone(), ChartRange::Max, Interval::Monthly)?;

        let client = self.client.clone();
        let (candles, weekly, monthly) = self
            .scheduler
            .enqueue(move || async move {
                let candles = client
                    .fetch_with_cache(&candle_request, CacheMode::Use)
                    .await?;
                let weekly = client
                    .fetch_with_cache(&weekly_request, CacheMode::Use)
                    .await?;
                let monthly = client
                    .fetch_with_cache(&monthly_request, CacheMode::Use)
                    .await?;
                Ok::<_, SourceError>((candles, weekly, monthly))
            })
            .await?;

        debug!(
            symbol = %symbol,
            candles = candles.bars.len(),
            candle_span = %span(candles.bars.iter().map(|bar| bar.timestamp)),
            weekly = weekly.closes.len(),
            weekly_span = %span(weekly.closes.iter().map(|point| point.timestamp)),
            monthly = monthly.closes.len(),
            monthly_span = %span(monthly.closes.iter().map(|point| point.timestamp)),
            "chart data available"
        );

        let bundle = CandlestickBundle::assemble(
            symbol.clone(),
            range,
            interval,
            candles.bars,
            &weekly.closes,
            &monthly.closes,
            &self.bundle_params,
        )?;

        for overlay in bundle.overlays.iter() {
            debug!(
                symbol = %symbol,
                overlay = %overlay.label,
                valid = overlay.points.iter().filter(|point| point.value.is_some()).count(),
                total = overlay.points.len(),
                first_valid = %first_valid(&overlay.points),
                "overlay interpolated"
            );
        }

        Ok(bundle)
    }

    /// Drop every cached response so the next lookups hit the provider.
    pub async fn refresh_all(&self) {
        let dropped = self.client.cache().len().await;
        self.client.cache().clear().await;
        info!(dropped, "chart cache cleared");
    }

    /// Ranges the chart view offers, with their valid and default intervals.
    pub fn chart_options(&self) -> Vec<RangeOption> {
        chart_options()
    }
}

pub fn chart_options() -> Vec<RangeOption> {
    ChartRange::SELECTABLE
        .iter()
        .map(|&range| RangeOption {
            range,
            intervals: range.valid_intervals().to_vec(),
            default_interval: range.default_interval(),
        })
        .collect()
}

fn span(mut timestamps: impl Iterator<Item = i64>) -> String {
    match timestamps.next() {
        Some(first) => {
            let last = timestamps.last().unwrap_or(first);
            format!("{} to {}", format_epoch_date(first), format_epoch_date(last))
        }
        None => String::from("none"),
    }
}

fn first_valid(points: &[TimeSeriesPoint]) -> String {
    points
        .iter()
        .find(|point| point.value.is_some())
        .map(|point| format_epoch_date(point.timestamp))
        .unwrap_or_else(|| String::from("none"))
}
