//! Ingestion boundary for the provider's chart document.
//!
//! The provider returns loosely typed JSON: parallel OHLC arrays that may hold
//! `null` at any index, optional metadata, and either a `result` list or an
//! `error` object. [`parse_chart`] turns that into a validated [`ChartSeries`]
//! or a typed [`SourceError`]; nothing past this module sees the raw shape.

use serde::Deserialize;
use time::OffsetDateTime;

use crate::data_source::SourceError;
use crate::{ChartSeries, ClosePoint, OhlcBar, Symbol};

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ProviderError>,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    meta: Option<ChartMeta>,
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    #[serde(default)]
    indicators: Option<ChartIndicators>,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    symbol: Option<String>,
    #[serde(rename = "regularMarketPrice", default)]
    regular_market_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Default, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Parse and validate one chart response body.
///
/// # Errors
///
/// - [`SourceErrorKind::Parse`](crate::SourceErrorKind::Parse) when the body is
///   not a chart document or carries an unrepresentable timestamp.
/// - [`SourceErrorKind::Provider`](crate::SourceErrorKind::Provider) when the
///   provider reports an error object or returns no result.
pub fn parse_chart(body: &str) -> Result<ChartSeries, SourceError> {
    let envelope: ChartEnvelope = serde_json::from_str(body)
        .map_err(|e| SourceError::parse(format!("failed to parse chart response: {e}")))?;

    if let Some(error) = envelope.chart.error {
        let message = error
            .description
            .filter(|text| !text.trim().is_empty())
            .or(error.code)
            .unwrap_or_else(|| String::from("invalid stock symbol"));
        return Err(SourceError::provider(message));
    }

    let result = envelope
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| SourceError::provider("invalid stock symbol or no data available"))?;

    let (symbol, regular_market_price) = match result.meta {
        Some(meta) => (
            meta.symbol.and_then(|raw| Symbol::parse(&raw).ok()),
            meta.regular_market_price.filter(|price| price.is_finite()),
        ),
        None => (None, None),
    };

    let quote = result
        .indicators
        .and_then(|indicators| indicators.quote.into_iter().next())
        .unwrap_or_default();
    let timestamps = result.timestamp.unwrap_or_default();

    let mut bars = Vec::with_capacity(timestamps.len());
    let mut closes = Vec::with_capacity(timestamps.len());
    for (index, &seconds) in timestamps.iter().enumerate() {
        let timestamp = epoch_seconds_to_millis(seconds)?;
        let close = sample(&quote.close, index);

        if let Some(close) = close {
            closes.push(ClosePoint { timestamp, close });
        }

        if let (Some(open), Some(high), Some(low), Some(close)) = (
            sample(&quote.open, index),
            sample(&quote.high, index),
            sample(&quote.low, index),
            close,
        ) {
            bars.push(OhlcBar {
                timestamp,
                open,
                high,
                low,
                close,
            });
        }
    }

    Ok(ChartSeries {
        symbol,
        regular_market_price,
        bars,
        closes,
    })
}

// Short arrays read as nulls past their end.
fn sample(values: &[Option<f64>], index: usize) -> Option<f64> {
    values
        .get(index)
        .copied()
        .flatten()
        .filter(|value| value.is_finite())
}

fn epoch_seconds_to_millis(seconds: i64) -> Result<i64, SourceError> {
    OffsetDateTime::from_unix_timestamp(seconds)
        .map_err(|e| SourceError::parse(format!("invalid timestamp {seconds}: {e}")))?;
    seconds
        .checked_mul(1000)
        .ok_or_else(|| SourceError::parse(format!("timestamp {seconds} overflows milliseconds")))
}
