use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize, Serializer};
use time::OffsetDateTime;

use crate::Symbol;

/// One sample of a derived series. `None` means "not computable yet" or
/// "missing from the source"; it is never a stand-in for zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub value: Option<f64>,
}

impl TimeSeriesPoint {
    pub const fn new(timestamp: i64, value: Option<f64>) -> Self {
        Self { timestamp, value }
    }

    pub const fn empty(timestamp: i64) -> Self {
        Self::new(timestamp, None)
    }
}

/// A fully populated candle. Samples with any missing price never become a bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcBar {
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// A closing price kept for moving-average history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClosePoint {
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub close: f64,
}

/// Validated result of ingesting one chart response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub symbol: Option<Symbol>,
    pub regular_market_price: Option<f64>,
    pub bars: Vec<OhlcBar>,
    /// Every sample with a close, including ones dropped from `bars`.
    pub closes: Vec<ClosePoint>,
}

/// Percentage kept at full precision, rendered with exactly two decimals.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Percent(f64);

impl Percent {
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> f64 {
        self.0
    }
}

impl Display for Percent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Percent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Renders epoch milliseconds as a `YYYY-MM-DD` UTC date for diagnostics.
pub fn format_epoch_date(timestamp_ms: i64) -> String {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(timestamp_ms) * 1_000_000)
        .map(|moment| moment.date().to_string())
        .unwrap_or_else(|_| String::from("<out of range>"))
}
