//! # Domain Models
//!
//! Canonical types shared by ingestion, the scheduler, and the indicator engine.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated ticker |
//! | [`Interval`] | Sampling granularity (1d, 1wk, 1mo) |
//! | [`ChartRange`] | Look-back window and its valid intervals |
//! | [`OhlcBar`] | Fully populated candle |
//! | [`ClosePoint`] | Closing price used for moving-average history |
//! | [`TimeSeriesPoint`] | Derived sample with an optional value |
//! | [`ChartSeries`] | Validated ingestion result |
//! | [`Percent`] | Full-precision percentage with 2-decimal rendering |
//!
//! All timestamps are epoch milliseconds. The provider speaks epoch seconds;
//! conversion happens once, in [`crate::ingest`].

mod interval;
mod range;
mod series;
mod symbol;

pub use interval::Interval;
pub use range::ChartRange;
pub use series::{
    format_epoch_date, ChartSeries, ClosePoint, OhlcBar, Percent, TimeSeriesPoint,
};
pub use symbol::Symbol;
