use serde::{Deserialize, Serialize};

use super::{change, moving_average, percent_change, percent_deviation, sma_points};
use crate::{ClosePoint, IndicatorError, Percent, Symbol, TimeSeriesPoint};

/// Periods used by the compact quote card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryParams {
    /// Weekly SMA drawn on the card chart and compared against the price.
    pub fast_sma_period: usize,
    /// Long weekly SMA compared against the price.
    pub slow_sma_period: usize,
    /// Trailing daily samples spanned by the "week" change.
    pub week_window: usize,
}

impl Default for SummaryParams {
    fn default() -> Self {
        Self {
            fast_sma_period: 50,
            slow_sma_period: 200,
            week_window: 7,
        }
    }
}

/// Per-symbol card: price moves, weekly chart, and distance from the long SMAs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteSummary {
    pub symbol: Symbol,
    pub current_price: f64,
    pub day_change: f64,
    pub day_change_percent: Percent,
    pub week_change: f64,
    pub week_change_percent: Percent,
    /// Weekly closes for the card chart.
    pub chart_prices: Vec<TimeSeriesPoint>,
    /// Fast weekly SMA aligned with `chart_prices`.
    pub chart_sma: Vec<TimeSeriesPoint>,
    pub vs_fast_sma: Percent,
    pub vs_slow_sma: Percent,
    pub is_positive: bool,
    pub is_week_positive: bool,
}

impl QuoteSummary {
    /// Build the card from already-ingested daily and weekly closes.
    ///
    /// `live_price` is the provider's current price; when it is missing the
    /// latest daily close stands in. The previous close is the second-to-last
    /// daily close and the week reference is `week_window` samples back,
    /// clamped to the oldest available.
    ///
    /// # Errors
    ///
    /// [`IndicatorError::InsufficientData`] with fewer than two daily closes
    /// or no weekly closes; [`IndicatorError::DegenerateReference`] when a
    /// reference price or moving average is zero.
    pub fn compute(
        symbol: Symbol,
        live_price: Option<f64>,
        daily: &[ClosePoint],
        weekly: &[ClosePoint],
        params: &SummaryParams,
    ) -> Result<Self, IndicatorError> {
        if daily.len() < 2 {
            return Err(IndicatorError::InsufficientData {
                series: "daily",
                required: 2,
                available: daily.len(),
            });
        }
        if weekly.is_empty() {
            return Err(IndicatorError::InsufficientData {
                series: "weekly",
                required: 1,
                available: 0,
            });
        }

        let last = daily.len() - 1;
        let current_price = live_price.unwrap_or(daily[last].close);

        let previous_close = daily[last - 1].close;
        let day_change = change(current_price, previous_close)?;
        let day_change_percent = percent_change(current_price, previous_close)?;

        let week_reference = daily[daily.len().saturating_sub(params.week_window.max(1))].close;
        let week_change = change(current_price, week_reference)?;
        let week_change_percent = percent_change(current_price, week_reference)?;

        let weekly_closes: Vec<f64> = weekly.iter().map(|point| point.close).collect();
        let fast_sma = moving_average(&weekly_closes, params.fast_sma_period).ok_or(
            IndicatorError::InsufficientData {
                series: "weekly",
                required: 1,
                available: 0,
            },
        )?;
        let slow_sma = moving_average(&weekly_closes, params.slow_sma_period).ok_or(
            IndicatorError::InsufficientData {
                series: "weekly",
                required: 1,
                available: 0,
            },
        )?;

        let chart_prices = weekly
            .iter()
            .map(|point| TimeSeriesPoint::new(point.timestamp, Some(point.close)))
            .collect();

        Ok(Self {
            symbol,
            current_price,
            day_change,
            day_change_percent: Percent::new(day_change_percent),
            week_change,
            week_change_percent: Percent::new(week_change_percent),
            chart_prices,
            chart_sma: sma_points(weekly, params.fast_sma_period),
            vs_fast_sma: Percent::new(percent_deviation(current_price, fast_sma)?),
            vs_slow_sma: Percent::new(percent_deviation(current_price, slow_sma)?),
            is_positive: day_change >= 0.0,
            is_week_positive: week_change >= 0.0,
        })
    }
}
