use serde::{Deserialize, Serialize};

use super::{bollinger_bands, interpolate, sma_points, BollingerBands};
use crate::{ChartRange, ClosePoint, IndicatorError, Interval, OhlcBar, Symbol, TimeSeriesPoint};

/// One overlay SMA: `period` samples of `source`-granularity closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmaSpec {
    pub period: usize,
    pub source: Interval,
}

impl SmaSpec {
    pub const fn weekly(period: usize) -> Self {
        Self {
            period,
            source: Interval::Weekly,
        }
    }

    pub const fn monthly(period: usize) -> Self {
        Self {
            period,
            source: Interval::Monthly,
        }
    }

    /// Legend label such as `50W` or `60M`.
    pub fn label(&self) -> String {
        format!("{}{}", self.period, self.source.label_suffix())
    }

    /// Label when drawn over `candles`. A daily-source overlay averages the
    /// candles themselves, so it is named after their interval.
    pub fn label_on(&self, candles: Interval) -> String {
        match self.source {
            Interval::Daily => format!("{}{}", self.period, candles.label_suffix()),
            _ => self.label(),
        }
    }
}

/// Overlay and band settings for the detailed chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BundleParams {
    pub fast: SmaSpec,
    pub medium: SmaSpec,
    pub slow: SmaSpec,
    pub bollinger_period: usize,
    pub bollinger_std_dev: f64,
}

impl BundleParams {
    /// Reject a band multiplier that would reorder or poison the bands.
    pub fn validate(&self) -> Result<(), IndicatorError> {
        let value = self.bollinger_std_dev;
        if !value.is_finite() || value < 0.0 {
            return Err(IndicatorError::InvalidParameter {
                name: "bollinger_std_dev",
                value,
            });
        }
        Ok(())
    }
}

impl Default for BundleParams {
    fn default() -> Self {
        Self {
            fast: SmaSpec::weekly(50),
            medium: SmaSpec::weekly(200),
            slow: SmaSpec::monthly(60),
            bollinger_period: 20,
            bollinger_std_dev: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmaOverlay {
    pub label: String,
    pub period: usize,
    pub source: Interval,
    /// One point per candle.
    pub points: Vec<TimeSeriesPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmaOverlays {
    pub fast: SmaOverlay,
    pub medium: SmaOverlay,
    pub slow: SmaOverlay,
}

impl SmaOverlays {
    pub fn iter(&self) -> impl Iterator<Item = &SmaOverlay> {
        [&self.fast, &self.medium, &self.slow].into_iter()
    }
}

/// Candles for the requested window plus every series drawn over them.
///
/// Every overlay point and band point shares its index and timestamp with
/// the candle at the same position in `bars`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandlestickBundle {
    pub symbol: Symbol,
    pub range: ChartRange,
    pub interval: Interval,
    pub bars: Vec<OhlcBar>,
    pub overlays: SmaOverlays,
    pub bollinger: BollingerBands,
}

impl CandlestickBundle {
    /// Compute the overlays from long weekly and monthly histories and lay
    /// them onto the candle grid.
    ///
    /// SMAs are computed at their native granularity first and only then
    /// interpolated, so a 200-week average is still a 200-week average when
    /// the candles are daily. An overlay whose source is [`Interval::Daily`]
    /// averages the candle closes themselves and is labelled by `interval`.
    pub fn assemble(
        symbol: Symbol,
        range: ChartRange,
        interval: Interval,
        bars: Vec<OhlcBar>,
        weekly: &[ClosePoint],
        monthly: &[ClosePoint],
        params: &BundleParams,
    ) -> Result<Self, IndicatorError> {
        params.validate()?;
        let grid: Vec<i64> = bars.iter().map(|bar| bar.timestamp).collect();
        let candle_closes: Vec<ClosePoint> = bars
            .iter()
            .map(|bar| ClosePoint {
                timestamp: bar.timestamp,
                close: bar.close,
            })
            .collect();

        let overlay = |spec: SmaSpec| {
            let source = match spec.source {
                Interval::Daily => candle_closes.as_slice(),
                Interval::Weekly => weekly,
                Interval::Monthly => monthly,
            };
            SmaOverlay {
                label: spec.label_on(interval),
                period: spec.period,
                source: spec.source,
                points: interpolate(&sma_points(source, spec.period), &grid),
            }
        };

        let overlays = SmaOverlays {
            fast: overlay(params.fast),
            medium: overlay(params.medium),
            slow: overlay(params.slow),
        };
        let bollinger = bollinger_bands(&bars, params.bollinger_period, params.bollinger_std_dev);

        let bundle = Self {
            symbol,
            range,
            interval,
            bars,
            overlays,
            bollinger,
        };
        bundle.check_alignment(&grid)?;
        Ok(bundle)
    }

    fn check_alignment(&self, grid: &[i64]) -> Result<(), IndicatorError> {
        let bands = [
            ("bollinger upper", &self.bollinger.upper),
            ("bollinger middle", &self.bollinger.middle),
            ("bollinger lower", &self.bollinger.lower),
        ];
        let overlays = self
            .overlays
            .iter()
            .map(|overlay| (overlay.label.as_str(), &overlay.points));

        for (name, points) in overlays.chain(bands) {
            let aligned = points.len() == grid.len()
                && points
                    .iter()
                    .zip(grid)
                    .all(|(point, &timestamp)| point.timestamp == timestamp);
            if !aligned {
                return Err(IndicatorError::Misaligned {
                    series: name.to_owned(),
                    expected: grid.len(),
                    actual: points.len(),
                });
            }
        }
        Ok(())
    }
}
