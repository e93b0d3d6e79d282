use serde::Serialize;

use crate::{OhlcBar, TimeSeriesPoint};

/// Upper, middle and lower bands, each aligned index-for-index with the bars
/// they were computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BollingerBands {
    pub upper: Vec<TimeSeriesPoint>,
    pub middle: Vec<TimeSeriesPoint>,
    pub lower: Vec<TimeSeriesPoint>,
}

impl BollingerBands {
    pub fn len(&self) -> usize {
        self.middle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.middle.is_empty()
    }
}

/// Bollinger bands over the trailing `period` closes of `bars`.
///
/// The middle band is the simple moving average and the width is
/// `num_std_dev` population standard deviations (divisor `period`). The first
/// `period - 1` entries of every band are `None`.
pub fn bollinger_bands(bars: &[OhlcBar], period: usize, num_std_dev: f64) -> BollingerBands {
    let mut upper = Vec::with_capacity(bars.len());
    let mut middle = Vec::with_capacity(bars.len());
    let mut lower = Vec::with_capacity(bars.len());

    for (index, bar) in bars.iter().enumerate() {
        if period == 0 || index + 1 < period {
            upper.push(TimeSeriesPoint::empty(bar.timestamp));
            middle.push(TimeSeriesPoint::empty(bar.timestamp));
            lower.push(TimeSeriesPoint::empty(bar.timestamp));
            continue;
        }

        let window = &bars[index + 1 - period..=index];
        let n = period as f64;
        let mean = window.iter().map(|bar| bar.close).sum::<f64>() / n;
        let variance = window
            .iter()
            .map(|bar| {
                let diff = bar.close - mean;
                diff * diff
            })
            .sum::<f64>()
            / n;
        let width = num_std_dev * variance.sqrt();

        upper.push(TimeSeriesPoint::new(bar.timestamp, Some(mean + width)));
        middle.push(TimeSeriesPoint::new(bar.timestamp, Some(mean)));
        lower.push(TimeSeriesPoint::new(bar.timestamp, Some(mean - width)));
    }

    BollingerBands {
        upper,
        middle,
        lower,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bars(closes: &[f64]) -> Vec<OhlcBar> {
        closes
            .iter()
            .enumerate()
            .map(|(index, &close)| OhlcBar {
                timestamp: index as i64 * 86_400_000,
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
            })
            .collect()
    }

    #[test]
    fn leading_entries_are_none_until_the_window_fills() {
        let bands = bollinger_bands(&bars(&[1.0, 2.0, 3.0, 4.0]), 3, 2.0);

        assert_eq!(bands.len(), 4);
        for series in [&bands.upper, &bands.middle, &bands.lower] {
            assert!(series[0].value.is_none());
            assert!(series[1].value.is_none());
            assert!(series[2].value.is_some());
        }
    }

    #[test]
    fn uses_population_standard_deviation() {
        // Window [2, 4, 4, 4, 5, 5, 7, 9]: mean 5, population sd 2.
        let bands = bollinger_bands(&bars(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]), 8, 2.0);

        assert_eq!(bands.middle[7].value, Some(5.0));
        assert_eq!(bands.upper[7].value, Some(9.0));
        assert_eq!(bands.lower[7].value, Some(1.0));
    }

    #[test]
    fn bands_are_ordered_wherever_defined() {
        let closes = [10.0, 12.5, 9.75, 14.0, 13.0, 8.0, 11.0, 15.5, 7.25, 10.0];
        let bands = bollinger_bands(&bars(&closes), 4, 2.0);

        for index in 0..bands.len() {
            if let (Some(lower), Some(middle), Some(upper)) = (
                bands.lower[index].value,
                bands.middle[index].value,
                bands.upper[index].value,
            ) {
                assert!(lower <= middle && middle <= upper, "index {index}");
            }
        }
    }

    #[test]
    fn flat_prices_collapse_the_bands() {
        let bands = bollinger_bands(&bars(&[5.0; 6]), 3, 2.0);
        assert_eq!(bands.upper[5].value, Some(5.0));
        assert_eq!(bands.lower[5].value, Some(5.0));
    }

    #[test]
    fn timestamps_follow_the_bars() {
        let input = bars(&[1.0, 2.0]);
        let bands = bollinger_bands(&input, 20, 2.0);
        let stamps: Vec<i64> = bands.upper.iter().map(|point| point.timestamp).collect();
        assert_eq!(stamps, vec![0, 86_400_000]);
    }
}
