use crate::{ClosePoint, TimeSeriesPoint};

/// Average of the last `period` closes, for "current SMA" readings.
///
/// With fewer than `period` closes the period shrinks to what is available,
/// so a young listing still gets an answer. Returns `None` only when there is
/// nothing to average.
pub fn moving_average(closes: &[f64], period: usize) -> Option<f64> {
    let period = period.min(closes.len());
    if period == 0 {
        return None;
    }

    let window = &closes[closes.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Trailing simple moving average aligned index-for-index with `closes`.
///
/// Entries before index `period - 1` are `None`: unlike [`moving_average`],
/// the chart series never averages over a short window. A zero period yields
/// no values at all.
pub fn moving_average_series(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; closes.len()];
    }

    (0..closes.len())
        .map(|index| {
            if index + 1 < period {
                None
            } else {
                let window = &closes[index + 1 - period..=index];
                Some(window.iter().sum::<f64>() / period as f64)
            }
        })
        .collect()
}

/// [`moving_average_series`] stamped with each close's timestamp.
pub fn sma_points(closes: &[ClosePoint], period: usize) -> Vec<TimeSeriesPoint> {
    let values: Vec<f64> = closes.iter().map(|point| point.close).collect();
    closes
        .iter()
        .zip(moving_average_series(&values, period))
        .map(|(point, value)| TimeSeriesPoint::new(point.timestamp, value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_matches_known_values() {
        let series = moving_average_series(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(series, vec![None, None, Some(2.0), Some(3.0), Some(4.0)]);
    }

    #[test]
    fn series_is_all_none_when_history_is_short() {
        let series = moving_average_series(&[1.0, 2.0], 5);
        assert_eq!(series, vec![None, None]);
    }

    #[test]
    fn period_one_series_echoes_input() {
        let closes = [3.5, 7.25, 1.0];
        let series = moving_average_series(&closes, 1);
        assert_eq!(series, vec![Some(3.5), Some(7.25), Some(1.0)]);
    }

    #[test]
    fn zero_period_yields_no_values() {
        assert_eq!(moving_average_series(&[1.0, 2.0], 0), vec![None, None]);
        assert_eq!(moving_average(&[1.0, 2.0], 0), None);
    }

    #[test]
    fn point_average_clamps_period_to_history() {
        assert_eq!(moving_average(&[10.0, 20.0], 5), Some(15.0));
        assert_eq!(moving_average(&[10.0, 20.0, 30.0, 40.0], 2), Some(35.0));
        assert_eq!(moving_average(&[], 5), None);
    }

    #[test]
    fn sma_points_keep_close_timestamps() {
        let closes = [
            ClosePoint { timestamp: 100, close: 2.0 },
            ClosePoint { timestamp: 200, close: 4.0 },
        ];
        let points = sma_points(&closes, 2);
        assert_eq!(
            points,
            vec![TimeSeriesPoint::new(100, None), TimeSeriesPoint::new(200, Some(3.0))]
        );
    }
}
