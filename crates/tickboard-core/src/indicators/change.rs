use crate::IndicatorError;

/// Absolute move from `reference` to `current`.
pub fn change(current: f64, reference: f64) -> Result<f64, IndicatorError> {
    finite("change", current - reference)
}

/// Move from `reference` to `current` as a percentage of `reference`.
pub fn percent_change(current: f64, reference: f64) -> Result<f64, IndicatorError> {
    relative("percent change", current, reference)
}

/// How far `price` sits above (positive) or below (negative) a moving average,
/// in percent of the average.
pub fn percent_deviation(price: f64, moving_average: f64) -> Result<f64, IndicatorError> {
    relative("percent deviation", price, moving_average)
}

fn relative(metric: &'static str, value: f64, reference: f64) -> Result<f64, IndicatorError> {
    if reference == 0.0 {
        return Err(IndicatorError::DegenerateReference { metric });
    }
    finite(metric, (value - reference) / reference * 100.0)
}

fn finite(metric: &'static str, value: f64) -> Result<f64, IndicatorError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(IndicatorError::NonFinite { metric })
    }
}
