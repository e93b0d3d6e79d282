use thiserror::Error;

use crate::data_source::SourceError;

/// Validation errors raised while constructing domain values and requests.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter, digit or '^': '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("invalid interval '{value}', expected one of 1d, 1wk, 1mo")]
    InvalidInterval { value: String },
    #[error("invalid range '{value}', expected one of 1mo, 6mo, 1y, 4y, 5y, 10y, 20y, max")]
    InvalidRange { value: String },
    #[error("interval '{interval}' is not available for range '{range}'")]
    UnsupportedInterval { range: String, interval: String },
    #[error("range '{value}' cannot be selected for the chart view")]
    RangeNotSelectable { value: String },
}

/// Failures of the indicator math that must never leak out as NaN or infinity.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("not enough {series} history: need {required} valid closes, found {available}")]
    InsufficientData {
        series: &'static str,
        required: usize,
        available: usize,
    },
    #[error("cannot compute {metric}: reference value is zero")]
    DegenerateReference { metric: &'static str },
    #[error("{metric} produced a non-finite value")]
    NonFinite { metric: &'static str },
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("aligned series '{series}' has {actual} points, expected {expected}")]
    Misaligned {
        series: String,
        expected: usize,
        actual: usize,
    },
}

/// Errors raised while loading [`DashboardConfig`](crate::DashboardConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config from {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid indicator settings in {path}: {source}")]
    Indicators {
        path: String,
        #[source]
        source: IndicatorError,
    },
    #[error("environment override {name}='{value}' is not valid")]
    InvalidOverride { name: &'static str, value: String },
}

/// Top-level error type for service entry points.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Indicator(#[from] IndicatorError),
}
