//! Request and error types for the chart data source.
//!
//! A [`ChartRequest`] names one `(symbol, range, interval)` resource on the
//! provider. Its URL doubles as the response cache key, so two requests that
//! render the same URL share one cache entry.
//!
//! Every failure on the way to the provider and back is reported as a
//! [`SourceError`]. The kind tells callers whether the symbol is unknown
//! ([`SourceErrorKind::Provider`]), the upstream misbehaved
//! ([`SourceErrorKind::HttpStatus`], [`SourceErrorKind::Transport`]), or the
//! payload could not be understood ([`SourceErrorKind::Parse`]).

use std::fmt::{Display, Formatter};

use crate::{ChartRange, Interval, Symbol, ValidationError};

/// Source-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// The request never produced a response (connect failure, reset, body read).
    Transport,
    /// The request or queued task ran past its deadline.
    Timeout,
    /// The provider answered with a non-success HTTP status.
    HttpStatus,
    /// The provider answered successfully but reported an error in the payload.
    Provider,
    /// The payload was not the expected chart document.
    Parse,
    /// The request scheduler is no longer accepting work, or a queued task aborted.
    Unavailable,
}

/// Structured source error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
    status: Option<u16>,
}

impl SourceError {
    pub fn transport(message: impl Into<String>, retryable: bool) -> Self {
        Self {
            kind: SourceErrorKind::Transport,
            message: message.into(),
            retryable,
            status: None,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Timeout,
            message: message.into(),
            retryable: true,
            status: None,
        }
    }

    /// Non-success status; the message embeds both the code and its reason phrase.
    pub fn http_status(status: u16) -> Self {
        let reason = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or("Unknown Status");
        Self {
            kind: SourceErrorKind::HttpStatus,
            message: format!("API error: {status} {reason}"),
            retryable: true,
            status: Some(status),
        }
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Provider,
            message: message.into(),
            retryable: false,
            status: None,
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Parse,
            message: message.into(),
            retryable: false,
            status: None,
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
            retryable: false,
            status: None,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    /// HTTP status for [`SourceErrorKind::HttpStatus`] errors.
    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Transport => "source.transport",
            SourceErrorKind::Timeout => "source.timeout",
            SourceErrorKind::HttpStatus => "source.http_status",
            SourceErrorKind::Provider => "source.provider",
            SourceErrorKind::Parse => "source.parse",
            SourceErrorKind::Unavailable => "source.unavailable",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// One chart resource on the provider: a symbol sampled at `interval` over `range`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChartRequest {
    pub symbol: Symbol,
    pub range: ChartRange,
    pub interval: Interval,
}

impl ChartRequest {
    /// Builds a request, rejecting intervals the provider does not serve for `range`.
    pub fn new(
        symbol: Symbol,
        range: ChartRange,
        interval: Interval,
    ) -> Result<Self, ValidationError> {
        if !range.supports(interval) {
            return Err(ValidationError::UnsupportedInterval {
                range: range.to_string(),
                interval: interval.to_string(),
            });
        }

        Ok(Self {
            symbol,
            range,
            interval,
        })
    }

    /// Provider URL for this request. Also used verbatim as the cache key.
    pub fn url(&self, base_url: &str) -> String {
        format!(
            "{}/v8/finance/chart/{}?range={}&interval={}&indicators=quote&includeTimestamps=true",
            base_url.trim_end_matches('/'),
            urlencoding::encode(self.symbol.as_str()),
            self.range,
            self.interval
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(raw: &str) -> Symbol {
        Symbol::parse(raw).expect("valid symbol")
    }

    #[test]
    fn http_status_error_embeds_code_and_reason() {
        let error = SourceError::http_status(404);
        assert_eq!(error.kind(), SourceErrorKind::HttpStatus);
        assert_eq!(error.message(), "API error: 404 Not Found");
        assert_eq!(error.status(), Some(404));
        assert_eq!(error.code(), "source.http_status");
    }

    #[test]
    fn provider_errors_are_not_retryable() {
        let error = SourceError::provider("No data found, symbol may be delisted");
        assert!(!error.retryable());
        assert_eq!(
            error.to_string(),
            "No data found, symbol may be delisted (source.provider)"
        );
    }

    #[test]
    fn chart_request_rejects_daily_bars_for_ten_years() {
        let error = ChartRequest::new(symbol("AAPL"), ChartRange::TenYears, Interval::Daily)
            .expect_err("daily is not served for 10y");
        assert!(matches!(error, ValidationError::UnsupportedInterval { .. }));
    }

    #[test]
    fn chart_request_url_encodes_index_symbols() {
        let request = ChartRequest::new(symbol("^gspc"), ChartRange::OneYear, Interval::Daily)
            .expect("valid request");
        assert_eq!(
            request.url("https://query1.finance.yahoo.com/"),
            "https://query1.finance.yahoo.com/v8/finance/chart/%5EGSPC?range=1y&interval=1d&indicators=quote&includeTimestamps=true"
        );
    }
}
