//! Shared fixtures for the behavior tests: a recording HTTP double and
//! builders for provider chart documents.

#![allow(dead_code)]

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tickboard_core::{
    DashboardConfig, HttpClient, HttpError, HttpRequest, HttpResponse, MarketDataService,
};

pub const BASE_URL: &str = "http://provider.test";
pub const DAY_SECS: i64 = 86_400;
pub const WEEK_SECS: i64 = 7 * DAY_SECS;
pub const MONTH_SECS: i64 = 30 * DAY_SECS;

/// Query fragments that identify each fetch the service makes.
pub const DAILY_1MO: &str = "range=1mo&interval=1d";
pub const WEEKLY_4Y: &str = "range=4y&interval=1wk";
pub const WEEKLY_20Y: &str = "range=20y&interval=1wk";
pub const MONTHLY_MAX: &str = "range=max&interval=1mo";

struct Route {
    pattern: String,
    response: Result<HttpResponse, HttpError>,
}

/// HTTP double that answers from a route table and records every request.
///
/// Routes are matched in insertion order against the request URL. A request
/// that matches nothing gets a connect error.
#[derive(Default)]
pub struct RecordingHttpClient {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingHttpClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn route(&self, pattern: &str, response: Result<HttpResponse, HttpError>) -> &Self {
        self.routes
            .lock()
            .expect("route table should not be poisoned")
            .push(Route {
                pattern: pattern.to_owned(),
                response,
            });
        self
    }

    pub fn route_json(&self, pattern: &str, body: String) -> &Self {
        self.route(pattern, Ok(HttpResponse::ok_json(body)))
    }

    pub fn clear_routes(&self) {
        self.routes
            .lock()
            .expect("route table should not be poisoned")
            .clear();
    }

    pub fn recorded_requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .clone()
    }

    pub fn recorded_urls(&self) -> Vec<String> {
        self.recorded_requests()
            .into_iter()
            .map(|request| request.url)
            .collect()
    }

    pub fn request_count(&self) -> usize {
        self.recorded_requests().len()
    }
}

impl HttpClient for RecordingHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let response = self
            .routes
            .lock()
            .expect("route table should not be poisoned")
            .iter()
            .find(|route| request.url.contains(&route.pattern))
            .map(|route| route.response.clone())
            .unwrap_or_else(|| Err(HttpError::connect(format!("no route for {}", request.url))));
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .push(request);
        Box::pin(async move { response })
    }
}

/// A chart document whose candles are flat around each close.
pub fn chart_body(symbol: &str, price: Option<f64>, timestamps: &[i64], closes: &[f64]) -> String {
    let opens: Vec<Option<f64>> = closes.iter().map(|&close| Some(close)).collect();
    let highs: Vec<Option<f64>> = closes.iter().map(|&close| Some(close + 1.0)).collect();
    let lows: Vec<Option<f64>> = closes.iter().map(|&close| Some(close - 1.0)).collect();
    let closes: Vec<Option<f64>> = closes.iter().map(|&close| Some(close)).collect();
    raw_chart_body(symbol, price, timestamps, &opens, &highs, &lows, &closes)
}

pub fn raw_chart_body(
    symbol: &str,
    price: Option<f64>,
    timestamps: &[i64],
    opens: &[Option<f64>],
    highs: &[Option<f64>],
    lows: &[Option<f64>],
    closes: &[Option<f64>],
) -> String {
    serde_json::json!({
        "chart": {
            "result": [{
                "meta": { "symbol": symbol, "regularMarketPrice": price },
                "timestamp": timestamps,
                "indicators": { "quote": [{
                    "open": opens,
                    "high": highs,
                    "low": lows,
                    "close": closes,
                }]},
            }],
            "error": null,
        }
    })
    .to_string()
}

pub fn provider_error_body(description: &str) -> String {
    serde_json::json!({
        "chart": {
            "result": null,
            "error": { "code": "Not Found", "description": description },
        }
    })
    .to_string()
}

/// `count` epoch-second timestamps `step` seconds apart starting at `start`.
pub fn timestamps(start: i64, step: i64, count: usize) -> Vec<i64> {
    (0..count).map(|index| start + step * index as i64).collect()
}

/// Closes `first, first + step, ...`.
pub fn ramp(first: f64, step: f64, count: usize) -> Vec<f64> {
    (0..count).map(|index| first + step * index as f64).collect()
}

/// Config pointed at the test double with a short queue delay.
pub fn test_config() -> DashboardConfig {
    let mut config = DashboardConfig::default();
    config.provider.base_url = BASE_URL.to_owned();
    config.scheduler.request_delay_ms = 10;
    config
}

pub fn service_with(http: &Arc<RecordingHttpClient>, config: &DashboardConfig) -> MarketDataService {
    MarketDataService::new(config, http.clone())
}

pub fn past_ttl(config: &DashboardConfig) -> Duration {
    config.cache.ttl() + Duration::from_secs(1)
}
