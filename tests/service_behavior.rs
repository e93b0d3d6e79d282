//! Behavior-driven tests for the MarketDataService facade
//!
//! These tests drive the service end to end against a recording HTTP double:
//! which charts it asks the provider for, in what order, and what the quote
//! card and candlestick views contain.

mod support;

use std::sync::Arc;

use tickboard_core::{
    ChartRange, CoreError, IndicatorError, Interval, SourceErrorKind, Symbol, ValidationError,
    DEFAULT_USER_AGENT,
};

use support::{
    chart_body, past_ttl, provider_error_body, ramp, raw_chart_body, service_with, test_config,
    timestamps, RecordingHttpClient, DAILY_1MO, DAY_SECS, MONTHLY_MAX, MONTH_SECS, WEEKLY_20Y,
    WEEKLY_4Y, WEEK_SECS,
};

const DAILY_START: i64 = 1_704_067_200;

fn symbol(raw: &str) -> Symbol {
    Symbol::parse(raw).expect("valid symbol")
}

fn card_routes(http: &Arc<RecordingHttpClient>, live: Option<f64>, daily: &[f64]) {
    http.route_json(
        DAILY_1MO,
        chart_body("ACME", live, &timestamps(DAILY_START, DAY_SECS, daily.len()), daily),
    );
    http.route_json(
        WEEKLY_4Y,
        chart_body(
            "ACME",
            live,
            &timestamps(DAILY_START - 208 * WEEK_SECS, WEEK_SECS, 209),
            &ramp(50.0, 0.25, 209),
        ),
    );
}

// =============================================================================
// Quote card
// =============================================================================

#[tokio::test(start_paused = true)]
async fn when_card_is_requested_daily_then_weekly_history_is_fetched() {
    // Given: A provider with 8 daily closes and four years of weekly closes
    let http = RecordingHttpClient::new();
    card_routes(
        &http,
        Some(100.0),
        &[100.0, 98.0, 95.0, 90.0, 92.0, 94.0, 96.0, 99.0],
    );
    let service = service_with(&http, &test_config());

    // When: The card is requested
    let summary = service
        .quote_summary(&symbol("acme"))
        .await
        .expect("summary");

    // Then: The numbers follow the trailing-sample rules
    assert_eq!(summary.symbol.as_str(), "ACME");
    assert_eq!(summary.current_price, 100.0);
    assert_eq!(summary.day_change, 4.0);
    assert_eq!(summary.day_change_percent.to_string(), "4.17");
    assert_eq!(summary.week_change, 2.0);
    assert!(summary.is_positive && summary.is_week_positive);
    assert_eq!(summary.chart_prices.len(), 209);
    assert_eq!(
        summary.chart_sma.iter().filter(|point| point.value.is_some()).count(),
        209 - 49
    );

    // And: Exactly two requests went out, daily first, with a browser agent
    let requests = http.recorded_requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].url.contains(DAILY_1MO));
    assert!(requests[1].url.contains(WEEKLY_4Y));
    assert!(requests[0].url.ends_with("&indicators=quote&includeTimestamps=true"));
    assert_eq!(
        requests[0].headers.get("user-agent").map(String::as_str),
        Some(DEFAULT_USER_AGENT)
    );
}

#[tokio::test(start_paused = true)]
async fn when_card_is_requested_twice_within_ttl_provider_is_called_once_per_chart() {
    let http = RecordingHttpClient::new();
    card_routes(&http, Some(12.0), &[10.0, 11.0, 12.0]);
    let config = test_config();
    let service = service_with(&http, &config);

    service.quote_summary(&symbol("ACME")).await.expect("first");
    service.quote_summary(&symbol("ACME")).await.expect("second");
    assert_eq!(http.request_count(), 2);

    // When: The TTL passes
    tokio::time::advance(past_ttl(&config)).await;
    service.quote_summary(&symbol("ACME")).await.expect("third");

    // Then: Both charts are fetched again
    assert_eq!(http.request_count(), 4);
}

#[tokio::test(start_paused = true)]
async fn when_refresh_all_is_called_next_lookup_skips_the_cache() {
    let http = RecordingHttpClient::new();
    card_routes(&http, Some(12.0), &[10.0, 11.0, 12.0]);
    let service = service_with(&http, &test_config());

    service.quote_summary(&symbol("ACME")).await.expect("first");
    assert_eq!(service.cache().len().await, 2);

    service.refresh_all().await;
    assert!(service.cache().is_empty().await);

    service.quote_summary(&symbol("ACME")).await.expect("after refresh");
    assert_eq!(http.request_count(), 4);
}

#[tokio::test(start_paused = true)]
async fn when_provider_omits_live_price_latest_close_is_used() {
    let http = RecordingHttpClient::new();
    card_routes(&http, None, &[10.0, 11.0, 12.5]);
    let service = service_with(&http, &test_config());

    let summary = service.quote_summary(&symbol("ACME")).await.expect("summary");

    assert_eq!(summary.current_price, 12.5);
    assert_eq!(summary.day_change, 1.5);
}

#[tokio::test(start_paused = true)]
async fn when_daily_history_has_one_close_card_reports_insufficient_data() {
    // Given: Three daily samples, only one of which has a close
    let http = RecordingHttpClient::new();
    http.route_json(
        DAILY_1MO,
        raw_chart_body(
            "ACME",
            Some(5.0),
            &timestamps(DAILY_START, DAY_SECS, 3),
            &[None, None, Some(5.0)],
            &[None, None, Some(5.5)],
            &[None, None, Some(4.5)],
            &[None, None, Some(5.0)],
        ),
    );
    http.route_json(
        WEEKLY_4Y,
        chart_body("ACME", Some(5.0), &timestamps(DAILY_START, WEEK_SECS, 2), &[4.0, 5.0]),
    );
    let service = service_with(&http, &test_config());

    let error = service
        .quote_summary(&symbol("ACME"))
        .await
        .expect_err("insufficient history");

    // Then: The symbol exists, so this is distinct from a provider error
    assert!(matches!(
        error,
        CoreError::Indicator(IndicatorError::InsufficientData {
            series: "daily",
            required: 2,
            available: 1,
        })
    ));
}

#[tokio::test(start_paused = true)]
async fn when_symbol_is_unknown_provider_description_is_surfaced_and_not_cached() {
    let http = RecordingHttpClient::new();
    http.route_json(
        DAILY_1MO,
        provider_error_body("No data found, symbol may be delisted"),
    );
    let service = service_with(&http, &test_config());

    let error = service
        .quote_summary(&symbol("NOPE"))
        .await
        .expect_err("unknown symbol");

    match error {
        CoreError::Source(source) => {
            assert_eq!(source.kind(), SourceErrorKind::Provider);
            assert_eq!(source.message(), "No data found, symbol may be delisted");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    // The weekly fetch never ran and nothing was cached
    assert_eq!(http.request_count(), 1);
    assert!(service.cache().is_empty().await);
}

// =============================================================================
// Candlestick view
// =============================================================================

fn bundle_routes(http: &Arc<RecordingHttpClient>, candle_pattern: &str, candles: usize) {
    http.route_json(
        candle_pattern,
        chart_body(
            "ACME",
            Some(150.0),
            &timestamps(1_600_000_000, DAY_SECS, candles),
            &ramp(120.0, 0.1, candles),
        ),
    );
    http.route_json(
        WEEKLY_20Y,
        chart_body(
            "ACME",
            Some(150.0),
            &timestamps(1_000_000_000, WEEK_SECS, 1045),
            &ramp(20.0, 0.1, 1045),
        ),
    );
    http.route_json(
        MONTHLY_MAX,
        chart_body(
            "ACME",
            Some(150.0),
            &timestamps(900_000_000, MONTH_SECS, 400),
            &ramp(10.0, 0.3, 400),
        ),
    );
}

#[tokio::test(start_paused = true)]
async fn when_chart_is_requested_candles_weekly_and_monthly_are_fetched_in_order() {
    // Given: One year of daily candles and long weekly and monthly histories
    let http = RecordingHttpClient::new();
    bundle_routes(&http, "range=1y&interval=1d", 250);
    let service = service_with(&http, &test_config());

    // When: The chart view is requested
    let bundle = service
        .candlestick_bundle(&symbol("ACME"), ChartRange::OneYear, Interval::Daily)
        .await
        .expect("bundle");

    // Then: Three requests went out, candles first
    let urls = http.recorded_urls();
    assert_eq!(urls.len(), 3);
    assert!(urls[0].contains("range=1y&interval=1d"));
    assert!(urls[1].contains(WEEKLY_20Y));
    assert!(urls[2].contains(MONTHLY_MAX));

    // And: Every overlay covers every candle, since the SMA histories start earlier
    assert_eq!(bundle.bars.len(), 250);
    assert_eq!(bundle.range, ChartRange::OneYear);
    for overlay in bundle.overlays.iter() {
        assert_eq!(overlay.points.len(), 250, "{}", overlay.label);
        assert!(
            overlay.points.iter().all(|point| point.value.is_some()),
            "{} has gaps",
            overlay.label
        );
    }
    assert!(bundle.bollinger.middle[18].value.is_none());
    assert!(bundle.bollinger.middle[19].value.is_some());
}

#[tokio::test(start_paused = true)]
async fn when_chart_range_is_not_selectable_nothing_is_fetched() {
    let http = RecordingHttpClient::new();
    let service = service_with(&http, &test_config());

    let error = service
        .candlestick_bundle(&symbol("ACME"), ChartRange::FourYears, Interval::Weekly)
        .await
        .expect_err("4y is internal only");

    assert!(matches!(
        error,
        CoreError::Validation(ValidationError::RangeNotSelectable { .. })
    ));
    assert_eq!(http.request_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn when_interval_is_invalid_for_range_request_is_rejected() {
    let http = RecordingHttpClient::new();
    let service = service_with(&http, &test_config());

    let error = service
        .candlestick_bundle(&symbol("ACME"), ChartRange::Max, Interval::Daily)
        .await
        .expect_err("max is monthly only");

    assert!(matches!(
        error,
        CoreError::Validation(ValidationError::UnsupportedInterval { .. })
    ));
    assert_eq!(http.request_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn when_chart_follows_card_shared_history_is_not_refetched() {
    // Given: A five-year weekly chart after a card lookup
    let http = RecordingHttpClient::new();
    card_routes(&http, Some(12.0), &[10.0, 11.0, 12.0]);
    bundle_routes(&http, "range=5y&interval=1wk", 260);
    let service = service_with(&http, &test_config());

    service.quote_summary(&symbol("ACME")).await.expect("card");
    service
        .candlestick_bundle(&symbol("ACME"), ChartRange::FiveYears, Interval::Weekly)
        .await
        .expect("chart");
    service
        .candlestick_bundle(&symbol("ACME"), ChartRange::FiveYears, Interval::Weekly)
        .await
        .expect("chart again");

    // Then: 2 card charts + 3 bundle charts, the repeat served from cache
    assert_eq!(http.request_count(), 5);
}

#[test]
fn when_chart_options_are_listed_each_range_offers_its_default() {
    let options = tickboard_core::chart_options();

    let defaults: Vec<(&str, &str)> = options
        .iter()
        .map(|option| (option.range.as_str(), option.default_interval.as_str()))
        .collect();
    assert_eq!(
        defaults,
        vec![
            ("6mo", "1d"),
            ("1y", "1d"),
            ("5y", "1wk"),
            ("10y", "1mo"),
            ("max", "1mo"),
        ]
    );
}
