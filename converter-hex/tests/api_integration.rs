//! HTTP-level tests for the currency routes.
//!
//! The router runs against an in-memory SQLite history and a stub rate
//! gateway, so these exercise request parsing, status mapping and the
//! persisted history end to end.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use chrono::{NaiveDate, TimeZone, Utc};
use converter_hex::{ConversionService, inbound::HttpServer};
use converter_repo::SqliteRepo;
use converter_types::{
    AsOf, CurrencyCode, FixedClock, GatewayError, RateGateway, RateQuoteSet,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Gateway answering from a fixed USD table; `XXX` simulates an outage.
struct StubGateway;

impl StubGateway {
    fn quotes(
        base: &CurrencyCode,
        codes: &[CurrencyCode],
        as_of: AsOf,
    ) -> Result<RateQuoteSet, GatewayError> {
        if codes.iter().any(|c| c.as_str() == "XXX") {
            return Err(GatewayError::UpstreamUnavailable("timed out".into()));
        }
        let table = [("EUR", 0.85), ("GBP", 0.75), ("JPY", 150.0)];
        let rates: BTreeMap<CurrencyCode, f64> = table
            .iter()
            .map(|(c, r)| (CurrencyCode::parse(c).unwrap(), *r))
            .filter(|(c, _)| codes.is_empty() || codes.contains(c))
            .collect();
        Ok(RateQuoteSet::new(base.clone(), as_of, rates))
    }
}

#[async_trait]
impl RateGateway for StubGateway {
    async fn fetch_latest(
        &self,
        base: &CurrencyCode,
        codes: &[CurrencyCode],
    ) -> Result<RateQuoteSet, GatewayError> {
        Self::quotes(base, codes, AsOf::Latest)
    }

    async fn fetch_historical(
        &self,
        date: NaiveDate,
        base: &CurrencyCode,
        codes: &[CurrencyCode],
    ) -> Result<RateQuoteSet, GatewayError> {
        Self::quotes(base, codes, AsOf::Date(date))
    }
}

/// Helper to build the router over fresh storage with the clock at 2024-03-10.
async fn create_app() -> Router {
    let repo = SqliteRepo::new("sqlite::memory:").await.unwrap();
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 10, 15, 0, 0).unwrap());
    let service = ConversionService::new(repo, StubGateway).with_clock(Arc::new(clock));
    HttpServer::new(service).router()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_convert(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/currency/convert")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_health() {
    let app = create_app().await;

    let (status, body) = send(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_latest_rates() {
    let app = create_app().await;

    let (status, body) = send(&app, get("/currency/latest?currencies=EUR,GBP")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["base"], "USD");
    assert_eq!(body["as_of"], "latest");
    assert_eq!(body["rates"]["EUR"], 0.85);
    assert!(body["rates"].get("JPY").is_none());
}

#[tokio::test]
async fn test_latest_rates_bad_code() {
    let app = create_app().await;

    let (status, body) = send(&app, get("/currency/latest?base_currency=EURO")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
    assert!(body["error"].as_str().unwrap().contains("EURO"));
}

#[tokio::test]
async fn test_historical_rates() {
    let app = create_app().await;

    let (status, body) = send(&app, get("/currency/historical?date=2023-01-02")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["as_of"], "2023-01-02");
}

#[tokio::test]
async fn test_historical_requires_past_date() {
    let app = create_app().await;

    let (missing, _) = send(&app, get("/currency/historical")).await;
    let (future, body) = send(&app, get("/currency/historical?date=2024-03-11")).await;

    assert_eq!(missing, StatusCode::BAD_REQUEST);
    assert_eq!(future, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn test_convert_records_history() {
    let app = create_app().await;

    let (status, body) = send(
        &app,
        post_convert(r#"{"amount": 100, "from": "EUR", "to": "GBP"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let rate = body["rate"].as_f64().unwrap();
    assert!((rate - 0.75 / 0.85).abs() < 1e-9);
    assert_eq!(body["history"]["sourceCurrency"], "EUR");
    assert_eq!(body["history"]["targetCurrency"], "GBP");
    assert_eq!(body["history"]["convertedAmount"], body["result"]);

    let (status, history) = send(&app, get("/currency/history")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["id"], body["history"]["id"]);
}

#[tokio::test]
async fn test_convert_usd_to_usd_has_no_history() {
    let app = create_app().await;

    let (status, body) = send(
        &app,
        post_convert(r#"{"amount": 12.5, "from": "USD", "to": "USD"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], 12.5);
    assert_eq!(body["rate"], 1.0);
    assert!(body["history"].is_null());

    let (_, history) = send(&app, get("/currency/history")).await;
    assert!(history.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_convert_error_statuses() {
    let app = create_app().await;

    let cases = [
        (r#"{"amount": 0, "from": "EUR", "to": "GBP"}"#, 400),
        (r#"{"amount": 1, "from": "EU", "to": "GBP"}"#, 400),
        (r#"{"amount": 1, "from": "EUR", "to": "GBP", "date": "2099-01-01"}"#, 400),
        (r#"{"from": "EUR", "to": "GBP"}"#, 400),
        (r#"not json"#, 400),
        (r#"{"amount": 1e307, "from": "USD", "to": "JPY"}"#, 400),
        (r#"{"amount": 1, "from": "EUR", "to": "XAG"}"#, 404),
        (r#"{"amount": 1, "from": "EUR", "to": "XXX"}"#, 503),
    ];

    for (body, expected) in cases {
        let (status, json) = send(&app, post_convert(body)).await;
        assert_eq!(status.as_u16(), expected, "body {body}");
        assert_eq!(json["code"], expected, "body {body}");
    }

    let (_, history) = send(&app, get("/currency/history")).await;
    assert!(history.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_history_is_capped_at_twenty() {
    let app = create_app().await;

    for amount in 1..=22 {
        let body = format!(r#"{{"amount": {amount}, "from": "USD", "to": "JPY"}}"#);
        let (status, _) = send(&app, post_convert(&body)).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, history) = send(&app, get("/currency/history")).await;
    let history = history.as_array().unwrap();

    assert_eq!(history.len(), 20);
    assert_eq!(history[0]["amount"], 22.0);
    assert_eq!(history[19]["amount"], 3.0);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = create_app().await;

    let (status, doc) = send(&app, get("/api-docs/openapi.json")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"].get("/currency/convert").is_some());
}
