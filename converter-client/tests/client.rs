//! Client behaviour against a stubbed converter API.

use converter_client::{ClientError, ConverterClient};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_latest_sends_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/currency/latest"))
        .and(query_param("base_currency", "EUR"))
        .and(query_param("currencies", "GBP,JPY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "base": "EUR",
            "as_of": "latest",
            "rates": {"GBP": 0.88, "JPY": 176.4}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ConverterClient::new(server.uri());
    let quotes = client.latest(Some("EUR"), &["GBP", "JPY"]).await.unwrap();

    assert_eq!(quotes.base.as_str(), "EUR");
    assert_eq!(quotes.rates.len(), 2);
}

#[tokio::test]
async fn test_historical_omits_unset_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/currency/historical"))
        .and(query_param("date", "2023-01-02"))
        .and(query_param_is_missing("base_currency"))
        .and(query_param_is_missing("currencies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "base": "USD",
            "as_of": "2023-01-02",
            "rates": {"EUR": 0.93}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ConverterClient::new(server.uri());
    let quotes = client.historical("2023-01-02", None, &[]).await.unwrap();

    assert_eq!(quotes.as_of.to_string(), "2023-01-02");
}

#[tokio::test]
async fn test_convert_posts_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/currency/convert"))
        .and(body_json(json!({"amount": 100.0, "from": "EUR", "to": "GBP"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": 88.0,
            "rate": 0.88,
            "history": {
                "id": "7f8c2a4e-3b1d-4f6a-9c0e-2d5b8a1f3e77",
                "sourceCurrency": "EUR",
                "targetCurrency": "GBP",
                "amount": 100.0,
                "convertedAmount": 88.0,
                "exchangeRate": 0.88,
                "date": "2024-03-10T15:00:00Z"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ConverterClient::new(server.uri());
    let outcome = client.convert(100.0, "EUR", "GBP", None).await.unwrap();

    assert_eq!(outcome.result, 88.0);
    assert_eq!(outcome.history.unwrap().target_currency.as_str(), "GBP");
}

#[tokio::test]
async fn test_api_error_uses_error_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/currency/convert"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "Rate not available for XAG",
            "code": 404
        })))
        .mount(&server)
        .await;

    let client = ConverterClient::new(server.uri());
    let err = client
        .convert(1.0, "EUR", "XAG", None)
        .await
        .unwrap_err();

    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Rate not available for XAG");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_history_and_health() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/currency/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "healthy"})))
        .mount(&server)
        .await;

    let client = ConverterClient::new(server.uri());

    assert!(client.history().await.unwrap().is_empty());
    assert!(client.health().await.unwrap());
}
