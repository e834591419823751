//! OpenAPI document for the HTTP API.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use converter_types::domain::{ConversionRecord, CurrencyCode, RateQuoteSet, RecordId};
use converter_types::dto::{
    ConvertRequest, ConvertResponse, HistoricalRatesQuery, LatestRatesQuery,
};
use utoipa::OpenApi;

// Path stubs for documentation; the real handlers live in `inbound::handlers`.

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Latest rates against a base currency
#[utoipa::path(
    get,
    path = "/currency/latest",
    tag = "rates",
    params(LatestRatesQuery),
    responses(
        (status = 200, description = "Latest quotes", body = RateQuoteSet),
        (status = 400, description = "Malformed currency code"),
        (status = 502, description = "Rate service returned no usable data"),
        (status = 503, description = "Rate service unreachable")
    )
)]
async fn latest_rates() {}

/// Rates on a past date
#[utoipa::path(
    get,
    path = "/currency/historical",
    tag = "rates",
    params(HistoricalRatesQuery),
    responses(
        (status = 200, description = "Quotes for the requested date", body = RateQuoteSet),
        (status = 400, description = "Missing, malformed or future date"),
        (status = 502, description = "Rate service returned no usable data"),
        (status = 503, description = "Rate service unreachable")
    )
)]
async fn historical_rates() {}

/// Convert an amount between two currencies
#[utoipa::path(
    post,
    path = "/currency/convert",
    tag = "conversion",
    request_body = ConvertRequest,
    responses(
        (status = 200, description = "Conversion outcome with its history entry", body = ConvertResponse),
        (status = 400, description = "Invalid or too large amount, bad currency code or date"),
        (status = 404, description = "No rate for one of the currencies"),
        (status = 502, description = "Rate service returned no usable data"),
        (status = 503, description = "Rate service unreachable")
    )
)]
async fn convert() {}

/// The 20 most recent conversions, newest first
#[utoipa::path(
    get,
    path = "/currency/history",
    tag = "conversion",
    responses(
        (status = 200, description = "Recent conversions", body = Vec<ConversionRecord>),
        (status = 500, description = "Storage failure")
    )
)]
async fn history() {}

/// OpenAPI documentation for the Currency Converter API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Currency Converter API",
        version = "1.0.0",
        description = "Exchange-rate lookups and currency conversion backed by freecurrencyapi.com.\n\nCross rates are derived through USD. Every conversion is recorded and the most recent ones are available from `/currency/history`.",
        license(name = "MIT"),
    ),
    paths(health, latest_rates, historical_rates, convert, history),
    components(
        schemas(
            ConvertRequest,
            ConvertResponse,
            ConversionRecord,
            RateQuoteSet,
            CurrencyCode,
            RecordId,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "rates", description = "Exchange-rate lookups"),
        (name = "conversion", description = "Currency conversion and history"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_currency_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for path in [
            "/health",
            "/currency/latest",
            "/currency/historical",
            "/currency/convert",
            "/currency/history",
        ] {
            assert!(paths.contains(&path), "missing {path}");
        }
    }
}
