//! # Converter Client SDK
//!
//! A typed Rust client for the Currency Converter API.

use converter_types::{
    ConversionRecord, ConvertRequest, ConvertResponse, HistoricalRatesQuery, LatestRatesQuery,
    RateQuoteSet,
};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Currency Converter API client.
pub struct ConverterClient {
    base_url: String,
    http: Client,
}

impl ConverterClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Latest rates against `base` (USD when `None`) for `currencies` (all when empty).
    pub async fn latest(
        &self,
        base: Option<&str>,
        currencies: &[&str],
    ) -> Result<RateQuoteSet, ClientError> {
        let query = LatestRatesQuery {
            base_currency: base.map(String::from),
            currencies: join_codes(currencies),
        };
        self.get_with_query("/currency/latest", &query).await
    }

    /// Rates on `date` (YYYY-MM-DD).
    pub async fn historical(
        &self,
        date: &str,
        base: Option<&str>,
        currencies: &[&str],
    ) -> Result<RateQuoteSet, ClientError> {
        let query = HistoricalRatesQuery {
            date: date.to_string(),
            base_currency: base.map(String::from),
            currencies: join_codes(currencies),
        };
        self.get_with_query("/currency/historical", &query).await
    }

    /// Converts `amount` of `from` into `to`, at latest rates unless `date` is given.
    pub async fn convert(
        &self,
        amount: f64,
        from: &str,
        to: &str,
        date: Option<&str>,
    ) -> Result<ConvertResponse, ClientError> {
        let req = ConvertRequest {
            amount,
            from: from.to_string(),
            to: to.to_string(),
            date: date.map(String::from),
        };
        self.post("/currency/convert", &req).await
    }

    /// The most recent conversions, newest first.
    pub async fn history(&self) -> Result<Vec<ConversionRecord>, ClientError> {
        self.get("/currency/history").await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn get_with_query<T: DeserializeOwned, Q: serde::Serialize>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

fn join_codes(codes: &[&str]) -> Option<String> {
    (!codes.is_empty()).then(|| codes.join(","))
}
