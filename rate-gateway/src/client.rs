//! HTTP adapter for the freecurrencyapi.com v1 API.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;

use converter_types::domain::DATE_FORMAT;
use converter_types::{
    Clock, CurrencyCode, DomainError, GatewayError, RateGateway, RateQuoteSet, SystemClock,
};

use crate::config::GatewayConfig;
use crate::payload;

/// Rate gateway backed by the freecurrencyapi.com REST API.
///
/// Issues exactly one request per lookup: no caching, no retries.
pub struct FreeCurrencyApi {
    http: Client,
    config: GatewayConfig,
    clock: Arc<dyn Clock>,
}

impl FreeCurrencyApi {
    /// Creates a gateway. A missing credential is logged, not rejected; the
    /// upstream will refuse the requests itself.
    pub fn new(config: GatewayConfig) -> Result<Self, reqwest::Error> {
        if config.api_key.is_none() {
            tracing::warn!(
                "No API key configured for the rate service; requests will be sent unauthenticated"
            );
        }

        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            config,
            clock: Arc::new(SystemClock),
        })
    }

    /// Replaces the clock used to decide what "today" is.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Sends a GET to `endpoint` and returns the success body.
    async fn get(
        &self,
        endpoint: &str,
        params: Vec<(&str, String)>,
    ) -> Result<String, GatewayError> {
        let mut query = Vec::with_capacity(params.len() + 1);
        if let Some(key) = &self.config.api_key {
            query.push(("apikey", key.clone()));
        }
        query.extend(params);

        let url = format!("{}/{}", self.config.base_url, endpoint);
        let response = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), endpoint, "rate service rejected request");
            return Err(payload::rejection(status, &body));
        }

        Ok(body)
    }

    fn transport_error(&self, err: reqwest::Error) -> GatewayError {
        let message = if err.is_timeout() {
            format!("request timed out after {:?}", self.config.timeout)
        } else {
            // Strip the URL, it carries the credential.
            err.without_url().to_string()
        };
        tracing::warn!(error = %message, "rate service unreachable");
        GatewayError::UpstreamUnavailable(message)
    }
}

fn rate_params(base: &CurrencyCode, codes: &[CurrencyCode]) -> Vec<(&'static str, String)> {
    let mut params = vec![("base_currency", base.to_string())];
    if !codes.is_empty() {
        params.push(("currencies", CurrencyCode::join(codes)));
    }
    params
}

#[async_trait]
impl RateGateway for FreeCurrencyApi {
    #[tracing::instrument(skip(self, base, codes), fields(base = %base, codes = %CurrencyCode::join(codes)))]
    async fn fetch_latest(
        &self,
        base: &CurrencyCode,
        codes: &[CurrencyCode],
    ) -> Result<RateQuoteSet, GatewayError> {
        let body = self.get("latest", rate_params(base, codes)).await?;
        payload::decode_latest(base, &body)
    }

    #[tracing::instrument(skip(self, base, codes), fields(base = %base, codes = %CurrencyCode::join(codes)))]
    async fn fetch_historical(
        &self,
        date: NaiveDate,
        base: &CurrencyCode,
        codes: &[CurrencyCode],
    ) -> Result<RateQuoteSet, GatewayError> {
        let today = self.clock.today();
        if date > today {
            return Err(DomainError::FutureDate(date).into());
        }
        if date == today {
            // No same-day historical endpoint is guaranteed on the free tier.
            tracing::debug!("historical lookup for today served from latest rates");
            return self.fetch_latest(base, codes).await;
        }

        let mut params = vec![("date", date.format(DATE_FORMAT).to_string())];
        params.extend(rate_params(base, codes));

        let body = self.get("historical", params).await?;
        payload::decode_historical(date, base, &body)
    }
}
