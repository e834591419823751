//! Conversion Application Service
//!
//! Orchestrates rate lookups, cross-rate derivation and history through the
//! gateway and repository ports. Contains NO infrastructure logic.

use std::sync::Arc;

use converter_types::domain::{parse_rate_date, validate_amount};
use converter_types::{
    AppError, Clock, ConversionRecord, ConversionRepository, ConvertRequest, ConvertResponse,
    CurrencyCode, DomainError, HISTORY_PAGE_SIZE, HistoricalRatesQuery, LatestRatesQuery,
    RateGateway, RateQuoteSet, SystemClock,
};

/// Application service for currency conversion.
///
/// Generic over the repository and the rate gateway - adapters are injected at
/// compile time. Holds no mutable state, so one instance serves any number of
/// concurrent requests.
pub struct ConversionService<R: ConversionRepository, G: RateGateway> {
    repo: R,
    gateway: G,
    clock: Arc<dyn Clock>,
}

impl<R: ConversionRepository, G: RateGateway> ConversionService<R, G> {
    /// Creates a new service running on the system clock.
    pub fn new(repo: R, gateway: G) -> Self {
        Self {
            repo,
            gateway,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the clock that defines "now" and "today".
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Returns a reference to the underlying gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Rate Lookups
    // ─────────────────────────────────────────────────────────────────────────────

    /// Latest rates for `currencies` (all when omitted) against `base_currency` (USD when omitted).
    pub async fn latest_rates(&self, query: LatestRatesQuery) -> Result<RateQuoteSet, AppError> {
        let base = parse_base(query.base_currency.as_deref())?;
        let codes = parse_codes(query.currencies.as_deref())?;

        self.gateway
            .fetch_latest(&base, &codes)
            .await
            .map_err(Into::into)
    }

    /// Rates on a past date.
    pub async fn historical_rates(
        &self,
        query: HistoricalRatesQuery,
    ) -> Result<RateQuoteSet, AppError> {
        let date = parse_rate_date(&query.date, self.clock.today())?;
        let base = parse_base(query.base_currency.as_deref())?;
        let codes = parse_codes(query.currencies.as_deref())?;

        self.gateway
            .fetch_historical(date, &base, &codes)
            .await
            .map_err(Into::into)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Conversion
    // ─────────────────────────────────────────────────────────────────────────────

    /// Converts an amount, records it and returns the outcome.
    ///
    /// Rates are always requested against USD in a single lookup, and the
    /// cross-rate is `to_rate / from_rate`. USD to USD is answered without any
    /// lookup and is not recorded.
    pub async fn convert(&self, req: ConvertRequest) -> Result<ConvertResponse, AppError> {
        let amount = validate_amount(req.amount)?;
        let from = CurrencyCode::parse(&req.from)?;
        let to = CurrencyCode::parse(&req.to)?;

        if from.is_pivot() && to.is_pivot() {
            return Ok(ConvertResponse {
                result: amount,
                rate: 1.0,
                history: None,
            });
        }

        let today = self.clock.today();
        let date = match req.date.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(parse_rate_date(raw, today)?),
            _ => None,
        }
        // Same-day historical quotes are not reliable upstream; use latest instead.
        .filter(|date| *date != today);

        let pivot = CurrencyCode::pivot();
        let codes = [from.clone(), to.clone()];
        let quotes = match date {
            Some(date) => self.gateway.fetch_historical(date, &pivot, &codes).await?,
            None => self.gateway.fetch_latest(&pivot, &codes).await?,
        };

        let from_rate =
            pivot_rate(&quotes, &from).ok_or_else(|| AppError::RateNotFound(from.clone()))?;
        let to_rate =
            pivot_rate(&quotes, &to).ok_or_else(|| AppError::RateNotFound(to.clone()))?;
        let rate = to_rate / from_rate;

        let record = ConversionRecord::create(from, to, amount, rate, self.clock.now())
            .map_err(|e| match e {
                // The amount is too large for this pair.
                DomainError::ConversionOverflow { .. } => AppError::from(e),
                other => AppError::RatesUnavailable(other.to_string()),
            })?;
        let record = self.repo.save(record).await?;

        tracing::info!(
            record_id = %record.id,
            from = %record.source_currency,
            to = %record.target_currency,
            rate,
            as_of = %quotes.as_of,
            "conversion recorded"
        );

        Ok(ConvertResponse {
            result: record.converted_amount,
            rate,
            history: Some(record),
        })
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // History
    // ─────────────────────────────────────────────────────────────────────────────

    /// The most recent conversions, newest first.
    pub async fn history(&self) -> Result<Vec<ConversionRecord>, AppError> {
        self.repo
            .find_recent(HISTORY_PAGE_SIZE)
            .await
            .map_err(Into::into)
    }
}

/// USD value of one `code`, i.e. how many `code` one USD buys. Exactly 1 for USD.
fn pivot_rate(quotes: &RateQuoteSet, code: &CurrencyCode) -> Option<f64> {
    if code.is_pivot() {
        return Some(1.0);
    }
    quotes.rate_of(code)
}

fn parse_base(raw: Option<&str>) -> Result<CurrencyCode, AppError> {
    match raw.map(str::trim) {
        Some(code) if !code.is_empty() => Ok(CurrencyCode::parse(code)?),
        _ => Ok(CurrencyCode::pivot()),
    }
}

fn parse_codes(raw: Option<&str>) -> Result<Vec<CurrencyCode>, AppError> {
    Ok(CurrencyCode::parse_list(raw.unwrap_or_default())?)
}
