//! Upstream response bodies.
//!
//! Success bodies are `{"data": {...}}`. For `/latest` the data maps codes to
//! rates; for `/historical` it maps a `YYYY-MM-DD` key to such a mapping.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::Deserialize;

use converter_types::domain::DATE_FORMAT;
use converter_types::{AsOf, CurrencyCode, GatewayError, RateQuoteSet};

type RawRates = HashMap<String, Option<f64>>;

#[derive(Debug, Deserialize)]
struct LatestBody {
    #[serde(default)]
    data: Option<RawRates>,
}

#[derive(Debug, Deserialize)]
struct HistoricalBody {
    #[serde(default)]
    data: Option<BTreeMap<String, RawRates>>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Decodes a `/latest` success body.
pub(crate) fn decode_latest(base: &CurrencyCode, body: &str) -> Result<RateQuoteSet, GatewayError> {
    let parsed: LatestBody = serde_json::from_str(body)
        .map_err(|e| GatewayError::RatesUnavailable(format!("malformed rate payload: {e}")))?;
    let data = parsed
        .data
        .ok_or_else(|| GatewayError::RatesUnavailable("response carried no data".into()))?;

    Ok(RateQuoteSet::new(base.clone(), AsOf::Latest, into_rates(data)))
}

/// Decodes a `/historical` success body for `date`.
///
/// The mapping keyed by `date` is preferred; the upstream may key the entry by
/// the business day it actually served, so a lone entry under another key is
/// accepted too.
pub(crate) fn decode_historical(
    date: NaiveDate,
    base: &CurrencyCode,
    body: &str,
) -> Result<RateQuoteSet, GatewayError> {
    let parsed: HistoricalBody = serde_json::from_str(body)
        .map_err(|e| GatewayError::RatesUnavailable(format!("malformed rate payload: {e}")))?;
    let mut data = parsed
        .data
        .ok_or_else(|| GatewayError::RatesUnavailable("response carried no data".into()))?;

    let key = date.format(DATE_FORMAT).to_string();
    let rates = match data.remove(&key) {
        Some(rates) => rates,
        None => data
            .into_values()
            .next()
            .ok_or_else(|| GatewayError::RatesUnavailable(format!("no rates found for {key}")))?,
    };

    Ok(RateQuoteSet::new(
        base.clone(),
        AsOf::Date(date),
        into_rates(rates),
    ))
}

/// Builds the error for a non-success status.
pub(crate) fn rejection(status: StatusCode, body: &str) -> GatewayError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("External API Error")
                .to_string()
        });

    GatewayError::UpstreamRejected {
        status: status.as_u16(),
        message,
    }
}

fn into_rates(raw: RawRates) -> BTreeMap<CurrencyCode, f64> {
    raw.into_iter()
        .filter_map(|(code, rate)| match (CurrencyCode::parse(&code), rate) {
            (Ok(code), Some(rate)) => Some((code, rate)),
            _ => {
                tracing::debug!(code = %code, "skipping unusable quote");
                None
            }
        })
        .collect()
}
