//! Rate snapshots returned by the upstream quote service.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;

use super::currency::CurrencyCode;
use crate::error::DomainError;

/// Date format used by the upstream service and the public API.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` valuation date that must not lie after `today`.
pub fn parse_rate_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, DomainError> {
    let date = NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| DomainError::InvalidDate(raw.to_string()))?;
    if date > today {
        return Err(DomainError::FutureDate(date));
    }
    Ok(date)
}

/// When a set of quotes is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsOf {
    Latest,
    Date(NaiveDate),
}

impl fmt::Display for AsOf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsOf::Latest => f.write_str("latest"),
            AsOf::Date(date) => write!(f, "{}", date.format(DATE_FORMAT)),
        }
    }
}

impl Serialize for AsOf {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AsOf {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == "latest" {
            return Ok(AsOf::Latest);
        }
        NaiveDate::parse_from_str(&raw, DATE_FORMAT)
            .map(AsOf::Date)
            .map_err(serde::de::Error::custom)
    }
}

/// Snapshot of rates relative to `base`.
///
/// `rates[code]` is the amount of `code` worth one unit of `base`. The base
/// itself is never a key; its rate is implicitly 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RateQuoteSet {
    pub base: CurrencyCode,
    #[schema(value_type = String, example = "latest")]
    pub as_of: AsOf,
    #[schema(value_type = Object, example = json!({"EUR": 0.85, "GBP": 0.75}))]
    pub rates: BTreeMap<CurrencyCode, f64>,
}

impl RateQuoteSet {
    /// Builds a snapshot, dropping any entry keyed by the base itself.
    pub fn new(base: CurrencyCode, as_of: AsOf, mut rates: BTreeMap<CurrencyCode, f64>) -> Self {
        rates.remove(&base);
        Self {
            base,
            as_of,
            rates,
        }
    }

    /// Units of `code` per one unit of base.
    ///
    /// Exactly 1 for the base. `None` when the code was not quoted or the
    /// quote is zero, negative or not finite.
    pub fn rate_of(&self, code: &CurrencyCode) -> Option<f64> {
        if *code == self.base {
            return Some(1.0);
        }
        self.rates
            .get(code)
            .copied()
            .filter(|rate| rate.is_finite() && *rate > 0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::parse(s).unwrap()
    }

    #[test]
    fn test_base_is_implicit_one() {
        let mut rates = BTreeMap::new();
        rates.insert(code("USD"), 0.5);
        rates.insert(code("EUR"), 0.85);
        let quotes = RateQuoteSet::new(CurrencyCode::pivot(), AsOf::Latest, rates);

        assert!(!quotes.rates.contains_key(&code("USD")));
        assert_eq!(quotes.rate_of(&code("USD")), Some(1.0));
        assert_eq!(quotes.rate_of(&code("EUR")), Some(0.85));
    }

    #[test]
    fn test_missing_and_zero_rates_are_absent() {
        let mut rates = BTreeMap::new();
        rates.insert(code("JPY"), 0.0);
        let quotes = RateQuoteSet::new(CurrencyCode::pivot(), AsOf::Latest, rates);

        assert_eq!(quotes.rate_of(&code("JPY")), None);
        assert_eq!(quotes.rate_of(&code("GBP")), None);
    }

    #[test]
    fn test_as_of_wire_format() {
        let date = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        assert_eq!(serde_json::to_string(&AsOf::Latest).unwrap(), "\"latest\"");
        assert_eq!(
            serde_json::to_string(&AsOf::Date(date)).unwrap(),
            "\"2023-01-02\""
        );
        let parsed: AsOf = serde_json::from_str("\"2023-01-02\"").unwrap();
        assert_eq!(parsed, AsOf::Date(date));
    }

    #[test]
    fn test_parse_rate_date() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        assert_eq!(parse_rate_date("2024-03-10", today).unwrap(), today);
        assert!(matches!(
            parse_rate_date("2024-03-11", today),
            Err(DomainError::FutureDate(_))
        ));
        assert!(matches!(
            parse_rate_date("10/03/2024", today),
            Err(DomainError::InvalidDate(_))
        ));
        assert!(matches!(
            parse_rate_date("2024-02-30", today),
            Err(DomainError::InvalidDate(_))
        ));
    }
}
