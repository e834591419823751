//! ISO-4217 style currency codes.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::error::DomainError;

/// Code of the currency every free-tier quote is expressed against.
pub const PIVOT_CODE: &str = "USD";

/// A three-letter currency code, always stored upper case.
///
/// The set of valid codes is owned by the upstream rate service, so this type
/// only checks the shape of the code, not whether it is quoted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "EUR")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parses and normalizes a currency code.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let code = raw.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::InvalidCurrency(raw.to_string()));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// The pivot currency (USD).
    pub fn pivot() -> Self {
        Self(PIVOT_CODE.to_string())
    }

    /// Returns true if this is the pivot currency.
    pub fn is_pivot(&self) -> bool {
        self.0 == PIVOT_CODE
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses a comma-separated list such as `"EUR,GBP"`, skipping blanks.
    pub fn parse_list(raw: &str) -> Result<Vec<Self>, DomainError> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Self::parse)
            .collect()
    }

    /// Joins codes into the comma-separated form the upstream expects.
    pub fn join(codes: &[CurrencyCode]) -> String {
        codes
            .iter()
            .map(CurrencyCode::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}
