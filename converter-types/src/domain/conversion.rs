//! Conversion history domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::currency::CurrencyCode;
use crate::error::DomainError;

/// Unique identifier for a ConversionRecord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Creates a new random RecordId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a RecordId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Checks that a conversion amount is a positive, finite number.
pub fn validate_amount(amount: f64) -> Result<f64, DomainError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(DomainError::NonPositiveAmount(amount));
    }
    Ok(amount)
}

/// One completed conversion.
///
/// Records are immutable once created. `date` is the time the conversion was
/// made, not the valuation date of the rate that was applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRecord {
    /// Unique identifier
    #[schema(value_type = String, example = "123e4567-e89b-12d3-a456-426614174000")]
    pub id: RecordId,
    pub source_currency: CurrencyCode,
    pub target_currency: CurrencyCode,
    /// Quantity in the source currency
    #[schema(example = 100.0)]
    pub amount: f64,
    /// Quantity in the target currency (`amount * exchange_rate`)
    #[schema(example = 88.24)]
    pub converted_amount: f64,
    /// Units of target per unit of source
    #[schema(example = 0.8824)]
    pub exchange_rate: f64,
    /// When the conversion happened
    pub date: DateTime<Utc>,
}

impl ConversionRecord {
    /// Creates a record for a conversion made at `now`, deriving the converted amount.
    pub fn create(
        source_currency: CurrencyCode,
        target_currency: CurrencyCode,
        amount: f64,
        exchange_rate: f64,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let amount = validate_amount(amount)?;
        if !exchange_rate.is_finite() || exchange_rate <= 0.0 {
            return Err(DomainError::InvalidRate(exchange_rate));
        }
        let converted_amount = amount * exchange_rate;
        if !converted_amount.is_finite() {
            return Err(DomainError::ConversionOverflow {
                amount,
                rate: exchange_rate,
            });
        }

        Ok(Self {
            id: RecordId::new(),
            source_currency,
            target_currency,
            amount,
            converted_amount,
            exchange_rate,
            date: now,
        })
    }

    /// Reconstructs a record from stored fields.
    pub fn from_parts(
        id: RecordId,
        source_currency: CurrencyCode,
        target_currency: CurrencyCode,
        amount: f64,
        converted_amount: f64,
        exchange_rate: f64,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            source_currency,
            target_currency,
            amount,
            converted_amount,
            exchange_rate,
            date,
        }
    }
}
