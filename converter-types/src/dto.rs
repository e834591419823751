//! Data Transfer Objects (DTOs) for requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ConversionRecord;

// ─────────────────────────────────────────────────────────────────────────────
// Rate lookups
// ─────────────────────────────────────────────────────────────────────────────

/// Query for the latest rates.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LatestRatesQuery {
    /// Base currency, defaults to USD
    #[serde(skip_serializing_if = "Option::is_none")]
    #[param(example = "USD")]
    pub base_currency: Option<String>,
    /// Comma-separated currency codes; all supported codes when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    #[param(example = "EUR,GBP")]
    pub currencies: Option<String>,
}

/// Query for rates on a past date.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HistoricalRatesQuery {
    /// Valuation date (YYYY-MM-DD)
    #[param(example = "2023-01-02")]
    pub date: String,
    /// Base currency, defaults to USD
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_currency: Option<String>,
    /// Comma-separated currency codes; all supported codes when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currencies: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversion
// ─────────────────────────────────────────────────────────────────────────────

/// Request to convert an amount between two currencies.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConvertRequest {
    /// Quantity of the source currency
    #[schema(example = 100.0)]
    pub amount: f64,
    /// Source currency code
    #[schema(example = "EUR")]
    pub from: String,
    /// Target currency code
    #[schema(example = "GBP")]
    pub to: String,
    /// Optional valuation date (YYYY-MM-DD); latest rates when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "2023-01-02")]
    pub date: Option<String>,
}

/// Outcome of a conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConvertResponse {
    /// Converted quantity in the target currency
    #[schema(example = 88.24)]
    pub result: f64,
    /// Applied cross-rate
    #[schema(example = 0.8824)]
    pub rate: f64,
    /// Stored history entry; null when no conversion was needed
    pub history: Option<ConversionRecord>,
}
