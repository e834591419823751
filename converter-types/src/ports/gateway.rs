//! Rate gateway port.
//!
//! This trait defines the interface for upstream rate services.
//! Implementations can be HTTP clients, mock providers, etc.

use chrono::NaiveDate;

use crate::domain::{CurrencyCode, RateQuoteSet};
use crate::error::DomainError;

/// Error type for rate lookups.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error(transparent)]
    InvalidInput(#[from] DomainError),

    #[error("Rate service unreachable: {0}")]
    UpstreamUnavailable(String),

    #[error("Rate service returned {status}: {message}")]
    UpstreamRejected { status: u16, message: String },

    #[error("No rate data returned: {0}")]
    RatesUnavailable(String),
}

/// Port trait for upstream rate services.
///
/// `codes` selects the quoted currencies; an empty slice asks for every
/// currency the service supports.
#[async_trait::async_trait]
pub trait RateGateway: Send + Sync + 'static {
    /// Most recent rates relative to `base`.
    async fn fetch_latest(
        &self,
        base: &CurrencyCode,
        codes: &[CurrencyCode],
    ) -> Result<RateQuoteSet, GatewayError>;

    /// Rates relative to `base` as of `date`.
    ///
    /// `date` must not be in the future. A request for today's UTC date is
    /// answered with the latest rates.
    async fn fetch_historical(
        &self,
        date: NaiveDate,
        base: &CurrencyCode,
        codes: &[CurrencyCode],
    ) -> Result<RateQuoteSet, GatewayError>;
}
