//! Error types for the converter service.

use chrono::NaiveDate;

use crate::domain::CurrencyCode;
use crate::ports::GatewayError;

/// Domain-level errors (malformed input).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid currency code: {0:?}")]
    InvalidCurrency(String),

    #[error("Amount must be a positive number, got {0}")]
    NonPositiveAmount(f64),

    #[error("Exchange rate must be a positive number, got {0}")]
    InvalidRate(f64),

    #[error("Invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Date {0} is in the future")]
    FutureDate(NaiveDate),

    #[error("Converting {amount} at rate {rate} exceeds the representable range")]
    ConversionOverflow { amount: f64, rate: f64 },
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Rate not available for {0}")]
    RateNotFound(CurrencyCode),

    #[error("{0}")]
    RatesUnavailable(String),

    #[error("Rate service unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Rate service rejected the request ({status}): {message}")]
    UpstreamRejected { status: u16, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::InvalidInput(e) => e.into(),
            GatewayError::UpstreamUnavailable(msg) => AppError::UpstreamUnavailable(msg),
            GatewayError::UpstreamRejected { status, message } => {
                AppError::UpstreamRejected { status, message }
            }
            GatewayError::RatesUnavailable(msg) => AppError::RatesUnavailable(msg),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(e) => AppError::Internal(e.to_string()),
            RepoError::Database(e) => AppError::Internal(e),
            RepoError::Corrupt(e) => AppError::Internal(e),
        }
    }
}
