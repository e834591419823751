//! # Converter Types
//!
//! Domain types and port traits for the currency converter service.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (CurrencyCode, RateQuoteSet, ConversionRecord)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{AsOf, ConversionRecord, CurrencyCode, PIVOT_CODE, RateQuoteSet, RecordId};
pub use dto::*;
pub use error::{AppError, DomainError, RepoError};
#[cfg(any(test, feature = "test-util"))]
pub use ports::FixedClock;
pub use ports::{
    Clock, ConversionRepository, GatewayError, HISTORY_PAGE_SIZE, RateGateway, SystemClock,
};
