//! Domain models for the currency converter.

pub mod conversion;
pub mod currency;
pub mod rates;

pub use conversion::{ConversionRecord, RecordId, validate_amount};
pub use currency::{CurrencyCode, PIVOT_CODE};
pub use rates::{AsOf, DATE_FORMAT, RateQuoteSet, parse_rate_date};
