//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod clock;
mod gateway;
mod repository;

#[cfg(any(test, feature = "test-util"))]
pub use clock::FixedClock;
pub use clock::{Clock, SystemClock};
pub use gateway::{GatewayError, RateGateway};
pub use repository::{ConversionRepository, HISTORY_PAGE_SIZE};
