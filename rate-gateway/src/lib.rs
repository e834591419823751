//! Upstream exchange rate gateway.
//!
//! Implements the [`RateGateway`](converter_types::RateGateway) port against the
//! freecurrencyapi.com v1 REST API. The free tier only quotes rates relative to
//! USD, which is why the conversion service always asks for USD-based quotes and
//! derives cross-rates itself.
//!
//! # Example
//! ```no_run
//! use converter_types::{CurrencyCode, RateGateway};
//! use rate_gateway::{FreeCurrencyApi, GatewayConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = FreeCurrencyApi::new(GatewayConfig::new(Some("fca_live_...".into())))?;
//! let codes = CurrencyCode::parse_list("EUR,GBP")?;
//! let quotes = gateway.fetch_latest(&CurrencyCode::pivot(), &codes).await?;
//! println!("{:?}", quotes.rates);
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod payload;

pub use client::FreeCurrencyApi;
pub use config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, GatewayConfig};
