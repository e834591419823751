//! # Converter Hex
//!
//! Application service layer and HTTP adapter for the currency converter.
//!
//! ## Architecture
//!
//! - `service` - Application service (rate lookups, conversion, history)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi` - OpenAPI document served at `/api-docs/openapi.json`
//!
//! The service is generic over `R: ConversionRepository` and `G: RateGateway`,
//! allowing different storage backends and rate providers to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;


pub use service::ConversionService;
