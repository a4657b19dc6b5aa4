//! Binance USDT-M Futures REST Adapter
//!
//! Implements the `ExchangeClient` port with reqwest.
//!
//! Sub-modules:
//! - `auth`: HMAC-SHA256 query signing
//! - `client`: signed HTTP transport and error decoding
//! - `futures`: the `ExchangeClient` implementation
//! - `types`: API error envelope

pub mod auth;
pub mod client;
pub mod futures;
pub mod types;

pub use futures::BinanceFuturesClient;
