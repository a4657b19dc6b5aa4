//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain validation with the exchange port.
//!
//! Use cases:
//! - `TradingBot`: validated order dispatch and account queries

pub mod trading_bot;

pub use trading_bot::TradingBot;
