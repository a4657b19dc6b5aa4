//! Binance Futures Trading Bot - Library Root
//!
//! Re-exports all modules for the binary and integration tests.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod ports;
pub mod usecases;

pub use error::{BotError, BotResult};
