//! Configuration Module - TOML-based Client Configuration
//!
//! Loads and validates configuration from `config.toml`. Every field
//! has a serde default, so a missing file or a partial file yields a
//! working testnet setup. Credentials are never read from the file;
//! see `credentials`.

pub mod credentials;
pub mod loader;

use serde::Deserialize;

use crate::domain::validation::DEFAULT_ALLOWED_SYMBOLS;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
  /// Exchange endpoints and HTTP settings.
  pub exchange: ExchangeConfig,
  /// Audit log and tracing settings.
  pub logging: LoggingConfig,
  /// Order constraints.
  pub trading: TradingConfig,
}

/// Exchange connection configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExchangeConfig {
  /// Route requests to the futures testnet.
  pub testnet: bool,
  /// Futures testnet REST base URL.
  pub testnet_url: String,
  /// Futures production REST base URL.
  pub mainnet_url: String,
  /// HTTP request timeout in seconds.
  pub timeout_seconds: u64,
  /// Signed-request validity window in milliseconds.
  pub recv_window_ms: u64,
}

impl Default for ExchangeConfig {
  fn default() -> Self {
    Self {
      testnet: true,
      testnet_url: "https://testnet.binancefuture.com".to_string(),
      mainnet_url: "https://fapi.binance.com".to_string(),
      timeout_seconds: 10,
      recv_window_ms: 5000,
    }
  }
}

impl ExchangeConfig {
  /// Base URL for the selected environment.
  pub fn base_url(&self, testnet: bool) -> &str {
    if testnet {
      &self.testnet_url
    } else {
      &self.mainnet_url
    }
  }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
  /// Audit log file; its directory is created on startup.
  pub file: String,
  /// Echo audit lines to the console.
  pub console: bool,
  /// Diagnostic tracing level (trace, debug, info, warn, error).
  pub level: String,
  /// Emit diagnostic tracing as JSON.
  pub json: bool,
}

impl Default for LoggingConfig {
  fn default() -> Self {
    Self {
      file: "logs/trading_bot.log".to_string(),
      console: true,
      level: "warn".to_string(),
      json: false,
    }
  }
}

/// Order constraints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TradingConfig {
  /// Symbols orders may be placed on (case-insensitive).
  pub allowed_symbols: Vec<String>,
}

impl Default for TradingConfig {
  fn default() -> Self {
    Self {
      allowed_symbols: DEFAULT_ALLOWED_SYMBOLS
        .iter()
        .map(|s| (*s).to_string())
        .collect(),
    }
  }
}
