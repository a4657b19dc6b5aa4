//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::AppConfig;

/// Longest `recvWindow` the futures API accepts.
const MAX_RECV_WINDOW_MS: u64 = 60_000;

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig> {
  let path = path.as_ref();

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config = parse_config(&content)
    .with_context(|| format!("Invalid config file: {}", path.display()))?;

  info!(
    path = %path.display(),
    testnet = config.exchange.testnet,
    symbols = config.trading.allowed_symbols.len(),
    "Configuration loaded"
  );

  Ok(config)
}

/// Load `path` if it exists, otherwise fall back to defaults.
///
/// # Errors
/// Returns an error only when the file exists but is unreadable or invalid.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<AppConfig> {
  let path = path.as_ref();
  if path.exists() {
    load_config(path)
  } else {
    debug!(path = %path.display(), "No config file, using defaults");
    Ok(AppConfig::default())
  }
}

/// Parse and validate TOML text.
///
/// # Errors
/// Returns an error on malformed TOML or failed validation.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  let config: AppConfig = toml::from_str(content).context("Failed to parse TOML")?;
  validate_config(&config)?;
  Ok(config)
}

/// Validate all configuration parameters.
fn validate_config(config: &AppConfig) -> Result<()> {
  // Exchange validation
  anyhow::ensure!(
    !config.exchange.testnet_url.is_empty(),
    "exchange.testnet_url must not be empty"
  );
  anyhow::ensure!(
    !config.exchange.mainnet_url.is_empty(),
    "exchange.mainnet_url must not be empty"
  );
  anyhow::ensure!(
    config.exchange.timeout_seconds > 0,
    "exchange.timeout_seconds must be positive"
  );
  anyhow::ensure!(
    config.exchange.recv_window_ms > 0 && config.exchange.recv_window_ms <= MAX_RECV_WINDOW_MS,
    "exchange.recv_window_ms must be in (0, {MAX_RECV_WINDOW_MS}], got {}",
    config.exchange.recv_window_ms
  );

  // Logging validation
  anyhow::ensure!(
    !config.logging.file.trim().is_empty(),
    "logging.file must not be empty"
  );

  // Trading validation
  anyhow::ensure!(
    !config.trading.allowed_symbols.is_empty(),
    "trading.allowed_symbols must list at least one symbol"
  );
  for (i, symbol) in config.trading.allowed_symbols.iter().enumerate() {
    anyhow::ensure!(
      !symbol.trim().is_empty(),
      "trading.allowed_symbols[{i}] is empty"
    );
  }

  Ok(())
}
