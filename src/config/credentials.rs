//! API Credentials - Flags or Environment
//!
//! Built once per invocation from explicit `--api-key`/`--api-secret`
//! flags, falling back to `BINANCE_API_KEY` / `BINANCE_SECRET_KEY`.
//! The secret lives in a `SecretString` and never reaches `Debug` output
//! or the audit log.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::error::BotError;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "BINANCE_API_KEY";

/// Environment variable holding the API secret.
pub const API_SECRET_ENV: &str = "BINANCE_SECRET_KEY";

/// API key pair plus the environment it targets.
pub struct Credentials {
  api_key: String,
  api_secret: SecretString,
  testnet: bool,
}

impl fmt::Debug for Credentials {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let masked_key = if self.api_key.len() > 8 {
      format!(
        "{}...{}",
        &self.api_key[..4],
        &self.api_key[self.api_key.len() - 4..]
      )
    } else {
      "***REDACTED***".to_string()
    };

    f.debug_struct("Credentials")
      .field("api_key", &masked_key)
      .field("api_secret", &"***REDACTED***")
      .field("testnet", &self.testnet)
      .finish()
  }
}

impl Credentials {
  /// Build credentials, checking their format.
  ///
  /// # Errors
  /// `BotError::Initialization` if either value is empty or is not
  /// printable ASCII without whitespace (it must fit in a header).
  pub fn new(
    api_key: impl Into<String>,
    api_secret: impl Into<String>,
    testnet: bool,
  ) -> Result<Self, BotError> {
    let api_key = api_key.into();
    let api_secret = api_secret.into();
    check_format("API key", &api_key)?;
    check_format("API secret", &api_secret)?;
    Ok(Self {
      api_key,
      api_secret: SecretString::from(api_secret),
      testnet,
    })
  }

  /// Explicit values win; missing ones come from `lookup`.
  ///
  /// `lookup` is `std::env::var(..).ok()` in production.
  ///
  /// # Errors
  /// `BotError::Initialization` naming the variable that is unset, or
  /// any format error from [`Credentials::new`].
  pub fn resolve<F>(
    api_key: Option<String>,
    api_secret: Option<String>,
    testnet: bool,
    lookup: F,
  ) -> Result<Self, BotError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let api_key = api_key.or_else(|| lookup(API_KEY_ENV)).ok_or_else(|| {
      BotError::Initialization(format!("{API_KEY_ENV} is not set and --api-key was not given"))
    })?;
    let api_secret = api_secret.or_else(|| lookup(API_SECRET_ENV)).ok_or_else(|| {
      BotError::Initialization(format!(
        "{API_SECRET_ENV} is not set and --api-secret was not given"
      ))
    })?;
    Self::new(api_key, api_secret, testnet)
  }

  pub fn api_key(&self) -> &str {
    &self.api_key
  }

  /// Secret bytes for signing only.
  pub fn api_secret(&self) -> &str {
    self.api_secret.expose_secret()
  }

  pub const fn testnet(&self) -> bool {
    self.testnet
  }
}

fn check_format(label: &str, value: &str) -> Result<(), BotError> {
  if value.is_empty() {
    return Err(BotError::Initialization(format!("{label} is empty")));
  }
  if !value.chars().all(|c| c.is_ascii_graphic()) {
    return Err(BotError::Initialization(format!(
      "{label} must be printable ASCII without whitespace"
    )));
  }
  Ok(())
}
