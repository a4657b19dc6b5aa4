//! Binance HTTP Client - Signed REST Transport
//!
//! Wraps reqwest with Binance request signing and error decoding for
//! the futures REST API. One call is one request: no retries, no
//! rate-limit backoff. Whatever the exchange answers is surfaced.

use std::time::Duration;

use reqwest::{Client, Response};
use serde_json::Value;
use tracing::{debug, warn};

use super::auth::{API_KEY_HEADER, BinanceAuth};
use super::types::BinanceErrorBody;
use crate::config::ExchangeConfig;
use crate::config::credentials::Credentials;
use crate::error::BotError;
use crate::ports::exchange::ExchangeError;

/// Configuration for the Binance HTTP client.
#[derive(Debug, Clone)]
pub struct BinanceClientConfig {
  /// REST base URL (testnet or production).
  pub base_url: String,
  /// Request timeout.
  pub timeout: Duration,
  /// `recvWindow` for signed requests.
  pub recv_window_ms: u64,
}

impl BinanceClientConfig {
  /// Pick the base URL matching the credentials' environment.
  pub fn from_exchange_config(config: &ExchangeConfig, testnet: bool) -> Self {
    Self {
      base_url: config.base_url(testnet).trim_end_matches('/').to_string(),
      timeout: Duration::from_secs(config.timeout_seconds),
      recv_window_ms: config.recv_window_ms,
    }
  }
}

/// Signed HTTP transport for the futures REST API.
pub struct BinanceHttpClient {
  /// Underlying HTTP client.
  http: Client,
  /// Request signer.
  auth: BinanceAuth,
  /// REST base URL, no trailing slash.
  base_url: String,
}

impl BinanceHttpClient {
  /// Create a new client.
  ///
  /// # Errors
  /// `BotError::Initialization` if the HTTP client cannot be built.
  pub fn new(credentials: &Credentials, config: BinanceClientConfig) -> Result<Self, BotError> {
    let http = Client::builder()
      .timeout(config.timeout)
      .build()
      .map_err(|e| BotError::Initialization(format!("Failed to build HTTP client: {e}")))?;

    Ok(Self {
      http,
      auth: BinanceAuth::new(credentials, config.recv_window_ms),
      base_url: config.base_url,
    })
  }

  /// Unsigned GET.
  pub async fn public_get(&self, path: &str) -> Result<Value, ExchangeError> {
    let url = format!("{}{}", self.base_url, path);
    debug!(%url, "GET");

    let response = self.http.get(&url).send().await.map_err(network_error)?;
    Self::handle_response(response).await
  }

  /// Signed GET; the signed query goes in the URL.
  pub async fn signed_get(
    &self,
    path: &str,
    params: &[(&str, String)],
  ) -> Result<Value, ExchangeError> {
    let query = self.auth.signed_query(params, BinanceAuth::timestamp_ms());
    let url = format!("{}{}?{}", self.base_url, path, query);
    debug!(path, "GET (signed)");

    let response = self
      .http
      .get(&url)
      .header(API_KEY_HEADER, self.auth.api_key())
      .send()
      .await
      .map_err(network_error)?;

    Self::handle_response(response).await
  }

  /// Signed POST; the signed query goes in a form body.
  pub async fn signed_post(
    &self,
    path: &str,
    params: &[(&str, String)],
  ) -> Result<Value, ExchangeError> {
    let body = self.auth.signed_query(params, BinanceAuth::timestamp_ms());
    let url = format!("{}{}", self.base_url, path);
    debug!(path, "POST (signed)");

    let response = self
      .http
      .post(&url)
      .header(API_KEY_HEADER, self.auth.api_key())
      .header("Content-Type", "application/x-www-form-urlencoded")
      .body(body)
      .send()
      .await
      .map_err(network_error)?;

    Self::handle_response(response).await
  }

  /// Decode a JSON body, or the Binance error envelope on failure.
  async fn handle_response(response: Response) -> Result<Value, ExchangeError> {
    let status = response.status();
    let body = response.text().await.map_err(network_error)?;

    if status.is_success() {
      return serde_json::from_str(&body).map_err(|e| {
        ExchangeError::InvalidResponse(format!("{status}: {e}: {}", truncate(&body)))
      });
    }

    match serde_json::from_str::<BinanceErrorBody>(&body) {
      Ok(err) => {
        warn!(status = status.as_u16(), code = err.code, msg = %err.msg, "Exchange rejected request");
        Err(ExchangeError::Api {
          status: status.as_u16(),
          code: err.code,
          message: err.msg,
        })
      }
      Err(_) => Err(ExchangeError::InvalidResponse(format!(
        "HTTP {status}: {}",
        truncate(&body)
      ))),
    }
  }
}

fn network_error(e: reqwest::Error) -> ExchangeError {
  if e.is_timeout() {
    ExchangeError::Network(format!("request timed out: {e}"))
  } else {
    ExchangeError::Network(e.to_string())
  }
}

/// Keep error messages to one readable line.
fn truncate(body: &str) -> String {
  const MAX: usize = 200;
  match body.char_indices().nth(MAX) {
    Some((idx, _)) => format!("{}...", &body[..idx]),
    None => body.to_string(),
  }
}
