//! Binance Request Signing - HMAC-SHA256 over the Query String
//!
//! Signed endpoints take the full query (`params&timestamp&recvWindow`)
//! and append `signature=<hex HMAC-SHA256(secret, query)>`. The API key
//! travels separately in the `X-MBX-APIKEY` header.

use std::time::{SystemTime, UNIX_EPOCH};

use secrecy::{ExposeSecret, SecretString};

use crate::config::credentials::Credentials;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// Request signer for the futures REST API.
pub struct BinanceAuth {
    /// API key sent in the header.
    api_key: String,
    /// Signing secret (never sent).
    api_secret: SecretString,
    /// `recvWindow` appended to every signed query.
    recv_window_ms: u64,
}

impl BinanceAuth {
    pub fn new(credentials: &Credentials, recv_window_ms: u64) -> Self {
        Self {
            api_key: credentials.api_key().to_string(),
            api_secret: SecretString::from(credentials.api_secret().to_string()),
            recv_window_ms,
        }
    }

    /// Get the API key for request headers.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Current Unix time in milliseconds.
    pub fn timestamp_ms() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or_default()
    }

    /// Hex HMAC-SHA256 of `query` under the API secret.
    pub fn sign(&self, query: &str) -> String {
        let mac = hmac_sha256::HMAC::mac(
            query.as_bytes(),
            self.api_secret.expose_secret().as_bytes(),
        );
        hex::encode(mac)
    }

    /// Append `timestamp`, `recvWindow` and `signature` to the params.
    ///
    /// Returns the complete query string ready for a URL or form body.
    pub fn signed_query(&self, params: &[(&str, String)], timestamp_ms: u64) -> String {
        let mut all_params = params.to_vec();
        all_params.push(("timestamp", timestamp_ms.to_string()));
        all_params.push(("recvWindow", self.recv_window_ms.to_string()));

        let query = build_query(&all_params);
        let signature = self.sign(&query);
        format!("{query}&signature={signature}")
    }
}

/// Join params as `k=v&k=v` in the given order, percent-encoding values.
///
/// The signature covers this exact text, so nothing downstream may
/// re-encode it.
pub fn build_query(params: &[(&str, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
