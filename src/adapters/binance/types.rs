//! Binance API Response Types
//!
//! Successful payloads stay opaque (`serde_json::Value`); only the
//! error envelope is decoded.

use serde::Deserialize;

/// Error body returned with non-2xx statuses, e.g.
/// `{"code":-2019,"msg":"Margin is insufficient."}`.
#[derive(Debug, Clone, Deserialize)]
pub struct BinanceErrorBody {
  /// Negative Binance error code.
  pub code: i64,
  /// Human-readable message.
  pub msg: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_error_body_deserialization() {
    let json = r#"{"code": -1121, "msg": "Invalid symbol."}"#;
    let body: BinanceErrorBody = serde_json::from_str(json).unwrap();
    assert_eq!(body.code, -1121);
    assert_eq!(body.msg, "Invalid symbol.");
  }
}
