//! Exchange Client Port - Futures REST Capability Interface
//!
//! Defines the trait the dispatcher requires from an exchange SDK:
//! create an order, read balances, read one order. The concrete
//! Binance adapter implements it; tests plug in mocks.
//!
//! Key design decisions:
//! - Payloads carry wire vocabulary (`STOP`, `GTC`) already translated
//! - Responses are opaque JSON, never reshaped locally
//! - Adapters never retry; one call is one request

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::domain::order::{OrderRequest, OrderResult, Side, TimeInForce, WireOrderType};

/// Logical REST endpoints used by the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
  /// Connectivity check.
  Ping,
  /// Submit a new order.
  NewOrder,
  /// Futures account balances.
  Balance,
  /// Query a single order.
  QueryOrder,
}

impl Endpoint {
  pub const fn method(self) -> &'static str {
    match self {
      Self::NewOrder => "POST",
      Self::Ping | Self::Balance | Self::QueryOrder => "GET",
    }
  }

  pub const fn path(self) -> &'static str {
    match self {
      Self::Ping => "/fapi/v1/ping",
      Self::NewOrder | Self::QueryOrder => "/fapi/v1/order",
      Self::Balance => "/fapi/v2/balance",
    }
  }
}

/// Failure raised by an exchange client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExchangeError {
  /// The exchange answered with an error body (auth, rejection, rate limit).
  #[error("APIError(code={code}): {message}")]
  Api {
    /// HTTP status.
    status: u16,
    /// Exchange error code.
    code: i64,
    /// Exchange error message.
    message: String,
  },

  /// Transport fault: DNS, TLS, connect, timeout.
  #[error("Network error: {0}")]
  Network(String),

  /// Body could not be decoded.
  #[error("Invalid response: {0}")]
  InvalidResponse(String),
}

/// Order payload in exchange vocabulary.
///
/// Serializes to the logged parameter set (`symbol`, `side`, `type`,
/// `quantity`, then `price` / `stopPrice` when present) with decimals
/// as JSON numbers. `timeInForce` only goes on the wire, see
/// [`NewOrder::query_pairs`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewOrder {
  pub symbol: String,
  pub side: Side,
  #[serde(rename = "type")]
  pub order_type: WireOrderType,
  #[serde(serialize_with = "decimal_number")]
  pub quantity: Decimal,
  #[serde(
    skip_serializing_if = "Option::is_none",
    serialize_with = "optional_decimal_number"
  )]
  pub price: Option<Decimal>,
  #[serde(
    rename = "stopPrice",
    skip_serializing_if = "Option::is_none",
    serialize_with = "optional_decimal_number"
  )]
  pub stop_price: Option<Decimal>,
  #[serde(skip)]
  pub time_in_force: Option<TimeInForce>,
}

impl NewOrder {
  /// Translate a validated request into exchange vocabulary.
  pub fn from_request(request: &OrderRequest) -> Self {
    Self {
      symbol: request.symbol.clone(),
      side: request.side,
      order_type: request.order_type.wire_type(),
      quantity: request.quantity,
      price: request.price,
      stop_price: request.stop_price,
      time_in_force: request.order_type.time_in_force(),
    }
  }

  /// Form parameters in submission order, decimals normalized.
  pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
    let mut pairs = vec![
      ("symbol", self.symbol.clone()),
      ("side", self.side.as_str().to_string()),
      ("type", self.order_type.as_str().to_string()),
      ("quantity", self.quantity.normalize().to_string()),
    ];
    if let Some(price) = self.price {
      pairs.push(("price", price.normalize().to_string()));
    }
    if let Some(stop) = self.stop_price {
      pairs.push(("stopPrice", stop.normalize().to_string()));
    }
    if let Some(tif) = self.time_in_force {
      pairs.push(("timeInForce", tif.as_str().to_string()));
    }
    pairs
  }
}

/// Single-order lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderQuery {
  pub symbol: String,
  #[serde(rename = "orderId")]
  pub order_id: u64,
}

impl OrderQuery {
  pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
    vec![
      ("symbol", self.symbol.clone()),
      ("orderId", self.order_id.to_string()),
    ]
  }
}

/// Capability interface over the exchange SDK.
#[async_trait]
pub trait ExchangeClient: Send + Sync + 'static {
  /// Check that the exchange is reachable.
  async fn ping(&self) -> Result<(), ExchangeError>;

  /// `POST /fapi/v1/order`.
  async fn create_order(&self, order: &NewOrder) -> Result<OrderResult, ExchangeError>;

  /// `GET /fapi/v2/balance`.
  async fn get_balance(&self) -> Result<OrderResult, ExchangeError>;

  /// `GET /fapi/v1/order`.
  async fn get_order(&self, query: &OrderQuery) -> Result<OrderResult, ExchangeError>;
}

/// Integral decimals as JSON integers, the rest as floats.
fn decimal_number<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
  use serde::ser::Error;

  let value = value.normalize();
  if value.scale() == 0 {
    if let Some(int) = value.to_i64() {
      return serializer.serialize_i64(int);
    }
  }
  // Parsing the decimal text rounds once; `to_f64` may not.
  let float: f64 = value
    .to_string()
    .parse()
    .map_err(|e| S::Error::custom(format!("decimal {value} not representable: {e}")))?;
  serializer.serialize_f64(float)
}

#[allow(clippy::ref_option)]
fn optional_decimal_number<S: Serializer>(
  value: &Option<Decimal>,
  serializer: S,
) -> Result<S::Ok, S::Error> {
  match value {
    Some(v) => decimal_number(v, serializer),
    None => serializer.serialize_none(),
  }
}
