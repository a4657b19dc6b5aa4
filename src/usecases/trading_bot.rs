//! Trading Bot - Validated Order Dispatch
//!
//! Facade over an `ExchangeClient`. Every operation:
//! - Validates parameters (mandatory, before any network call)
//! - Logs the outgoing request (method, endpoint, params)
//! - Makes exactly one exchange call
//! - Logs the raw response, or the error with context
//! - Returns the response unmodified, or propagates the same error
//!
//! Nothing is retried or swallowed here.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::domain::order::{OrderRequest, OrderResult, OrderType};
use crate::domain::validation::OrderValidator;
use crate::error::{BotError, BotResult};
use crate::logging::AuditLogger;
use crate::ports::exchange::{Endpoint, ExchangeClient, ExchangeError, NewOrder, OrderQuery};

/// Dispatches validated order intents to the exchange.
pub struct TradingBot<E: ExchangeClient> {
  /// Exchange port.
  exchange: Arc<E>,
  /// Order parameter checks.
  validator: OrderValidator,
  /// Audit trail.
  logger: AuditLogger,
}

impl<E: ExchangeClient> TradingBot<E> {
  /// Create a new bot.
  pub const fn new(exchange: Arc<E>, validator: OrderValidator, logger: AuditLogger) -> Self {
    Self {
      exchange,
      validator,
      logger,
    }
  }

  pub fn exchange(&self) -> &E {
    &self.exchange
  }

  /// Confirm the exchange is reachable.
  ///
  /// # Errors
  /// `BotError::Initialization` wrapping the exchange failure.
  #[instrument(skip(self))]
  pub async fn connect(&self, environment: &str) -> BotResult<()> {
    let endpoint = Endpoint::Ping;
    self.logger.log_request(endpoint.method(), endpoint.path(), None);

    match self.exchange.ping().await {
      Ok(()) => {
        self.logger.info(format!("Successfully connected to {environment}"));
        Ok(())
      }
      Err(e) => {
        self.logger.log_error(format!("Failed to initialize client: {e}"));
        Err(BotError::Initialization(e.to_string()))
      }
    }
  }

  /// Validate and submit an order of any supported type.
  ///
  /// `order_type` is matched case-insensitively against
  /// MARKET / LIMIT / STOP_LIMIT.
  ///
  /// # Errors
  /// `BotError::Validation` before any network call, or
  /// `BotError::Exchange` carrying the client's error unchanged.
  #[instrument(skip(self))]
  pub async fn place_order(
    &self,
    symbol: &str,
    side: &str,
    order_type: &str,
    quantity: Decimal,
    price: Option<Decimal>,
    stop_price: Option<Decimal>,
  ) -> BotResult<OrderResult> {
    let label = failure_label(order_type.parse().ok());

    let request = self
      .validator
      .validate(symbol, side, order_type, quantity, price, stop_price)
      .inspect_err(|e| self.logger.log_error(format!("{label}: {e}")))?;

    self.submit(&request, label).await
  }

  /// Place a market order.
  ///
  /// # Errors
  /// See [`TradingBot::place_order`].
  pub async fn place_market_order(
    &self,
    symbol: &str,
    side: &str,
    quantity: Decimal,
  ) -> BotResult<OrderResult> {
    self
      .place_order(symbol, side, OrderType::Market.as_str(), quantity, None, None)
      .await
  }

  /// Place a good-til-cancelled limit order.
  ///
  /// # Errors
  /// See [`TradingBot::place_order`].
  pub async fn place_limit_order(
    &self,
    symbol: &str,
    side: &str,
    quantity: Decimal,
    price: Decimal,
  ) -> BotResult<OrderResult> {
    self
      .place_order(symbol, side, OrderType::Limit.as_str(), quantity, Some(price), None)
      .await
  }

  /// Place a good-til-cancelled stop-limit order (wire type `STOP`).
  ///
  /// # Errors
  /// See [`TradingBot::place_order`].
  pub async fn place_stop_limit_order(
    &self,
    symbol: &str,
    side: &str,
    quantity: Decimal,
    price: Decimal,
    stop_price: Decimal,
  ) -> BotResult<OrderResult> {
    self
      .place_order(
        symbol,
        side,
        OrderType::StopLimit.as_str(),
        quantity,
        Some(price),
        Some(stop_price),
      )
      .await
  }

  /// Fetch futures account balances.
  ///
  /// # Errors
  /// `BotError::Exchange` carrying the client's error unchanged.
  #[instrument(skip(self))]
  pub async fn get_account_balance(&self) -> BotResult<OrderResult> {
    let endpoint = Endpoint::Balance;
    self.logger.log_request(endpoint.method(), endpoint.path(), None);

    let result = self.exchange.get_balance().await;
    self.finish(result, "Failed to fetch balance")
  }

  /// Fetch one order by exchange ID.
  ///
  /// # Errors
  /// `BotError::Validation` for an empty symbol or zero ID, otherwise
  /// `BotError::Exchange` carrying the client's error unchanged.
  #[instrument(skip(self))]
  pub async fn get_order_status(&self, symbol: &str, order_id: u64) -> BotResult<OrderResult> {
    const LABEL: &str = "Failed to fetch order status";

    let symbol = self
      .validator
      .validate_query(symbol, order_id)
      .inspect_err(|e| self.logger.log_error(format!("{LABEL}: {e}")))?;

    let query = OrderQuery { symbol, order_id };
    let endpoint = Endpoint::QueryOrder;
    self
      .logger
      .log_request(endpoint.method(), endpoint.path(), Some(&to_json(&query)));

    let result = self.exchange.get_order(&query).await;
    self.finish(result, LABEL)
  }

  async fn submit(&self, request: &OrderRequest, label: &str) -> BotResult<OrderResult> {
    let order = NewOrder::from_request(request);
    debug!(?order, "Submitting order");

    let endpoint = Endpoint::NewOrder;
    self
      .logger
      .log_request(endpoint.method(), endpoint.path(), Some(&to_json(&order)));

    let result = self.exchange.create_order(&order).await;
    self.finish(result, label)
  }

  /// Log the outcome of an exchange call and pass it through.
  fn finish(
    &self,
    result: Result<OrderResult, ExchangeError>,
    label: &str,
  ) -> BotResult<OrderResult> {
    match result {
      Ok(response) => {
        self.logger.log_response(&response);
        Ok(response)
      }
      Err(e) => {
        self.logger.log_error(format!("{label}: {e}"));
        Err(e.into())
      }
    }
  }
}

const fn failure_label(order_type: Option<OrderType>) -> &'static str {
  match order_type {
    Some(OrderType::Market) => "Market order failed",
    Some(OrderType::Limit) => "Limit order failed",
    Some(OrderType::StopLimit) => "Stop-limit order failed",
    None => "Order failed",
  }
}

fn to_json<T: Serialize>(params: &T) -> String {
  serde_json::to_string(params).unwrap_or_else(|e| format!("<unserializable params: {e}>"))
}
