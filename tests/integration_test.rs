//! Integration Tests - Dispatcher Against a Mocked Exchange
//!
//! Drives `TradingBot` through the `ExchangeClient` port with mockall
//! doubles and asserts on the audit trail via an in-memory sink.

use std::sync::Arc;

use mockall::mock;
use rust_decimal_macros::dec;
use serde_json::json;

use binance_futures_bot::BotError;
use binance_futures_bot::domain::order::{OrderResult, Side, TimeInForce, WireOrderType};
use binance_futures_bot::domain::validation::{OrderValidator, ValidationError};
use binance_futures_bot::logging::{AuditLogger, LogLevel, MemorySink};
use binance_futures_bot::ports::exchange::{ExchangeClient, ExchangeError, NewOrder, OrderQuery};
use binance_futures_bot::usecases::TradingBot;

// ---- Mock Definitions ----

mock! {
    pub Exchange {}

    #[async_trait::async_trait]
    impl ExchangeClient for Exchange {
        async fn ping(&self) -> Result<(), ExchangeError>;
        async fn create_order(&self, order: &NewOrder) -> Result<OrderResult, ExchangeError>;
        async fn get_balance(&self) -> Result<OrderResult, ExchangeError>;
        async fn get_order(&self, query: &OrderQuery) -> Result<OrderResult, ExchangeError>;
    }
}

fn bot_with(exchange: MockExchange) -> (TradingBot<MockExchange>, MemorySink) {
    let sink = MemorySink::new();
    let logger = AuditLogger::with_sinks(vec![Arc::new(sink.clone())]);
    let bot = TradingBot::new(Arc::new(exchange), OrderValidator::default(), logger);
    (bot, sink)
}

fn insufficient_margin() -> ExchangeError {
    ExchangeError::Api {
        status: 400,
        code: -2019,
        message: "Margin is insufficient.".to_string(),
    }
}

// ---- Integration Tests ----

#[tokio::test]
async fn test_limit_order_logs_request_and_returns_response_unchanged() {
    let response = json!({
        "orderId": 4_055_823_501_u64,
        "symbol": "BTCUSDT",
        "status": "NEW",
        "type": "LIMIT",
        "timeInForce": "GTC",
        "price": "50000",
        "origQty": "0.010"
    });
    let returned = response.clone();

    let mut exchange = MockExchange::new();
    exchange
        .expect_create_order()
        .withf(|order: &NewOrder| {
            order.symbol == "BTCUSDT"
                && order.side == Side::Buy
                && order.order_type == WireOrderType::Limit
                && order.quantity == dec!(0.01)
                && order.price == Some(dec!(50000))
                && order.stop_price.is_none()
                && order.time_in_force == Some(TimeInForce::Gtc)
        })
        .times(1)
        .returning(move |_| Ok(returned.clone()));

    let (bot, sink) = bot_with(exchange);
    let result = bot
        .place_limit_order("BTCUSDT", "BUY", dec!(0.01), dec!(50000))
        .await
        .unwrap();

    assert_eq!(result, response);

    let messages = sink.messages();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].starts_with("API Request: POST /fapi/v1/order | Params: "));
    assert!(messages[0].contains(
        r#"{"symbol":"BTCUSDT","side":"BUY","type":"LIMIT","quantity":0.01,"price":50000}"#
    ));
    assert_eq!(messages[1], format!("API Response: {response}"));
}

#[tokio::test]
async fn test_stop_limit_order_sent_as_stop() {
    let mut exchange = MockExchange::new();
    exchange
        .expect_create_order()
        .withf(|order: &NewOrder| {
            order.order_type == WireOrderType::Stop
                && order.side == Side::Sell
                && order.price == Some(dec!(49000))
                && order.stop_price == Some(dec!(49500))
                && order.time_in_force == Some(TimeInForce::Gtc)
        })
        .times(1)
        .returning(|_| Ok(json!({"orderId": 7, "type": "STOP"})));

    let (bot, sink) = bot_with(exchange);
    bot.place_stop_limit_order("BTCUSDT", "SELL", dec!(0.01), dec!(49000), dec!(49500))
        .await
        .unwrap();

    let request = &sink.messages()[0];
    assert!(request.contains(r#""type":"STOP""#));
    assert!(!request.contains("STOP_LIMIT"));
    assert!(request.contains(r#""stopPrice":49500"#));
}

#[tokio::test]
async fn test_market_order_normalizes_case() {
    let mut exchange = MockExchange::new();
    exchange
        .expect_create_order()
        .withf(|order: &NewOrder| {
            order.symbol == "BTCUSDT"
                && order.order_type == WireOrderType::Market
                && order.time_in_force.is_none()
                && order.price.is_none()
        })
        .times(1)
        .returning(|_| Ok(json!({"orderId": 1, "status": "FILLED"})));

    let (bot, _sink) = bot_with(exchange);
    let result = bot.place_market_order("btcusdt", "buy", dec!(0.01)).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_exchange_error_logged_and_propagated_unchanged() {
    let mut exchange = MockExchange::new();
    exchange
        .expect_create_order()
        .times(1)
        .returning(|_| Err(insufficient_margin()));

    let (bot, sink) = bot_with(exchange);
    let err = bot
        .place_market_order("BTCUSDT", "SELL", dec!(5))
        .await
        .unwrap_err();

    assert_eq!(err.exchange(), Some(&insufficient_margin()));

    let records = sink.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].level, LogLevel::Error);
    assert!(records[1].message.contains("Market order failed"));
    assert!(records[1].message.contains(&insufficient_margin().to_string()));
}

#[tokio::test]
async fn test_validation_failure_never_reaches_exchange() {
    let mut exchange = MockExchange::new();
    exchange.expect_create_order().times(0);

    let (bot, sink) = bot_with(exchange);
    let err = bot
        .place_limit_order("ETHUSDT", "BUY", dec!(1), dec!(3000))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        BotError::Validation(ValidationError::InvalidSymbol { .. })
    ));

    // Logged once, no request line.
    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].level, LogLevel::Error);
    assert!(records[0].message.starts_with("Error: Limit order failed:"));
}

#[tokio::test]
async fn test_generic_place_order_rejects_unknown_type() {
    let mut exchange = MockExchange::new();
    exchange.expect_create_order().times(0);

    let (bot, _sink) = bot_with(exchange);
    let err = bot
        .place_order("BTCUSDT", "BUY", "TRAILING", dec!(1), None, None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        BotError::Validation(ValidationError::InvalidOrderType(_))
    ));
}

#[tokio::test]
async fn test_balance_query() {
    let balances = json!([{"asset": "USDT", "balance": "15000.00", "availableBalance": "14990.12"}]);
    let returned = balances.clone();

    let mut exchange = MockExchange::new();
    exchange
        .expect_get_balance()
        .times(1)
        .returning(move || Ok(returned.clone()));

    let (bot, sink) = bot_with(exchange);
    let result = bot.get_account_balance().await.unwrap();

    assert_eq!(result, balances);
    assert_eq!(
        sink.messages()[0],
        "API Request: GET /fapi/v2/balance | Params: None"
    );
}

#[tokio::test]
async fn test_order_status_query() {
    let mut exchange = MockExchange::new();
    exchange
        .expect_get_order()
        .withf(|q: &OrderQuery| q.symbol == "BTCUSDT" && q.order_id == 42)
        .times(1)
        .returning(|_| Ok(json!({"orderId": 42, "status": "FILLED"})));

    let (bot, sink) = bot_with(exchange);
    let result = bot.get_order_status("btcusdt", 42).await.unwrap();

    assert_eq!(result["status"], "FILLED");
    assert_eq!(
        sink.messages()[0],
        r#"API Request: GET /fapi/v1/order | Params: {"symbol":"BTCUSDT","orderId":42}"#
    );
}

#[tokio::test]
async fn test_order_status_network_error() {
    let mut exchange = MockExchange::new();
    exchange
        .expect_get_order()
        .times(1)
        .returning(|_| Err(ExchangeError::Network("connection reset".into())));

    let (bot, sink) = bot_with(exchange);
    let err = bot.get_order_status("BTCUSDT", 9).await.unwrap_err();

    assert_eq!(
        err.exchange(),
        Some(&ExchangeError::Network("connection reset".into()))
    );
    assert!(sink.messages()[1].contains("Failed to fetch order status: Network error: connection reset"));
}

#[tokio::test]
async fn test_connect_maps_ping_failure_to_initialization() {
    let mut exchange = MockExchange::new();
    exchange
        .expect_ping()
        .times(1)
        .returning(|| Err(ExchangeError::Network("dns error".into())));

    let (bot, sink) = bot_with(exchange);
    let err = bot.connect("Binance Futures Testnet").await.unwrap_err();

    assert!(matches!(err, BotError::Initialization(_)));
    assert!(sink.messages()[1].contains("Failed to initialize client"));
}

#[tokio::test]
async fn test_connect_success_logged() {
    let mut exchange = MockExchange::new();
    exchange.expect_ping().times(1).returning(|| Ok(()));

    let (bot, sink) = bot_with(exchange);
    bot.connect("Binance Futures Testnet").await.unwrap();

    assert_eq!(
        sink.messages(),
        vec![
            "API Request: GET /fapi/v1/ping | Params: None".to_string(),
            "Successfully connected to Binance Futures Testnet".to_string(),
        ]
    );
}
