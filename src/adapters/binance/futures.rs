//! Binance Futures Adapter - `ExchangeClient` over the Signed Transport
//!
//! Maps each port call onto one endpoint of the USDT-M futures API.
//! Payloads arrive already in wire vocabulary; this layer only picks
//! the endpoint and hands the parameters to the transport.

use async_trait::async_trait;
use tracing::instrument;

use super::client::{BinanceClientConfig, BinanceHttpClient};
use crate::config::ExchangeConfig;
use crate::config::credentials::Credentials;
use crate::domain::order::OrderResult;
use crate::error::BotError;
use crate::ports::exchange::{Endpoint, ExchangeClient, ExchangeError, NewOrder, OrderQuery};

/// USDT-M futures client.
pub struct BinanceFuturesClient {
    http: BinanceHttpClient,
    testnet: bool,
}

impl BinanceFuturesClient {
    /// Build a client for the environment named by `credentials`.
    ///
    /// # Errors
    /// `BotError::Initialization` if the HTTP client cannot be built.
    pub fn new(credentials: &Credentials, config: &ExchangeConfig) -> Result<Self, BotError> {
        let client_config = BinanceClientConfig::from_exchange_config(config, credentials.testnet());
        Ok(Self {
            http: BinanceHttpClient::new(credentials, client_config)?,
            testnet: credentials.testnet(),
        })
    }

    /// Human-readable environment name for log lines.
    pub const fn environment(&self) -> &'static str {
        if self.testnet {
            "Binance Futures Testnet"
        } else {
            "Binance Futures"
        }
    }
}

#[async_trait]
impl ExchangeClient for BinanceFuturesClient {
    #[instrument(skip(self))]
    async fn ping(&self) -> Result<(), ExchangeError> {
        self.http.public_get(Endpoint::Ping.path()).await.map(|_| ())
    }

    #[instrument(skip(self, order), fields(symbol = %order.symbol, order_type = %order.order_type))]
    async fn create_order(&self, order: &NewOrder) -> Result<OrderResult, ExchangeError> {
        self.http
            .signed_post(Endpoint::NewOrder.path(), &order.query_pairs())
            .await
    }

    #[instrument(skip(self))]
    async fn get_balance(&self) -> Result<OrderResult, ExchangeError> {
        self.http.signed_get(Endpoint::Balance.path(), &[]).await
    }

    #[instrument(skip(self, query), fields(symbol = %query.symbol, order_id = query.order_id))]
    async fn get_order(&self, query: &OrderQuery) -> Result<OrderResult, ExchangeError> {
        self.http
            .signed_get(Endpoint::QueryOrder.path(), &query.query_pairs())
            .await
    }
}
