//! Command surface: argument parsing and dispatch.
//!
//! ```bash
//! # verify credentials against the futures testnet
//! trading-bot init --api-key "$KEY" --api-secret "$SECRET"
//!
//! # orders (credentials from BINANCE_API_KEY / BINANCE_SECRET_KEY)
//! trading-bot market-order --side BUY --quantity 0.01
//! trading-bot limit-order --side buy --quantity 0.01 --price 50000
//! trading-bot stop-limit-order --side SELL --quantity 0.01 --price 49000 --stop-price 49500
//!
//! # queries
//! trading-bot balance
//! trading-bot order-status --order-id 123456789
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use tracing::info;

use crate::adapters::binance::BinanceFuturesClient;
use crate::config::AppConfig;
use crate::config::credentials::Credentials;
use crate::config::loader;
use crate::domain::order::{OrderResult, Side};
use crate::domain::validation::OrderValidator;
use crate::logging::{self, AuditLogger};
use crate::usecases::TradingBot;

#[derive(Debug, Parser)]
#[command(name = "trading-bot")]
#[command(about = "Binance Futures Trading Bot CLI", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults apply when it does not exist)
    #[arg(long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    /// Send requests to production instead of the futures testnet
    #[arg(long, global = true)]
    pub mainnet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Initialize the trading bot and check connectivity
    Init {
        /// Binance API key
        #[arg(long)]
        api_key: String,

        /// Binance API secret
        #[arg(long)]
        api_secret: String,
    },

    /// Place a market order
    MarketOrder {
        #[command(flatten)]
        order: OrderArgs,

        #[command(flatten)]
        auth: AuthArgs,
    },

    /// Place a limit order
    LimitOrder {
        #[command(flatten)]
        order: OrderArgs,

        /// Limit price
        #[arg(long, allow_negative_numbers = true)]
        price: Decimal,

        #[command(flatten)]
        auth: AuthArgs,
    },

    /// Place a stop-limit order
    StopLimitOrder {
        #[command(flatten)]
        order: OrderArgs,

        /// Limit price
        #[arg(long, allow_negative_numbers = true)]
        price: Decimal,

        /// Stop (trigger) price
        #[arg(long, allow_negative_numbers = true)]
        stop_price: Decimal,

        #[command(flatten)]
        auth: AuthArgs,
    },

    /// Check account balance
    Balance {
        #[command(flatten)]
        auth: AuthArgs,
    },

    /// Check order status
    OrderStatus {
        /// Trading pair (e.g., BTCUSDT)
        #[arg(long, default_value = "BTCUSDT")]
        symbol: String,

        /// Order ID
        #[arg(long)]
        order_id: u64,

        #[command(flatten)]
        auth: AuthArgs,
    },
}

/// Fields shared by every order command.
#[derive(Debug, Clone, Args)]
pub struct OrderArgs {
    /// Trading pair (e.g., BTCUSDT)
    #[arg(long, default_value = "BTCUSDT")]
    pub symbol: String,

    /// Order side
    #[arg(long, value_enum, ignore_case = true)]
    pub side: SideArg,

    /// Order quantity
    #[arg(long, allow_negative_numbers = true)]
    pub quantity: Decimal,
}

/// Credentials; flags win over the environment.
#[derive(Debug, Clone, Args)]
pub struct AuthArgs {
    /// Binance API key [default: $BINANCE_API_KEY]
    #[arg(long)]
    pub api_key: Option<String>,

    /// Binance API secret [default: $BINANCE_SECRET_KEY]
    #[arg(long)]
    pub api_secret: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SideArg {
    #[value(name = "BUY")]
    Buy,
    #[value(name = "SELL")]
    Sell,
}

impl From<SideArg> for Side {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::Buy => Self::Buy,
            SideArg::Sell => Self::Sell,
        }
    }
}

/// Run one command and print its result to stdout.
///
/// # Errors
/// Any configuration, initialization, validation or exchange failure;
/// the caller prints it and exits non-zero.
pub async fn run(cli: Cli) -> Result<()> {
    let output = execute(cli, |name| std::env::var(name).ok()).await?;
    println!("{output}");
    Ok(())
}

/// Run one command and return the line to print.
///
/// `env` resolves credentials not given as flags.
///
/// # Errors
/// See [`run`].
pub async fn execute<F>(cli: Cli, env: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let config = loader::load_or_default(&cli.config)?;
    logging::init_tracing(&config.logging);

    let logger = AuditLogger::from_config(&config.logging).with_context(|| {
        format!("Failed to open log file {}", config.logging.file)
    })?;

    let testnet = config.exchange.testnet && !cli.mainnet;
    info!(testnet, command = command_name(&cli.command), "Running command");

    let output = match cli.command {
        Commands::Init { api_key, api_secret } => {
            let bot = connect_bot(&config, &logger, &env, Some(api_key), Some(api_secret), testnet)?;
            bot.connect(bot.exchange().environment()).await?;
            logger.info("Trading bot initialized successfully");
            "Trading bot initialized successfully".to_string()
        }
        Commands::MarketOrder { order, auth } => {
            let bot = connect_bot(&config, &logger, &env, auth.api_key, auth.api_secret, testnet)?;
            let side = Side::from(order.side);
            let result = bot
                .place_market_order(&order.symbol, side.as_str(), order.quantity)
                .await?;
            format_result("Market Order Placed", &result)
        }
        Commands::LimitOrder { order, price, auth } => {
            let bot = connect_bot(&config, &logger, &env, auth.api_key, auth.api_secret, testnet)?;
            let side = Side::from(order.side);
            let result = bot
                .place_limit_order(&order.symbol, side.as_str(), order.quantity, price)
                .await?;
            format_result("Limit Order Placed", &result)
        }
        Commands::StopLimitOrder {
            order,
            price,
            stop_price,
            auth,
        } => {
            let bot = connect_bot(&config, &logger, &env, auth.api_key, auth.api_secret, testnet)?;
            let side = Side::from(order.side);
            let result = bot
                .place_stop_limit_order(
                    &order.symbol,
                    side.as_str(),
                    order.quantity,
                    price,
                    stop_price,
                )
                .await?;
            format_result("Stop-Limit Order Placed", &result)
        }
        Commands::Balance { auth } => {
            let bot = connect_bot(&config, &logger, &env, auth.api_key, auth.api_secret, testnet)?;
            let result = bot.get_account_balance().await?;
            format_result("Account Balance", &result)
        }
        Commands::OrderStatus {
            symbol,
            order_id,
            auth,
        } => {
            let bot = connect_bot(&config, &logger, &env, auth.api_key, auth.api_secret, testnet)?;
            let result = bot.get_order_status(&symbol, order_id).await?;
            format_result("Order Status", &result)
        }
    };

    Ok(output)
}

/// Resolve credentials and wire the Binance client into a bot.
///
/// Failures here are detected by the command layer, so they are
/// logged here.
fn connect_bot<F>(
    config: &AppConfig,
    logger: &AuditLogger,
    env: &F,
    api_key: Option<String>,
    api_secret: Option<String>,
    testnet: bool,
) -> Result<TradingBot<BinanceFuturesClient>>
where
    F: Fn(&str) -> Option<String>,
{
    let client = Credentials::resolve(api_key, api_secret, testnet, env)
        .and_then(|creds| BinanceFuturesClient::new(&creds, &config.exchange))
        .inspect_err(|e| logger.log_error(e))?;

    let validator = OrderValidator::new(&config.trading.allowed_symbols);
    Ok(TradingBot::new(Arc::new(client), validator, logger.clone()))
}

fn format_result(label: &str, result: &OrderResult) -> String {
    format!("{label}: {result}")
}

const fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Init { .. } => "init",
        Commands::MarketOrder { .. } => "market-order",
        Commands::LimitOrder { .. } => "limit-order",
        Commands::StopLimitOrder { .. } => "stop-limit-order",
        Commands::Balance { .. } => "balance",
        Commands::OrderStatus { .. } => "order-status",
    }
}
