//! Order Parameter Validation
//!
//! Rejects malformed order parameters before any network call. Checks
//! run in a fixed order and the first violation is reported; nothing
//! is aggregated.
//!
//! Check order:
//! 1. symbol (non-empty, allow-listed, case-insensitive)
//! 2. side (BUY / SELL, case-insensitive)
//! 3. order type (MARKET / LIMIT / STOP_LIMIT, case-insensitive)
//! 4. quantity > 0
//! 5. price > 0 for LIMIT and STOP_LIMIT
//! 6. stop price > 0 for STOP_LIMIT

use rust_decimal::Decimal;
use thiserror::Error;

use super::order::{OrderRequest, OrderType, Side};

/// Symbols accepted when no allow-list is configured.
pub const DEFAULT_ALLOWED_SYMBOLS: &[&str] = &["BTCUSDT"];

/// A violated order-parameter constraint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid or unsupported symbol '{symbol}'. Use {allowed}.")]
    InvalidSymbol { symbol: String, allowed: String },

    #[error("Side must be BUY or SELL, got '{0}'")]
    InvalidSide(String),

    #[error("Order type must be MARKET, LIMIT, or STOP_LIMIT, got '{0}'")]
    InvalidOrderType(String),

    #[error("Quantity must be positive, got {0}")]
    InvalidQuantity(Decimal),

    #[error("Price is required for LIMIT and STOP_LIMIT orders")]
    MissingPrice,

    #[error("Stop price is required for STOP_LIMIT orders")]
    MissingStopPrice,

    #[error("Order ID must be positive")]
    InvalidOrderId,
}

/// Stateless validator over a symbol allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderValidator {
    /// Uppercase symbols.
    allowed_symbols: Vec<String>,
}

impl Default for OrderValidator {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_SYMBOLS.iter().copied())
    }
}

impl OrderValidator {
    /// Build a validator; symbols are stored uppercase.
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed_symbols: allowed
                .into_iter()
                .map(|s| s.as_ref().trim().to_ascii_uppercase())
                .collect(),
        }
    }

    /// Uppercase and allow-list check a symbol. Surrounding whitespace is
    /// not stripped, so `"BTCUSDT "` is rejected.
    pub fn validate_symbol(&self, symbol: &str) -> Result<String, ValidationError> {
        let upper = symbol.to_ascii_uppercase();
        if upper.is_empty() || !self.allowed_symbols.contains(&upper) {
            return Err(ValidationError::InvalidSymbol {
                symbol: symbol.to_string(),
                allowed: self.allowed_symbols.join(", "),
            });
        }
        Ok(upper)
    }

    /// Checks for an order lookup: a non-empty symbol without whitespace
    /// and a positive ID.
    ///
    /// The allow-list is not applied; the order may predate it.
    pub fn validate_query(&self, symbol: &str, order_id: u64) -> Result<String, ValidationError> {
        let upper = symbol.to_ascii_uppercase();
        if upper.is_empty() || upper.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidSymbol {
                symbol: symbol.to_string(),
                allowed: self.allowed_symbols.join(", "),
            });
        }
        if order_id == 0 {
            return Err(ValidationError::InvalidOrderId);
        }
        Ok(upper)
    }

    /// Validate raw order parameters and return the normalized request.
    ///
    /// # Errors
    /// Returns the first violated constraint, in the module's check order.
    pub fn validate(
        &self,
        symbol: &str,
        side: &str,
        order_type: &str,
        quantity: Decimal,
        price: Option<Decimal>,
        stop_price: Option<Decimal>,
    ) -> Result<OrderRequest, ValidationError> {
        let symbol = self.validate_symbol(symbol)?;

        let side: Side = side
            .parse()
            .map_err(|()| ValidationError::InvalidSide(side.to_string()))?;

        let order_type: OrderType = order_type
            .parse()
            .map_err(|()| ValidationError::InvalidOrderType(order_type.to_string()))?;

        if quantity <= Decimal::ZERO {
            return Err(ValidationError::InvalidQuantity(quantity));
        }

        if order_type.requires_price() && !is_positive(price) {
            return Err(ValidationError::MissingPrice);
        }

        if order_type.requires_stop_price() && !is_positive(stop_price) {
            return Err(ValidationError::MissingStopPrice);
        }

        // Prices that the type does not use are dropped rather than sent.
        Ok(OrderRequest {
            symbol,
            side,
            order_type,
            quantity,
            price: price.filter(|_| order_type.requires_price()),
            stop_price: stop_price.filter(|_| order_type.requires_stop_price()),
        })
    }
}

fn is_positive(value: Option<Decimal>) -> bool {
    value.is_some_and(|v| v > Decimal::ZERO)
}

/// Validate against the default `{BTCUSDT}` allow-list.
///
/// # Errors
/// See [`OrderValidator::validate`].
pub fn validate_order_params(
    symbol: &str,
    side: &str,
    order_type: &str,
    quantity: Decimal,
    price: Option<Decimal>,
    stop_price: Option<Decimal>,
) -> Result<OrderRequest, ValidationError> {
    OrderValidator::default().validate(symbol, side, order_type, quantity, price, stop_price)
}
