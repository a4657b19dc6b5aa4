//! Order vocabulary shared by the validator, the dispatcher and adapters.
//!
//! Local order types (`MARKET`, `LIMIT`, `STOP_LIMIT`) are kept apart
//! from the literals the futures API expects. The translation lives in
//! one table, [`OrderType::wire_type`], so no call site special-cases
//! the stop order.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Opaque exchange response, passed through unmodified.
pub type OrderResult = serde_json::Value;

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = ();

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "BUY" => Ok(Self::Buy),
            "SELL" => Ok(Self::Sell),
            _ => Err(()),
        }
    }
}

/// Order type as the user names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Market,
    Limit,
    StopLimit,
}

impl OrderType {
    pub const ALL: [Self; 3] = [Self::Market, Self::Limit, Self::StopLimit];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Market => "MARKET",
            Self::Limit => "LIMIT",
            Self::StopLimit => "STOP_LIMIT",
        }
    }

    /// Literal submitted to the futures API for this local type.
    ///
    /// The futures venue has no `STOP_LIMIT` type: a stop order carrying
    /// both `price` and `stopPrice` is its stop-limit.
    pub const fn wire_type(self) -> WireOrderType {
        match self {
            Self::Market => WireOrderType::Market,
            Self::Limit => WireOrderType::Limit,
            Self::StopLimit => WireOrderType::Stop,
        }
    }

    /// Resting orders are always submitted good-til-cancelled.
    pub const fn time_in_force(self) -> Option<TimeInForce> {
        match self {
            Self::Market => None,
            Self::Limit | Self::StopLimit => Some(TimeInForce::Gtc),
        }
    }

    pub const fn requires_price(self) -> bool {
        matches!(self, Self::Limit | Self::StopLimit)
    }

    pub const fn requires_stop_price(self) -> bool {
        matches!(self, Self::StopLimit)
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = ();

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == upper)
            .ok_or(())
    }
}

/// Order type literal on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WireOrderType {
    Market,
    Limit,
    Stop,
}

impl WireOrderType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Market => "MARKET",
            Self::Limit => "LIMIT",
            Self::Stop => "STOP",
        }
    }
}

impl fmt::Display for WireOrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time-in-force qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeInForce {
    /// Good-til-cancelled.
    #[serde(rename = "GTC")]
    Gtc,
}

impl TimeInForce {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gtc => "GTC",
        }
    }
}

/// A validated order intent.
///
/// Only [`crate::domain::validation::OrderValidator`] builds these, so
/// every instance satisfies the per-type price invariants and carries an
/// uppercase, allow-listed symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    pub symbol: String,
    pub side: Side,
    pub order_type: OrderType,
    pub quantity: Decimal,
    pub price: Option<Decimal>,
    pub stop_price: Option<Decimal>,
}
