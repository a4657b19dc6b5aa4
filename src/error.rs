//! Error taxonomy surfaced to the command layer.

use thiserror::Error;

use crate::domain::validation::ValidationError;
use crate::ports::exchange::ExchangeError;

/// Every failure a bot operation can return.
#[derive(Debug, Error)]
pub enum BotError {
    /// Parameter-shape violation; never reached the network.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Raised by the exchange client, propagated unchanged.
    #[error(transparent)]
    Exchange(#[from] ExchangeError),

    /// Client construction or connectivity failure.
    #[error("Failed to initialize client: {0}")]
    Initialization(String),
}

impl BotError {
    /// The exchange error, if this came from the remote call.
    pub const fn exchange(&self) -> Option<&ExchangeError> {
        match self {
            Self::Exchange(e) => Some(e),
            _ => None,
        }
    }
}

pub type BotResult<T> = Result<T, BotError>;
