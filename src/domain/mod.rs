//! Domain layer - Order vocabulary and validation.
//!
//! Pure logic with no I/O (hexagonal architecture inner ring).

pub mod order;
pub mod validation;

pub use order::{OrderRequest, OrderResult, OrderType, Side, TimeInForce, WireOrderType};
pub use validation::{OrderValidator, ValidationError, validate_order_params};
