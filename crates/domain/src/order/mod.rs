//! Order aggregate and related types.

mod code;
mod entity;
mod status;

pub use code::generate_order_code;
pub use entity::{Order, OrderItem, OrderMeta};
pub use status::{FulfillmentStatus, PaymentStatus};

use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Order must contain at least one item.
    #[error("Order has no items")]
    NoItems,

    /// The requested fulfillment transition is not in the table.
    #[error("Invalid fulfillment transition: {from} -> {to}")]
    InvalidTransition {
        from: FulfillmentStatus,
        to: FulfillmentStatus,
    },
}
