//! HTTP route handlers.

pub mod carts;
pub mod health;
pub mod metrics;
pub mod orders;
pub mod payments;

use std::sync::Arc;

use checkout::{CartService, OrderService, PaymentIntentService};
use uuid::Uuid;

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub cart_service: Arc<CartService>,
    pub order_service: Arc<OrderService>,
    pub payment_service: Arc<PaymentIntentService>,
}

pub(crate) fn parse_id<T: From<Uuid>>(id: &str) -> Result<T, ApiError> {
    Uuid::parse_str(id)
        .map(T::from)
        .map_err(|e| ApiError::BadRequest(format!("Invalid ID format: {e}")))
}
