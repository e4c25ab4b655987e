//! Use-case layer for the commerce platform.
//!
//! Services are constructed once at process start with their
//! dependencies injected as `Arc<dyn Trait>` handles; there is no
//! ambient wiring. Entities stay permissive; every business
//! precondition lives here.

mod carts;
mod error;
mod orders;
mod payments;
pub mod providers;
pub mod token;

#[cfg(test)]
mod testing;

pub use carts::{CartService, MAX_LINE_QUANTITY};
pub use error::{CheckoutError, Result};
pub use orders::OrderService;
pub use payments::{
    CallbackOutcome, CallbackStatus, CheckoutSessionOrder, CheckoutSessionView,
    CreatedPaymentIntent, PaymentIntentService,
};
