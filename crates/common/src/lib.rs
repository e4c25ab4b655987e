//! Shared identifier types used across the commerce platform crates.

mod types;

pub use types::{
    CartId, OrderId, OrganizationId, PaymentIntentId, PriceId, ProductId, UserId,
};
