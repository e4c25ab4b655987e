//! Repository contracts for the commerce platform, with in-memory
//! reference implementations.
//!
//! The traits are the persistence boundary: use cases depend on them
//! and nothing else. The `InMemory*` types back tests and the default
//! wiring; a database-backed implementation would provide the same
//! traits.

mod carts;
mod catalog;
mod error;
mod orders;
mod payment_intents;

pub use carts::{CartRepository, InMemoryCartRepository};
pub use catalog::{
    InMemoryOrganizationRepository, InMemoryPriceRepository, InMemoryProductRepository,
    InMemoryUserRepository, OrganizationRepository, PriceRepository, ProductRepository,
    UserRepository,
};
pub use error::{Result, StoreError};
pub use orders::{InMemoryOrderRepository, OrderFilters, OrderRepository};
pub use payment_intents::{InMemoryPaymentIntentRepository, PaymentIntentRepository};
