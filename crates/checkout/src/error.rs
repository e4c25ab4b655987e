//! Use-case error types.

use common::{OrderId, OrganizationId, PaymentIntentId, ProductId, UserId};
use domain::{CartError, FulfillmentStatus, OrderError, PaymentProvider, SplitError};
use store::StoreError;
use thiserror::Error;

use crate::providers::ProviderError;

/// Errors raised by the use-case layer.
///
/// Every variant carries a stable machine-readable code (`code()`);
/// the transport boundary maps codes to HTTP statuses and masks
/// anything infrastructural behind a generic message.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// The user is inactive or unverified.
    #[error("User is not eligible to check out: {0}")]
    UserNotEligible(UserId),

    #[error("No cart exists for user: {0}")]
    CartNotFound(UserId),

    #[error("Cart has no items to order")]
    EmptyCart,

    #[error("Quantity {quantity} is outside the allowed range 1..={max}")]
    QuantityOutOfRange { quantity: u32, max: u32 },

    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Product exists but is not ACTIVE.
    #[error("Product is not available: {0}")]
    ProductUnavailable(ProductId),

    #[error("Product has no active price: {0}")]
    MissingPrice(ProductId),

    #[error("Product {product_id} does not belong to organization {organization_id}")]
    ForeignProduct {
        product_id: ProductId,
        organization_id: OrganizationId,
    },

    #[error("Organization not found: {0}")]
    OrganizationNotFound(OrganizationId),

    #[error("Organization is not active: {0}")]
    OrganizationInactive(OrganizationId),

    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// Some of the requested orders do not exist.
    #[error("Requested {requested} orders but found {found}")]
    OrdersMissing { requested: usize, found: usize },

    /// The caller does not own one of the referenced orders.
    /// Always fails closed; never silently filtered.
    #[error("Order {0} does not belong to the caller")]
    OwnershipMismatch(OrderId),

    #[error("No orders referenced")]
    NoOrders,

    #[error("Orders total zero; nothing to pay")]
    ZeroAmount,

    /// Order has already been paid (or refunded) and cannot re-enter
    /// a payment flow.
    #[error("Order is not payment-pending: {0}")]
    AlreadyPaid(OrderId),

    #[error("Order {order_id} cannot be cancelled from {status}")]
    NotCancellable {
        order_id: OrderId,
        status: FulfillmentStatus,
    },

    #[error("Unsupported payment provider: {0}")]
    UnsupportedProvider(PaymentProvider),

    #[error("Payment intent not found: {0}")]
    IntentNotFound(PaymentIntentId),

    /// Checkout token failed verification (bad signature or expired).
    #[error("Invalid checkout token: {0}")]
    InvalidToken(String),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Split(#[from] SplitError),

    /// External payment-service failure.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CheckoutError {
    /// Stable machine-readable error code for API clients.
    pub fn code(&self) -> &'static str {
        match self {
            CheckoutError::UserNotFound(_) => "USER_NOT_FOUND",
            CheckoutError::UserNotEligible(_) => "USER_NOT_ELIGIBLE",
            CheckoutError::CartNotFound(_) => "CART_NOT_FOUND",
            CheckoutError::EmptyCart => "EMPTY_CART",
            CheckoutError::QuantityOutOfRange { .. } => "QUANTITY_OUT_OF_RANGE",
            CheckoutError::ProductNotFound(_) => "PRODUCT_NOT_FOUND",
            CheckoutError::ProductUnavailable(_) => "PRODUCT_UNAVAILABLE",
            CheckoutError::MissingPrice(_) => "MISSING_PRICE",
            CheckoutError::ForeignProduct { .. } => "FOREIGN_PRODUCT",
            CheckoutError::OrganizationNotFound(_) => "ORGANIZATION_NOT_FOUND",
            CheckoutError::OrganizationInactive(_) => "ORGANIZATION_INACTIVE",
            CheckoutError::OrderNotFound(_) => "ORDER_NOT_FOUND",
            CheckoutError::OrdersMissing { .. } => "ORDERS_MISSING",
            CheckoutError::OwnershipMismatch(_) => "OWNERSHIP_MISMATCH",
            CheckoutError::NoOrders => "NO_ORDERS",
            CheckoutError::ZeroAmount => "ZERO_AMOUNT",
            CheckoutError::AlreadyPaid(_) => "ALREADY_PAID",
            CheckoutError::NotCancellable { .. } => "NOT_CANCELLABLE",
            CheckoutError::UnsupportedProvider(_) => "UNSUPPORTED_PROVIDER",
            CheckoutError::IntentNotFound(_) => "INTENT_NOT_FOUND",
            CheckoutError::InvalidToken(_) => "INVALID_TOKEN",
            CheckoutError::Cart(CartError::InvalidQuantity { .. }) => "QUANTITY_OUT_OF_RANGE",
            CheckoutError::Cart(CartError::ItemNotFound { .. }) => "CART_ITEM_NOT_FOUND",
            CheckoutError::Order(OrderError::NoItems) => "NO_ITEMS",
            CheckoutError::Order(OrderError::InvalidTransition { .. }) => "INVALID_TRANSITION",
            CheckoutError::Split(_) => "SPLIT_FAILED",
            CheckoutError::Provider(_) => "PROVIDER_ERROR",
            CheckoutError::Store(_) => "STORE_ERROR",
            CheckoutError::Internal(_) => "INTERNAL",
        }
    }
}

/// Convenience type alias for use-case results.
pub type Result<T> = std::result::Result<T, CheckoutError>;
