//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use checkout::CheckoutError;
use domain::{CartError, OrderError};

/// API-level error wrapper.
///
/// Validation errors surface with their stable code and message;
/// infrastructure and provider failures collapse to a generic message
/// so internals never leak to clients.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed request input (bad ids, unknown enum values).
    BadRequest(String),
    /// Use-case failure.
    Checkout(CheckoutError),
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        ApiError::Checkout(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Checkout(err) => {
                let status = checkout_error_status(&err);
                if status.is_server_error() {
                    tracing::error!(error = %err, "internal server error");
                    (status, err.code(), "internal server error".to_string())
                } else {
                    (status, err.code(), err.to_string())
                }
            }
        };

        let body = serde_json::json!({
            "success": false,
            "message": message,
            "error": code,
        });
        (status, axum::Json(body)).into_response()
    }
}

fn checkout_error_status(err: &CheckoutError) -> StatusCode {
    match err {
        CheckoutError::UserNotFound(_)
        | CheckoutError::CartNotFound(_)
        | CheckoutError::ProductNotFound(_)
        | CheckoutError::OrganizationNotFound(_)
        | CheckoutError::OrderNotFound(_)
        | CheckoutError::OrdersMissing { .. }
        | CheckoutError::IntentNotFound(_)
        | CheckoutError::Cart(CartError::ItemNotFound { .. }) => StatusCode::NOT_FOUND,

        // Ownership mismatches always fail closed.
        CheckoutError::OwnershipMismatch(_) => StatusCode::FORBIDDEN,

        CheckoutError::InvalidToken(_) => StatusCode::UNAUTHORIZED,

        CheckoutError::AlreadyPaid(_)
        | CheckoutError::NotCancellable { .. }
        | CheckoutError::Order(OrderError::InvalidTransition { .. }) => StatusCode::CONFLICT,

        CheckoutError::UserNotEligible(_)
        | CheckoutError::EmptyCart
        | CheckoutError::QuantityOutOfRange { .. }
        | CheckoutError::ProductUnavailable(_)
        | CheckoutError::MissingPrice(_)
        | CheckoutError::ForeignProduct { .. }
        | CheckoutError::OrganizationInactive(_)
        | CheckoutError::NoOrders
        | CheckoutError::ZeroAmount
        | CheckoutError::UnsupportedProvider(_)
        | CheckoutError::Cart(CartError::InvalidQuantity { .. })
        | CheckoutError::Order(OrderError::NoItems) => StatusCode::BAD_REQUEST,

        CheckoutError::Provider(_) => StatusCode::BAD_GATEWAY,

        CheckoutError::Split(_) | CheckoutError::Store(_) | CheckoutError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
