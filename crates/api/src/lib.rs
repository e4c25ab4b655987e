//! HTTP API server with observability for the commerce platform.
//!
//! Provides REST endpoints for carts, orders, checkout, and the
//! provider payment webhook, with structured logging (tracing) and
//! Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use checkout::providers::PaymentProviderRegistry;
use checkout::token::TokenSigner;
use checkout::{CartService, OrderService, PaymentIntentService};
use metrics_exporter_prometheus::PrometheusHandle;
use store::{
    InMemoryCartRepository, InMemoryOrderRepository, InMemoryOrganizationRepository,
    InMemoryPaymentIntentRepository, InMemoryPriceRepository, InMemoryProductRepository,
    InMemoryUserRepository,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route(
            "/users/{user_id}/cart",
            get(routes::carts::get_cart).delete(routes::carts::clear),
        )
        .route("/users/{user_id}/cart/items", post(routes::carts::add_item))
        .route(
            "/users/{user_id}/cart/items/{product_id}",
            axum::routing::patch(routes::carts::update_item).delete(routes::carts::remove_item),
        )
        .route(
            "/users/{user_id}/orders",
            post(routes::orders::create_from_cart).get(routes::orders::list),
        )
        .route(
            "/organizations/{organization_id}/orders",
            get(routes::orders::list_for_organization),
        )
        .route("/orders/{id}", get(routes::orders::get))
        .route("/orders/{id}/cancel", post(routes::orders::cancel))
        .route("/orders/{id}/move", post(routes::orders::move_order))
        .route(
            "/users/{user_id}/payment-intents",
            post(routes::payments::create_intent),
        )
        .route("/checkout/session", get(routes::payments::get_session))
        .route(
            "/payments/{provider}/callback",
            post(routes::payments::provider_callback),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// The default wiring: in-memory repositories behind the full service
/// graph, constructed once and injected explicitly.
pub struct DefaultState {
    pub state: Arc<AppState>,
    pub orders: Arc<InMemoryOrderRepository>,
    pub carts: Arc<InMemoryCartRepository>,
    pub products: Arc<InMemoryProductRepository>,
    pub prices: Arc<InMemoryPriceRepository>,
    pub organizations: Arc<InMemoryOrganizationRepository>,
    pub users: Arc<InMemoryUserRepository>,
    pub intents: Arc<InMemoryPaymentIntentRepository>,
}

/// Builds the application state over in-memory stores.
///
/// The provider registry and token signer are supplied by the caller
/// so production wiring and tests can differ only there.
pub fn create_default_state(
    registry: PaymentProviderRegistry,
    signer: Arc<dyn TokenSigner>,
) -> DefaultState {
    let orders = Arc::new(InMemoryOrderRepository::new());
    let carts = Arc::new(InMemoryCartRepository::new());
    let products = Arc::new(InMemoryProductRepository::new());
    let prices = Arc::new(InMemoryPriceRepository::new());
    let organizations = Arc::new(InMemoryOrganizationRepository::new());
    let users = Arc::new(InMemoryUserRepository::new());
    let intents = Arc::new(InMemoryPaymentIntentRepository::new());

    let cart_service = Arc::new(CartService::new(
        carts.clone(),
        products.clone(),
        prices.clone(),
    ));
    let order_service = Arc::new(OrderService::new(
        orders.clone(),
        carts.clone(),
        products.clone(),
        prices.clone(),
        organizations.clone(),
        users.clone(),
        intents.clone(),
    ));
    let payment_service = Arc::new(PaymentIntentService::new(
        orders.clone(),
        intents.clone(),
        Arc::new(registry),
        signer,
        order_service.clone(),
        "USD",
    ));

    let state = Arc::new(AppState {
        cart_service,
        order_service,
        payment_service,
    });

    DefaultState {
        state,
        orders,
        carts,
        products,
        prices,
        organizations,
        users,
        intents,
    }
}
