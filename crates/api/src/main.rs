//! API server entry point.

use std::sync::Arc;

use checkout::providers::{InMemoryPaymentProvider, PaymentProviderRegistry, PayrexProvider};
use checkout::token::JwtTokenSigner;
use domain::PaymentProvider;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

#[tokio::main]
async fn main() {
    let config = api::config::Config::from_env();

    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Install Prometheus metrics recorder
    let prometheus_builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    let metrics_handle = prometheus_builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Wire the provider registry from configuration
    let mut registry = PaymentProviderRegistry::new();
    match &config.payrex_api_key {
        Some(api_key) => {
            registry.register(
                PaymentProvider::Payrex,
                Arc::new(PayrexProvider::new(&config.payrex_base_url, api_key)),
            );
        }
        None => {
            tracing::warn!("PAYREX_API_KEY not set; wiring in-memory payment provider");
            registry.register(
                PaymentProvider::Payrex,
                Arc::new(InMemoryPaymentProvider::new()),
            );
        }
    }

    // 4. Build application state and router
    let signer = Arc::new(JwtTokenSigner::new(&config.jwt_secret));
    let default_state = api::create_default_state(registry, signer);
    let app = api::create_app(default_state.state, metrics_handle);

    // 5. Start server
    let addr = config.addr();
    tracing::info!(%addr, "starting API server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("server shut down gracefully");
}
