//! Payment provider abstraction.
//!
//! The registry maps a [`PaymentProvider`] to a session-creation
//! capability, so new gateways are added by registering an adapter
//! rather than touching the payment-intent use case.

mod memory;
mod payrex;

pub use memory::InMemoryPaymentProvider;
pub use payrex::PayrexProvider;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{OrderId, UserId};
use domain::{Money, PaymentProvider};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::CheckoutError;

/// Errors surfaced by provider adapters.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider api error status={status} body={body}")]
    Api { status: u16, body: String },

    #[error("invalid provider response: {0}")]
    InvalidResponse(String),

    #[error("payment declined: {0}")]
    Declined(String),
}

/// Parameters for creating a checkout session with a provider.
#[derive(Debug, Clone, Serialize)]
pub struct CreateSessionParams {
    pub user_id: UserId,
    pub amount: Money,
    pub currency: String,
    pub order_ids: Vec<OrderId>,
    /// The reference the provider will echo back in callbacks.
    pub reference: String,
}

/// A provider-side checkout session in the platform's standard shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSession {
    pub transaction_id: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub payment_url: Option<String>,
}

/// One capability per gateway: open a checkout session.
#[async_trait]
pub trait PaymentProviderService: Send + Sync {
    async fn create_session(
        &self,
        params: CreateSessionParams,
    ) -> Result<PaymentSession, ProviderError>;
}

/// Maps provider enum values to their adapters.
#[derive(Default)]
pub struct PaymentProviderRegistry {
    providers: HashMap<PaymentProvider, Arc<dyn PaymentProviderService>>,
}

impl PaymentProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an adapter, replacing any previous one for the same
    /// provider.
    pub fn register(&mut self, provider: PaymentProvider, service: Arc<dyn PaymentProviderService>) {
        self.providers.insert(provider, service);
    }

    /// Resolves the adapter for a provider.
    pub fn get(
        &self,
        provider: PaymentProvider,
    ) -> Result<Arc<dyn PaymentProviderService>, CheckoutError> {
        self.providers
            .get(&provider)
            .cloned()
            .ok_or(CheckoutError::UnsupportedProvider(provider))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn registry_resolves_registered_provider() {
        let mut registry = PaymentProviderRegistry::new();
        registry.register(
            PaymentProvider::Payrex,
            Arc::new(InMemoryPaymentProvider::new()),
        );

        let service = registry.get(PaymentProvider::Payrex).unwrap();
        let session = service
            .create_session(CreateSessionParams {
                user_id: UserId::new(),
                amount: Money::from_cents(1000),
                currency: "USD".to_string(),
                order_ids: vec![OrderId::new()],
                reference: "PRX-AAAAAAAAAAA".to_string(),
            })
            .await
            .unwrap();

        assert!(!session.transaction_id.is_empty());
    }

    #[test]
    fn unregistered_provider_fails() {
        let registry = PaymentProviderRegistry::new();
        let result = registry.get(PaymentProvider::Payrex);
        assert!(matches!(
            result,
            Err(CheckoutError::UnsupportedProvider(PaymentProvider::Payrex))
        ));
    }
}
