//! In-memory payment provider for tests.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::{CreateSessionParams, PaymentProviderService, PaymentSession, ProviderError};

#[derive(Debug, Default)]
struct InMemoryProviderState {
    sessions: Vec<CreateSessionParams>,
    next_id: u32,
    fail_on_create: bool,
}

/// Records sessions instead of calling a gateway. A failure toggle
/// simulates a declining provider.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentProvider {
    state: Arc<RwLock<InMemoryProviderState>>,
}

impl InMemoryPaymentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the provider to fail on the next create call.
    pub fn set_fail_on_create(&self, fail: bool) {
        self.state.write().unwrap().fail_on_create = fail;
    }

    /// Returns the number of sessions created.
    pub fn session_count(&self) -> usize {
        self.state.read().unwrap().sessions.len()
    }

    /// Returns the reference of the most recent session, if any.
    pub fn last_reference(&self) -> Option<String> {
        self.state
            .read()
            .unwrap()
            .sessions
            .last()
            .map(|s| s.reference.clone())
    }
}

#[async_trait]
impl PaymentProviderService for InMemoryPaymentProvider {
    async fn create_session(
        &self,
        params: CreateSessionParams,
    ) -> Result<PaymentSession, ProviderError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_create {
            return Err(ProviderError::Declined("session refused".to_string()));
        }

        state.next_id += 1;
        let transaction_id = format!("TXN-{:04}", state.next_id);
        let payment_url = format!("https://pay.example/checkout/{}", params.reference);
        state.sessions.push(params);

        Ok(PaymentSession {
            transaction_id,
            expires_at: None,
            payment_url: Some(payment_url),
        })
    }
}
