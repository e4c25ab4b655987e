//! Payment intent repository contract and in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::PaymentIntentId;
use domain::PaymentIntent;
use tokio::sync::RwLock;

use crate::error::{Result, StoreError};

/// Persistence contract for payment intents.
#[async_trait]
pub trait PaymentIntentRepository: Send + Sync {
    async fn create(&self, intent: &PaymentIntent) -> Result<()>;

    async fn update(&self, intent: &PaymentIntent) -> Result<()>;

    async fn find_by_id(&self, id: PaymentIntentId) -> Result<Option<PaymentIntent>>;

    /// Looks up the intent by the reference handed to the provider at
    /// session creation. This is the key provider callbacks carry.
    async fn find_by_provider_reference(
        &self,
        reference: &str,
    ) -> Result<Option<PaymentIntent>>;

    async fn find_many_pending(&self) -> Result<Vec<PaymentIntent>>;

    /// Pending intents whose `expires_at` lies strictly before
    /// `cutoff`.
    async fn find_expired_before(&self, cutoff: DateTime<Utc>) -> Result<Vec<PaymentIntent>>;
}

/// In-memory payment intent repository.
#[derive(Clone, Default)]
pub struct InMemoryPaymentIntentRepository {
    intents: Arc<RwLock<HashMap<PaymentIntentId, PaymentIntent>>>,
}

impl InMemoryPaymentIntentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn intent_count(&self) -> usize {
        self.intents.read().await.len()
    }
}

#[async_trait]
impl PaymentIntentRepository for InMemoryPaymentIntentRepository {
    async fn create(&self, intent: &PaymentIntent) -> Result<()> {
        let mut intents = self.intents.write().await;
        if intents.contains_key(&intent.id()) {
            return Err(StoreError::Conflict(intent.id().to_string()));
        }
        intents.insert(intent.id(), intent.clone());
        Ok(())
    }

    async fn update(&self, intent: &PaymentIntent) -> Result<()> {
        let mut intents = self.intents.write().await;
        if !intents.contains_key(&intent.id()) {
            return Err(StoreError::NotFound(intent.id().to_string()));
        }
        intents.insert(intent.id(), intent.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: PaymentIntentId) -> Result<Option<PaymentIntent>> {
        Ok(self.intents.read().await.get(&id).cloned())
    }

    async fn find_by_provider_reference(
        &self,
        reference: &str,
    ) -> Result<Option<PaymentIntent>> {
        let intents = self.intents.read().await;
        Ok(intents
            .values()
            .find(|i| i.provider_reference() == reference)
            .cloned())
    }

    async fn find_many_pending(&self) -> Result<Vec<PaymentIntent>> {
        let intents = self.intents.read().await;
        let mut pending: Vec<PaymentIntent> = intents
            .values()
            .filter(|i| !i.is_terminal())
            .cloned()
            .collect();
        pending.sort_by_key(|i| i.created_at());
        Ok(pending)
    }

    async fn find_expired_before(&self, cutoff: DateTime<Utc>) -> Result<Vec<PaymentIntent>> {
        let intents = self.intents.read().await;
        let mut expired: Vec<PaymentIntent> = intents
            .values()
            .filter(|i| {
                !i.is_terminal() && i.expires_at().is_some_and(|deadline| deadline < cutoff)
            })
            .cloned()
            .collect();
        expired.sort_by_key(|i| i.created_at());
        Ok(expired)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use common::{OrderId, UserId};
    use domain::{Money, NewPaymentIntent, PaymentProvider};

    use super::*;

    fn intent(reference: &str, expires_at: Option<DateTime<Utc>>) -> PaymentIntent {
        PaymentIntent::create(NewPaymentIntent {
            user_id: UserId::new(),
            order_ids: vec![OrderId::new()],
            amount: Money::from_cents(1000),
            currency: "USD".to_string(),
            provider: PaymentProvider::Payrex,
            provider_reference: reference.to_string(),
            transaction_ids: vec![],
            expires_at,
            metadata: serde_json::json!({}),
        })
    }

    #[tokio::test]
    async fn create_and_find_by_reference() {
        let repo = InMemoryPaymentIntentRepository::new();
        let intent = intent("PRX-AAAAAAAAAAA", None);
        repo.create(&intent).await.unwrap();

        let found = repo
            .find_by_provider_reference("PRX-AAAAAAAAAAA")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id(), intent.id());

        let missing = repo
            .find_by_provider_reference("PRX-BBBBBBBBBBB")
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn update_persists_status_change() {
        let repo = InMemoryPaymentIntentRepository::new();
        let mut intent = intent("PRX-CCCCCCCCCCC", None);
        repo.create(&intent).await.unwrap();

        intent.mark_succeeded();
        repo.update(&intent).await.unwrap();

        let found = repo.find_by_id(intent.id()).await.unwrap().unwrap();
        assert!(found.is_terminal());
    }

    #[tokio::test]
    async fn pending_excludes_terminal() {
        let repo = InMemoryPaymentIntentRepository::new();
        let pending = intent("PRX-DDDDDDDDDDD", None);
        let mut done = intent("PRX-EEEEEEEEEEE", None);
        done.mark_failed();
        repo.create(&pending).await.unwrap();
        repo.create(&done).await.unwrap();

        let found = repo.find_many_pending().await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), pending.id());
    }

    #[tokio::test]
    async fn expired_before_honors_cutoff() {
        let repo = InMemoryPaymentIntentRepository::new();
        let now = Utc::now();
        let overdue = intent("PRX-FFFFFFFFFFF", Some(now - Duration::minutes(10)));
        let fresh = intent("PRX-GGGGGGGGGGG", Some(now + Duration::minutes(10)));
        let open_ended = intent("PRX-HHHHHHHHHHH", None);
        for i in [&overdue, &fresh, &open_ended] {
            repo.create(i).await.unwrap();
        }

        let found = repo.find_expired_before(now).await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), overdue.id());
    }
}
