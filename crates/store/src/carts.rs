//! Cart repository contract and in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::UserId;
use domain::Cart;
use tokio::sync::RwLock;

use crate::error::Result;

/// Persistence contract for carts. One cart per user.
#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn find_by_user_id(&self, user_id: UserId) -> Result<Option<Cart>>;

    /// Inserts or replaces the user's cart.
    async fn save(&self, cart: &Cart) -> Result<()>;

    async fn delete(&self, user_id: UserId) -> Result<()>;
}

/// In-memory cart repository keyed by user.
#[derive(Clone, Default)]
pub struct InMemoryCartRepository {
    carts: Arc<RwLock<HashMap<UserId, Cart>>>,
}

impl InMemoryCartRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn cart_count(&self) -> usize {
        self.carts.read().await.len()
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn find_by_user_id(&self, user_id: UserId) -> Result<Option<Cart>> {
        Ok(self.carts.read().await.get(&user_id).cloned())
    }

    async fn save(&self, cart: &Cart) -> Result<()> {
        self.carts.write().await.insert(cart.user_id(), cart.clone());
        Ok(())
    }

    async fn delete(&self, user_id: UserId) -> Result<()> {
        self.carts.write().await.remove(&user_id);
        Ok(())
    }
}
