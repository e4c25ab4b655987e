//! Order repository contract and in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{OrderId, OrganizationId, UserId};
use domain::{FulfillmentStatus, Order, PaymentStatus};
use tokio::sync::RwLock;

use crate::error::{Result, StoreError};

/// Optional status filters for order listings.
#[derive(Debug, Clone, Default)]
pub struct OrderFilters {
    pub payment_status: Option<PaymentStatus>,
    pub fulfillment_status: Option<FulfillmentStatus>,
}

impl OrderFilters {
    fn matches(&self, order: &Order) -> bool {
        self.payment_status
            .is_none_or(|s| order.payment_status() == s)
            && self
                .fulfillment_status
                .is_none_or(|s| order.fulfillment_status() == s)
    }
}

/// Persistence contract for orders.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create(&self, order: &Order) -> Result<()>;

    async fn update(&self, order: &Order) -> Result<()>;

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>>;

    /// Returns the orders found for `ids`; missing ids are simply
    /// absent from the result (callers detect this by count).
    async fn find_many_by_ids(&self, ids: &[OrderId]) -> Result<Vec<Order>>;

    async fn find_all_by_user_id(
        &self,
        user_id: UserId,
        filters: &OrderFilters,
    ) -> Result<Vec<Order>>;

    async fn find_all_by_organization_id(
        &self,
        organization_id: OrganizationId,
        filters: &OrderFilters,
    ) -> Result<Vec<Order>>;

    async fn find_all_by_transaction_id(&self, transaction_id: &str) -> Result<Vec<Order>>;

    /// Persists a batch of updated orders.
    async fn update_many(&self, orders: &[Order]) -> Result<()>;
}

/// In-memory order repository for tests and the default wiring.
#[derive(Clone, Default)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of stored orders.
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }
}

fn sorted_by_creation(mut orders: Vec<Order>) -> Vec<Order> {
    orders.sort_by_key(|o| o.created_at());
    orders
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, order: &Order) -> Result<()> {
        let mut orders = self.orders.write().await;
        if orders.contains_key(&order.id()) {
            return Err(StoreError::Conflict(order.id().to_string()));
        }
        orders.insert(order.id(), order.clone());
        Ok(())
    }

    async fn update(&self, order: &Order) -> Result<()> {
        let mut orders = self.orders.write().await;
        if !orders.contains_key(&order.id()) {
            return Err(StoreError::NotFound(order.id().to_string()));
        }
        orders.insert(order.id(), order.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>> {
        Ok(self.orders.read().await.get(&id).cloned())
    }

    async fn find_many_by_ids(&self, ids: &[OrderId]) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        Ok(ids.iter().filter_map(|id| orders.get(id).cloned()).collect())
    }

    async fn find_all_by_user_id(
        &self,
        user_id: UserId,
        filters: &OrderFilters,
    ) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        Ok(sorted_by_creation(
            orders
                .values()
                .filter(|o| o.user_id() == user_id && filters.matches(o))
                .cloned()
                .collect(),
        ))
    }

    async fn find_all_by_organization_id(
        &self,
        organization_id: OrganizationId,
        filters: &OrderFilters,
    ) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        Ok(sorted_by_creation(
            orders
                .values()
                .filter(|o| o.organization_id() == organization_id && filters.matches(o))
                .cloned()
                .collect(),
        ))
    }

    async fn find_all_by_transaction_id(&self, transaction_id: &str) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        Ok(sorted_by_creation(
            orders
                .values()
                .filter(|o| o.transaction_id() == Some(transaction_id))
                .cloned()
                .collect(),
        ))
    }

    async fn update_many(&self, updated: &[Order]) -> Result<()> {
        let mut orders = self.orders.write().await;
        for order in updated {
            if !orders.contains_key(&order.id()) {
                return Err(StoreError::NotFound(order.id().to_string()));
            }
        }
        for order in updated {
            orders.insert(order.id(), order.clone());
        }
        Ok(())
    }
}
