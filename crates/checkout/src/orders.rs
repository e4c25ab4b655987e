//! Order use cases.

use std::collections::HashMap;
use std::sync::Arc;

use common::{OrderId, OrganizationId, PaymentIntentId, ProductId, UserId};
use domain::{
    CartItem, FulfillmentStatus, Order, OrderItem, PaymentStatus, Price, split_by_organization,
};
use store::{
    CartRepository, OrderFilters, OrderRepository, OrganizationRepository, PaymentIntentRepository,
    PriceRepository, ProductRepository, UserRepository,
};

use crate::error::{CheckoutError, Result};

/// Order lifecycle orchestration.
///
/// Entities expose unconditional mutators; the preconditions
/// (ownership, cancellability, already-paid) are enforced here.
pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    carts: Arc<dyn CartRepository>,
    products: Arc<dyn ProductRepository>,
    prices: Arc<dyn PriceRepository>,
    organizations: Arc<dyn OrganizationRepository>,
    users: Arc<dyn UserRepository>,
    intents: Arc<dyn PaymentIntentRepository>,
}

impl OrderService {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        carts: Arc<dyn CartRepository>,
        products: Arc<dyn ProductRepository>,
        prices: Arc<dyn PriceRepository>,
        organizations: Arc<dyn OrganizationRepository>,
        users: Arc<dyn UserRepository>,
        intents: Arc<dyn PaymentIntentRepository>,
    ) -> Self {
        Self {
            orders,
            carts,
            products,
            prices,
            organizations,
            users,
            intents,
        }
    }

    /// Splits the user's cart into one order per organization.
    ///
    /// Validates the user, resolves and prices every referenced
    /// product, checks every owning organization is active, and
    /// persists one order per organization with catalog state
    /// snapshotted into the items. The cart is NOT cleared here;
    /// clearing is a separate, explicitly invoked step.
    #[tracing::instrument(skip(self))]
    pub async fn create_orders_from_cart(
        &self,
        user_id: UserId,
        product_filter: Option<&[ProductId]>,
    ) -> Result<Vec<Order>> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(CheckoutError::UserNotFound(user_id))?;
        if !user.can_checkout() {
            return Err(CheckoutError::UserNotEligible(user_id));
        }

        let cart = self
            .carts
            .find_by_user_id(user_id)
            .await?
            .ok_or(CheckoutError::CartNotFound(user_id))?;
        let items: Vec<CartItem> = match product_filter {
            Some(filter) => cart
                .items()
                .iter()
                .filter(|i| filter.contains(&i.product_id))
                .cloned()
                .collect(),
            None => cart.items().to_vec(),
        };
        if items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let product_ids: Vec<ProductId> = items.iter().map(|i| i.product_id).collect();
        let products = self.products.find_many_by_ids(&product_ids).await?;
        if products.len() != product_ids.len() {
            let missing = product_ids
                .iter()
                .find(|id| !products.iter().any(|p| p.id == **id))
                .copied()
                .unwrap_or(product_ids[0]);
            return Err(CheckoutError::ProductNotFound(missing));
        }

        let groups = split_by_organization(&items, &products)?;

        let org_ids: Vec<OrganizationId> = groups.keys().copied().collect();
        let organizations = self.organizations.find_many_by_ids(&org_ids).await?;
        if organizations.len() != org_ids.len() {
            let missing = org_ids
                .iter()
                .find(|id| !organizations.iter().any(|o| o.id == **id))
                .copied()
                .unwrap_or(org_ids[0]);
            return Err(CheckoutError::OrganizationNotFound(missing));
        }
        if let Some(inactive) = organizations.iter().find(|o| !o.active) {
            return Err(CheckoutError::OrganizationInactive(inactive.id));
        }

        let priced = self.resolve_prices(&products).await?;

        let mut created = Vec::with_capacity(groups.len());
        for (organization_id, group_items) in groups {
            let order_items = build_order_items(&group_items, &priced);
            let order = Order::create(user_id, organization_id, order_items)?;
            self.orders.create(&order).await?;
            created.push(order);
        }

        metrics::counter!("orders_created_total").increment(created.len() as u64);
        tracing::info!(%user_id, orders = created.len(), "orders created from cart");
        Ok(created)
    }

    /// Creates one order directly from an item list, bypassing the
    /// cart. All products must belong to `organization_id`.
    #[tracing::instrument(skip(self, lines))]
    pub async fn create_order(
        &self,
        user_id: UserId,
        organization_id: OrganizationId,
        lines: &[(ProductId, u32)],
    ) -> Result<Order> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(CheckoutError::UserNotFound(user_id))?;
        if !user.can_checkout() {
            return Err(CheckoutError::UserNotEligible(user_id));
        }

        let organization = self
            .organizations
            .find_many_by_ids(&[organization_id])
            .await?
            .into_iter()
            .next()
            .ok_or(CheckoutError::OrganizationNotFound(organization_id))?;
        if !organization.active {
            return Err(CheckoutError::OrganizationInactive(organization_id));
        }

        let product_ids: Vec<ProductId> = lines.iter().map(|(id, _)| *id).collect();
        let products = self.products.find_many_by_ids(&product_ids).await?;
        if products.len() != product_ids.len() {
            let missing = product_ids
                .iter()
                .find(|id| !products.iter().any(|p| p.id == **id))
                .copied()
                .unwrap_or(product_ids[0]);
            return Err(CheckoutError::ProductNotFound(missing));
        }
        for product in &products {
            if product.organization_id != organization_id {
                return Err(CheckoutError::ForeignProduct {
                    product_id: product.id,
                    organization_id,
                });
            }
            if !product.is_active() {
                return Err(CheckoutError::ProductUnavailable(product.id));
            }
        }

        let priced = self.resolve_prices(&products).await?;
        let items: Vec<CartItem> = lines
            .iter()
            .map(|&(product_id, quantity)| CartItem {
                product_id,
                quantity,
            })
            .collect();
        let order = Order::create(user_id, organization_id, build_order_items(&items, &priced))?;
        self.orders.create(&order).await?;

        metrics::counter!("orders_created_total").increment(1);
        Ok(order)
    }

    /// Flips the listed orders from payment-pending to paid. Orders
    /// already past pending are skipped, which makes repeated cascades
    /// idempotent. Returns the number of orders flipped.
    #[tracing::instrument(skip(self))]
    pub async fn mark_as_paid_by_ids(
        &self,
        order_ids: &[OrderId],
        transaction_id: Option<&str>,
    ) -> Result<usize> {
        let orders = self.orders.find_many_by_ids(order_ids).await?;
        self.mark_paid(orders, transaction_id).await
    }

    /// Flips every payment-pending order carrying the transaction id.
    #[tracing::instrument(skip(self))]
    pub async fn mark_as_paid_by_transaction_id(&self, transaction_id: &str) -> Result<usize> {
        let orders = self.orders.find_all_by_transaction_id(transaction_id).await?;
        self.mark_paid(orders, Some(transaction_id)).await
    }

    /// Flips the payment-pending orders referenced by an intent.
    #[tracing::instrument(skip(self))]
    pub async fn mark_as_paid_by_intent_id(&self, intent_id: PaymentIntentId) -> Result<usize> {
        let intent = self
            .intents
            .find_by_id(intent_id)
            .await?
            .ok_or(CheckoutError::IntentNotFound(intent_id))?;
        let transaction_id = intent.transaction_ids().first().map(String::as_str);
        let orders = self.orders.find_many_by_ids(intent.order_ids()).await?;
        self.mark_paid(orders, transaction_id).await
    }

    async fn mark_paid(&self, orders: Vec<Order>, transaction_id: Option<&str>) -> Result<usize> {
        let mut updated = Vec::new();
        for mut order in orders {
            if !order.is_payment_pending() {
                continue;
            }
            order.mark_as_paid(transaction_id.map(str::to_string));
            updated.push(order);
        }
        if !updated.is_empty() {
            self.orders.update_many(&updated).await?;
            metrics::counter!("orders_paid_total").increment(updated.len() as u64);
        }
        Ok(updated.len())
    }

    /// Cancels an order on behalf of its owner.
    ///
    /// Fails closed on ownership mismatch. Only unfulfilled (NEW),
    /// unpaid orders can be cancelled.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_order(
        &self,
        caller: UserId,
        order_id: OrderId,
        reason: Option<String>,
    ) -> Result<Order> {
        let mut order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or(CheckoutError::OrderNotFound(order_id))?;
        if order.user_id() != caller {
            return Err(CheckoutError::OwnershipMismatch(order_id));
        }
        if order.payment_status() == PaymentStatus::Paid {
            return Err(CheckoutError::AlreadyPaid(order_id));
        }
        if !order.fulfillment_status().can_cancel() {
            return Err(CheckoutError::NotCancellable {
                order_id,
                status: order.fulfillment_status(),
            });
        }

        order.cancel(reason);
        self.orders.update(&order).await?;

        metrics::counter!("orders_cancelled_total").increment(1);
        tracing::info!(%order_id, "order cancelled");
        Ok(order)
    }

    /// Expires a stale order via the transition table.
    #[tracing::instrument(skip(self))]
    pub async fn expire_order(&self, order_id: OrderId) -> Result<Order> {
        let mut order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or(CheckoutError::OrderNotFound(order_id))?;
        order.update_fulfillment_status(FulfillmentStatus::Expired)?;
        self.orders.update(&order).await?;
        Ok(order)
    }

    /// Generic fulfillment progression; the target must be a legal
    /// forward transition.
    #[tracing::instrument(skip(self))]
    pub async fn move_order(&self, order_id: OrderId, target: FulfillmentStatus) -> Result<Order> {
        let mut order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or(CheckoutError::OrderNotFound(order_id))?;
        order.update_fulfillment_status(target)?;
        self.orders.update(&order).await?;
        Ok(order)
    }

    pub async fn get_order(&self, order_id: OrderId) -> Result<Order> {
        self.orders
            .find_by_id(order_id)
            .await?
            .ok_or(CheckoutError::OrderNotFound(order_id))
    }

    pub async fn list_for_user(
        &self,
        user_id: UserId,
        filters: &OrderFilters,
    ) -> Result<Vec<Order>> {
        Ok(self.orders.find_all_by_user_id(user_id, filters).await?)
    }

    pub async fn list_for_organization(
        &self,
        organization_id: OrganizationId,
        filters: &OrderFilters,
    ) -> Result<Vec<Order>> {
        Ok(self
            .orders
            .find_all_by_organization_id(organization_id, filters)
            .await?)
    }

    async fn resolve_prices(
        &self,
        products: &[domain::Product],
    ) -> Result<HashMap<ProductId, (String, Price)>> {
        let mut priced = HashMap::with_capacity(products.len());
        for product in products {
            let price = self
                .prices
                .find_active_for_product(product.id)
                .await?
                .ok_or(CheckoutError::MissingPrice(product.id))?;
            priced.insert(product.id, (product.name.clone(), price));
        }
        Ok(priced)
    }
}

fn build_order_items(
    items: &[CartItem],
    priced: &HashMap<ProductId, (String, Price)>,
) -> Vec<OrderItem> {
    items
        .iter()
        .map(|ci| {
            let (name, price) = &priced[&ci.product_id];
            OrderItem::new(
                price.id,
                ci.product_id,
                name.clone(),
                ci.quantity,
                price.unit_amount,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::testing::{Fixture, seed_product, seed_user};

    use super::*;

    #[tokio::test]
    async fn cart_spanning_two_organizations_creates_two_orders() {
        let f = Fixture::new();
        let user_id = seed_user(&f, true).await;
        let org1 = f.seed_organization(true).await;
        let org2 = f.seed_organization(true).await;
        let product_a = seed_product(&f, org1, 500).await;
        let product_b = seed_product(&f, org2, 1000).await;
        f.put_cart(user_id, &[(product_a, 2), (product_b, 1)]).await;

        let orders = f
            .order_service
            .create_orders_from_cart(user_id, None)
            .await
            .unwrap();

        assert_eq!(orders.len(), 2);
        let by_org: HashMap<OrganizationId, &Order> =
            orders.iter().map(|o| (o.organization_id(), o)).collect();
        assert_eq!(by_org[&org1].total_amount().cents(), 1000);
        assert_eq!(by_org[&org2].total_amount().cents(), 1000);
        for order in &orders {
            assert_eq!(order.payment_status(), PaymentStatus::Pending);
            assert_eq!(order.fulfillment_status(), FulfillmentStatus::New);
            let sum: i64 = order.items().iter().map(|i| i.subtotal.cents()).sum();
            assert_eq!(order.total_amount().cents(), sum);
        }
    }

    #[tokio::test]
    async fn product_filter_narrows_the_order() {
        let f = Fixture::new();
        let user_id = seed_user(&f, true).await;
        let org = f.seed_organization(true).await;
        let product_a = seed_product(&f, org, 500).await;
        let product_b = seed_product(&f, org, 700).await;
        f.put_cart(user_id, &[(product_a, 1), (product_b, 1)]).await;

        let orders = f
            .order_service
            .create_orders_from_cart(user_id, Some(&[product_a]))
            .await
            .unwrap();

        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].items().len(), 1);
        assert_eq!(orders[0].total_amount().cents(), 500);
    }

    #[tokio::test]
    async fn cart_is_not_cleared_by_order_creation() {
        let f = Fixture::new();
        let user_id = seed_user(&f, true).await;
        let org = f.seed_organization(true).await;
        let product = seed_product(&f, org, 500).await;
        f.put_cart(user_id, &[(product, 1)]).await;

        let first = f
            .order_service
            .create_orders_from_cart(user_id, None)
            .await
            .unwrap();
        // The cart survives; a second call happily orders it again.
        let second = f
            .order_service
            .create_orders_from_cart(user_id, None)
            .await
            .unwrap();

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_ne!(first[0].id(), second[0].id());
    }

    #[tokio::test]
    async fn ineligible_user_is_rejected() {
        let f = Fixture::new();
        let user_id = seed_user(&f, false).await;

        let result = f.order_service.create_orders_from_cart(user_id, None).await;

        assert!(matches!(result, Err(CheckoutError::UserNotEligible(_))));
    }

    #[tokio::test]
    async fn empty_cart_is_rejected() {
        let f = Fixture::new();
        let user_id = seed_user(&f, true).await;
        f.put_cart(user_id, &[]).await;

        let result = f.order_service.create_orders_from_cart(user_id, None).await;

        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    }

    #[tokio::test]
    async fn filter_matching_nothing_is_rejected() {
        let f = Fixture::new();
        let user_id = seed_user(&f, true).await;
        let org = f.seed_organization(true).await;
        let product = seed_product(&f, org, 500).await;
        f.put_cart(user_id, &[(product, 1)]).await;

        let result = f
            .order_service
            .create_orders_from_cart(user_id, Some(&[ProductId::new()]))
            .await;

        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    }

    #[tokio::test]
    async fn unresolved_product_is_rejected() {
        let f = Fixture::new();
        let user_id = seed_user(&f, true).await;
        let ghost = ProductId::new();
        f.put_cart(user_id, &[(ghost, 1)]).await;

        let result = f.order_service.create_orders_from_cart(user_id, None).await;

        assert!(matches!(result, Err(CheckoutError::ProductNotFound(id)) if id == ghost));
    }

    #[tokio::test]
    async fn inactive_organization_is_rejected() {
        let f = Fixture::new();
        let user_id = seed_user(&f, true).await;
        let org = f.seed_organization(false).await;
        let product = seed_product(&f, org, 500).await;
        f.put_cart(user_id, &[(product, 1)]).await;

        let result = f.order_service.create_orders_from_cart(user_id, None).await;

        assert!(matches!(result, Err(CheckoutError::OrganizationInactive(id)) if id == org));
    }

    #[tokio::test]
    async fn unpriced_product_is_rejected() {
        let f = Fixture::new();
        let user_id = seed_user(&f, true).await;
        let org = f.seed_organization(true).await;
        let product = f.seed_unpriced_product(org).await;
        f.put_cart(user_id, &[(product, 1)]).await;

        let result = f.order_service.create_orders_from_cart(user_id, None).await;

        assert!(matches!(result, Err(CheckoutError::MissingPrice(id)) if id == product));
    }

    #[tokio::test]
    async fn direct_create_rejects_foreign_product() {
        let f = Fixture::new();
        let user_id = seed_user(&f, true).await;
        let org1 = f.seed_organization(true).await;
        let org2 = f.seed_organization(true).await;
        let foreign = seed_product(&f, org2, 500).await;

        let result = f
            .order_service
            .create_order(user_id, org1, &[(foreign, 1)])
            .await;

        assert!(matches!(result, Err(CheckoutError::ForeignProduct { .. })));
    }

    #[tokio::test]
    async fn direct_create_builds_single_order() {
        let f = Fixture::new();
        let user_id = seed_user(&f, true).await;
        let org = f.seed_organization(true).await;
        let product = seed_product(&f, org, 250).await;

        let order = f
            .order_service
            .create_order(user_id, org, &[(product, 4)])
            .await
            .unwrap();

        assert_eq!(order.total_amount().cents(), 1000);
        assert_eq!(order.organization_id(), org);
    }

    #[tokio::test]
    async fn mark_paid_by_ids_skips_non_pending() {
        let f = Fixture::new();
        let user_id = seed_user(&f, true).await;
        let org = f.seed_organization(true).await;
        let product = seed_product(&f, org, 500).await;
        let paid = f
            .order_service
            .create_order(user_id, org, &[(product, 1)])
            .await
            .unwrap();
        let pending = f
            .order_service
            .create_order(user_id, org, &[(product, 1)])
            .await
            .unwrap();
        f.order_service
            .mark_as_paid_by_ids(&[paid.id()], None)
            .await
            .unwrap();

        let flipped = f
            .order_service
            .mark_as_paid_by_ids(&[paid.id(), pending.id()], Some("TXN-X"))
            .await
            .unwrap();

        assert_eq!(flipped, 1);
        let reloaded = f.order_service.get_order(paid.id()).await.unwrap();
        assert_eq!(reloaded.payment_status(), PaymentStatus::Paid);
    }

    #[tokio::test]
    async fn mark_paid_by_transaction_id_flips_all_carriers() {
        let f = Fixture::new();
        let user_id = seed_user(&f, true).await;
        let org = f.seed_organization(true).await;
        let product = seed_product(&f, org, 500).await;
        let mut a = f
            .order_service
            .create_order(user_id, org, &[(product, 1)])
            .await
            .unwrap();
        let mut b = f
            .order_service
            .create_order(user_id, org, &[(product, 2)])
            .await
            .unwrap();
        a.set_transaction_id("TXN-77");
        b.set_transaction_id("TXN-77");
        f.orders.update_many(&[a.clone(), b.clone()]).await.unwrap();

        let flipped = f
            .order_service
            .mark_as_paid_by_transaction_id("TXN-77")
            .await
            .unwrap();

        assert_eq!(flipped, 2);
        for id in [a.id(), b.id()] {
            let order = f.order_service.get_order(id).await.unwrap();
            assert_eq!(order.payment_status(), PaymentStatus::Paid);
            assert_eq!(order.transaction_id(), Some("TXN-77"));
        }
    }

    #[tokio::test]
    async fn mark_paid_by_intent_id_flips_the_intent_orders() {
        let f = Fixture::new();
        let user_id = seed_user(&f, true).await;
        let org1 = f.seed_organization(true).await;
        let org2 = f.seed_organization(true).await;
        let product_a = seed_product(&f, org1, 500).await;
        let product_b = seed_product(&f, org2, 1000).await;
        f.put_cart(user_id, &[(product_a, 1), (product_b, 1)]).await;
        let orders = f
            .order_service
            .create_orders_from_cart(user_id, None)
            .await
            .unwrap();
        let order_ids: Vec<_> = orders.iter().map(|o| o.id()).collect();
        f.payment_service
            .create_payment_intent(user_id, &order_ids, domain::PaymentProvider::Payrex)
            .await
            .unwrap();
        let intent = f.intents.find_many_pending().await.unwrap().remove(0);

        let flipped = f
            .order_service
            .mark_as_paid_by_intent_id(intent.id())
            .await
            .unwrap();

        assert_eq!(flipped, 2);
        for id in order_ids {
            let order = f.order_service.get_order(id).await.unwrap();
            assert_eq!(order.payment_status(), PaymentStatus::Paid);
        }
    }

    #[tokio::test]
    async fn cancel_requires_ownership() {
        let f = Fixture::new();
        let owner = seed_user(&f, true).await;
        let org = f.seed_organization(true).await;
        let product = seed_product(&f, org, 500).await;
        let order = f
            .order_service
            .create_order(owner, org, &[(product, 1)])
            .await
            .unwrap();

        let result = f
            .order_service
            .cancel_order(UserId::new(), order.id(), None)
            .await;

        assert!(matches!(result, Err(CheckoutError::OwnershipMismatch(_))));
    }

    #[tokio::test]
    async fn cancel_rejects_paid_orders() {
        let f = Fixture::new();
        let user_id = seed_user(&f, true).await;
        let org = f.seed_organization(true).await;
        let product = seed_product(&f, org, 500).await;
        let order = f
            .order_service
            .create_order(user_id, org, &[(product, 1)])
            .await
            .unwrap();
        f.order_service
            .mark_as_paid_by_ids(&[order.id()], None)
            .await
            .unwrap();

        let result = f.order_service.cancel_order(user_id, order.id(), None).await;

        assert!(matches!(result, Err(CheckoutError::AlreadyPaid(_))));
    }

    #[tokio::test]
    async fn cancel_rejects_orders_in_delivery() {
        let f = Fixture::new();
        let user_id = seed_user(&f, true).await;
        let org = f.seed_organization(true).await;
        let product = seed_product(&f, org, 500).await;
        let order = f
            .order_service
            .create_order(user_id, org, &[(product, 1)])
            .await
            .unwrap();
        for target in [
            FulfillmentStatus::Picking,
            FulfillmentStatus::Packed,
            FulfillmentStatus::InDelivery,
        ] {
            f.order_service.move_order(order.id(), target).await.unwrap();
        }

        let result = f.order_service.cancel_order(user_id, order.id(), None).await;

        assert!(matches!(
            result,
            Err(CheckoutError::NotCancellable {
                status: FulfillmentStatus::InDelivery,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn cancel_records_reason() {
        let f = Fixture::new();
        let user_id = seed_user(&f, true).await;
        let org = f.seed_organization(true).await;
        let product = seed_product(&f, org, 500).await;
        let order = f
            .order_service
            .create_order(user_id, org, &[(product, 1)])
            .await
            .unwrap();

        let cancelled = f
            .order_service
            .cancel_order(user_id, order.id(), Some("changed my mind".to_string()))
            .await
            .unwrap();

        assert_eq!(
            cancelled.fulfillment_status(),
            FulfillmentStatus::Cancelled
        );
        assert_eq!(
            cancelled.meta().cancellation_reason.as_deref(),
            Some("changed my mind")
        );
    }

    #[tokio::test]
    async fn move_order_rejects_illegal_target() {
        let f = Fixture::new();
        let user_id = seed_user(&f, true).await;
        let org = f.seed_organization(true).await;
        let product = seed_product(&f, org, 500).await;
        let order = f
            .order_service
            .create_order(user_id, org, &[(product, 1)])
            .await
            .unwrap();

        let result = f
            .order_service
            .move_order(order.id(), FulfillmentStatus::Delivered)
            .await;

        assert!(matches!(
            result,
            Err(CheckoutError::Order(
                domain::OrderError::InvalidTransition { .. }
            ))
        ));
    }

    #[tokio::test]
    async fn expire_order_stamps_expiry() {
        let f = Fixture::new();
        let user_id = seed_user(&f, true).await;
        let org = f.seed_organization(true).await;
        let product = seed_product(&f, org, 500).await;
        let order = f
            .order_service
            .create_order(user_id, org, &[(product, 1)])
            .await
            .unwrap();

        let expired = f.order_service.expire_order(order.id()).await.unwrap();

        assert_eq!(expired.fulfillment_status(), FulfillmentStatus::Expired);
        assert!(expired.expired_at().is_some());
    }
}
