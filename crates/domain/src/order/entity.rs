//! Order aggregate.

use chrono::{DateTime, Utc};
use common::{OrderId, OrganizationId, PaymentIntentId, PriceId, ProductId, UserId};
use serde::{Deserialize, Serialize};

use crate::money::Money;

use super::code::generate_order_code;
use super::status::{FulfillmentStatus, PaymentStatus};
use super::OrderError;

/// A priced line in an order, snapshotted at creation time.
///
/// Name and unit amount are frozen copies of the catalog state at the
/// instant the order was created; later price changes never touch
/// existing orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub price_id: PriceId,
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub unit_amount: Money,
    pub subtotal: Money,
}

impl OrderItem {
    /// Creates an item, deriving `subtotal = quantity × unit_amount`.
    pub fn new(
        price_id: PriceId,
        product_id: ProductId,
        name: impl Into<String>,
        quantity: u32,
        unit_amount: Money,
    ) -> Self {
        Self {
            price_id,
            product_id,
            name: name.into(),
            quantity,
            unit_amount,
            subtotal: unit_amount.multiply(quantity),
        }
    }
}

/// Free-form order annotations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderMeta {
    pub cancellation_reason: Option<String>,
    pub client_confirmed_delivered: bool,
}

/// Purchase record scoped to one organization: immutable line items,
/// mutable payment/fulfillment status.
///
/// Mutators are unconditional; business preconditions (ownership,
/// already-paid, cancellability) are checked by the use-case layer.
/// The one entity-level guard is `update_fulfillment_status`, which
/// validates against the central transition table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    code: String,
    user_id: UserId,
    organization_id: OrganizationId,
    items: Vec<OrderItem>,
    total_amount: Money,
    payment_status: PaymentStatus,
    fulfillment_status: FulfillmentStatus,
    payment_intent_ids: Vec<PaymentIntentId>,
    transaction_id: Option<String>,
    paid_at: Option<DateTime<Utc>>,
    cancelled_at: Option<DateTime<Utc>>,
    expired_at: Option<DateTime<Utc>>,
    meta: OrderMeta,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Order {
    /// Creates an order from snapshotted items.
    ///
    /// Derives the total, generates a fresh code, and starts the
    /// status axes at payment-pending / fulfillment-new.
    pub fn create(
        user_id: UserId,
        organization_id: OrganizationId,
        items: Vec<OrderItem>,
    ) -> Result<Self, OrderError> {
        if items.is_empty() {
            return Err(OrderError::NoItems);
        }

        let now = Utc::now();
        let total_amount = items.iter().map(|i| i.subtotal).sum();

        Ok(Self {
            id: OrderId::new(),
            code: generate_order_code(now),
            user_id,
            organization_id,
            items,
            total_amount,
            payment_status: PaymentStatus::Pending,
            fulfillment_status: FulfillmentStatus::New,
            payment_intent_ids: Vec::new(),
            transaction_id: None,
            paid_at: None,
            cancelled_at: None,
            expired_at: None,
            meta: OrderMeta::default(),
            created_at: now,
            updated_at: now,
        })
    }
}

// Query methods
impl Order {
    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    pub fn fulfillment_status(&self) -> FulfillmentStatus {
        self.fulfillment_status
    }

    /// Returns true if the order has not been paid, refunded, or
    /// failed yet.
    pub fn is_payment_pending(&self) -> bool {
        self.payment_status == PaymentStatus::Pending
    }

    /// Full history of checkout attempts that referenced this order.
    pub fn payment_intent_ids(&self) -> &[PaymentIntentId] {
        &self.payment_intent_ids
    }

    /// The most recent checkout attempt, if any.
    pub fn current_payment_intent(&self) -> Option<PaymentIntentId> {
        self.payment_intent_ids.last().copied()
    }

    pub fn transaction_id(&self) -> Option<&str> {
        self.transaction_id.as_deref()
    }

    pub fn paid_at(&self) -> Option<DateTime<Utc>> {
        self.paid_at
    }

    pub fn cancelled_at(&self) -> Option<DateTime<Utc>> {
        self.cancelled_at
    }

    pub fn expired_at(&self) -> Option<DateTime<Utc>> {
        self.expired_at
    }

    pub fn meta(&self) -> &OrderMeta {
        &self.meta
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

// Mutators
impl Order {
    /// Flips payment status to paid, stamping `paid_at` and recording
    /// the provider transaction when given.
    pub fn mark_as_paid(&mut self, transaction_id: Option<String>) {
        self.payment_status = PaymentStatus::Paid;
        self.paid_at = Some(Utc::now());
        if transaction_id.is_some() {
            self.transaction_id = transaction_id;
        }
        self.touch();
    }

    /// Moves fulfillment to cancelled, stamping `cancelled_at` and
    /// recording the reason in meta.
    pub fn cancel(&mut self, reason: Option<String>) {
        self.fulfillment_status = FulfillmentStatus::Cancelled;
        self.cancelled_at = Some(Utc::now());
        self.meta.cancellation_reason = reason;
        self.touch();
    }

    /// Moves fulfillment to expired, stamping `expired_at`.
    pub fn expire(&mut self) {
        self.fulfillment_status = FulfillmentStatus::Expired;
        self.expired_at = Some(Utc::now());
        self.touch();
    }

    /// Fulfillment progression marker.
    pub fn mark_in_delivery(&mut self) {
        self.fulfillment_status = FulfillmentStatus::InDelivery;
        self.touch();
    }

    /// Records that the client confirmed receipt.
    pub fn mark_client_confirmed_delivery(&mut self) {
        self.meta.client_confirmed_delivered = true;
        self.touch();
    }

    /// Appends a checkout attempt to the intent history.
    pub fn attach_payment_intent(&mut self, intent_id: PaymentIntentId) {
        self.payment_intent_ids.push(intent_id);
        self.touch();
    }

    /// Records the provider transaction reference for this order.
    pub fn set_transaction_id(&mut self, transaction_id: impl Into<String>) {
        self.transaction_id = Some(transaction_id.into());
        self.touch();
    }

    /// Moves fulfillment to `target` if the transition table allows
    /// it.
    pub fn update_fulfillment_status(
        &mut self,
        target: FulfillmentStatus,
    ) -> Result<(), OrderError> {
        if !self.fulfillment_status.can_transition_to(target) {
            return Err(OrderError::InvalidTransition {
                from: self.fulfillment_status,
                to: target,
            });
        }
        match target {
            FulfillmentStatus::Cancelled => self.cancel(None),
            FulfillmentStatus::Expired => self.expire(),
            _ => {
                self.fulfillment_status = target;
                self.touch();
            }
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
