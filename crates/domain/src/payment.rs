//! Payment intent aggregate and provider identifiers.

use chrono::{DateTime, Utc};
use common::{OrderId, PaymentIntentId, UserId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::money::Money;

/// A payment gateway this platform can dispatch to.
///
/// Adding a provider means adding a variant here and registering an
/// adapter for it; the payment-intent use case never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentProvider {
    /// Redirect-based external gateway reconciled via webhook.
    Payrex,
}

impl PaymentProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentProvider::Payrex => "payrex",
        }
    }
}

impl std::fmt::Display for PaymentProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raised when parsing an unrecognized provider name.
#[derive(Debug, Error)]
#[error("Unknown payment provider: {0}")]
pub struct UnknownProviderError(pub String);

impl std::str::FromStr for PaymentProvider {
    type Err = UnknownProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "payrex" => Ok(PaymentProvider::Payrex),
            other => Err(UnknownProviderError(other.to_string())),
        }
    }
}

/// Lifecycle of a payment intent. Pending transitions exactly once
/// into one of the terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentIntentStatus {
    #[default]
    Pending,
    Succeeded,
    Failed,
    Expired,
    Cancelled,
}

impl PaymentIntentStatus {
    /// Returns true once the intent has reached its final state.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PaymentIntentStatus::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentIntentStatus::Pending => "pending",
            PaymentIntentStatus::Succeeded => "succeeded",
            PaymentIntentStatus::Failed => "failed",
            PaymentIntentStatus::Expired => "expired",
            PaymentIntentStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for PaymentIntentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Creation parameters for a payment intent.
#[derive(Debug, Clone)]
pub struct NewPaymentIntent {
    pub user_id: UserId,
    pub order_ids: Vec<OrderId>,
    pub amount: Money,
    pub currency: String,
    pub provider: PaymentProvider,
    pub provider_reference: String,
    pub transaction_ids: Vec<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub metadata: serde_json::Value,
}

/// One checkout attempt across possibly-many orders.
///
/// `amount` is a snapshot of the summed order totals at creation; it
/// is never recomputed. Provider callbacks are matched on
/// `provider_reference` / `transaction_ids` — the provider only knows
/// the reference it was handed at session creation, never our ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    id: PaymentIntentId,
    user_id: UserId,
    order_ids: Vec<OrderId>,
    amount: Money,
    currency: String,
    provider: PaymentProvider,
    status: PaymentIntentStatus,
    provider_reference: String,
    transaction_ids: Vec<String>,
    expires_at: Option<DateTime<Utc>>,
    metadata: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PaymentIntent {
    /// Creates a pending intent.
    pub fn create(params: NewPaymentIntent) -> Self {
        let now = Utc::now();
        Self {
            id: PaymentIntentId::new(),
            user_id: params.user_id,
            order_ids: params.order_ids,
            amount: params.amount,
            currency: params.currency,
            provider: params.provider,
            status: PaymentIntentStatus::Pending,
            provider_reference: params.provider_reference,
            transaction_ids: params.transaction_ids,
            expires_at: params.expires_at,
            metadata: params.metadata,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> PaymentIntentId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn order_ids(&self) -> &[OrderId] {
        &self.order_ids
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn provider(&self) -> PaymentProvider {
        self.provider
    }

    pub fn status(&self) -> PaymentIntentStatus {
        self.status
    }

    pub fn provider_reference(&self) -> &str {
        &self.provider_reference
    }

    pub fn transaction_ids(&self) -> &[String] {
        &self.transaction_ids
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn metadata(&self) -> &serde_json::Value {
        &self.metadata
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn mark_succeeded(&mut self) {
        self.status = PaymentIntentStatus::Succeeded;
        self.touch();
    }

    pub fn mark_failed(&mut self) {
        self.status = PaymentIntentStatus::Failed;
        self.touch();
    }

    pub fn mark_expired(&mut self) {
        self.status = PaymentIntentStatus::Expired;
        self.touch();
    }

    pub fn mark_cancelled(&mut self) {
        self.status = PaymentIntentStatus::Cancelled;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
