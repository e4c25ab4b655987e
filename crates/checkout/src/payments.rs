//! Payment-intent use cases: checkout creation, token-gated session
//! reads, provider callback reconciliation, and expiry sweeps.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use common::{OrderId, PaymentIntentId, UserId};
use domain::{
    FulfillmentStatus, Money, NewPaymentIntent, PaymentIntent, PaymentIntentStatus,
    PaymentProvider, PaymentStatus,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use store::{OrderRepository, PaymentIntentRepository};

use crate::error::{CheckoutError, Result};
use crate::orders::OrderService;
use crate::providers::{CreateSessionParams, PaymentProviderRegistry};
use crate::token::{CHECKOUT_TOKEN_TTL_SECS, TokenSigner, claims_for};

/// Provider references are a fixed prefix plus a random alphanumeric
/// suffix, 15 characters total.
const REFERENCE_LEN: usize = 15;

/// Fallback session lifetime when the provider does not supply one,
/// in seconds.
const SESSION_FALLBACK_TTL_SECS: i64 = 300;

/// Result of creating a payment intent: the signed checkout token is
/// the only thing the client gets. Session details are retrieved later
/// by presenting the token.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedPaymentIntent {
    pub token: String,
}

/// Provider verdict delivered through the webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallbackStatus {
    Accepted,
    Rejected,
}

/// What a callback did.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CallbackOutcome {
    pub payment_intent_found: bool,
    pub orders_updated: bool,
}

/// Live checkout-session state, assembled from the intent and its
/// orders on each read.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutSessionView {
    pub payment_intent_id: PaymentIntentId,
    pub amount: Money,
    pub currency: String,
    pub provider: PaymentProvider,
    pub status: PaymentIntentStatus,
    pub payment_url: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub orders: Vec<CheckoutSessionOrder>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutSessionOrder {
    pub id: OrderId,
    pub code: String,
    pub total_amount: Money,
    pub payment_status: PaymentStatus,
}

/// Payment-intent orchestration.
pub struct PaymentIntentService {
    orders: Arc<dyn OrderRepository>,
    intents: Arc<dyn PaymentIntentRepository>,
    providers: Arc<PaymentProviderRegistry>,
    signer: Arc<dyn TokenSigner>,
    order_service: Arc<OrderService>,
    currency: String,
}

impl PaymentIntentService {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        intents: Arc<dyn PaymentIntentRepository>,
        providers: Arc<PaymentProviderRegistry>,
        signer: Arc<dyn TokenSigner>,
        order_service: Arc<OrderService>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            orders,
            intents,
            providers,
            signer,
            order_service,
            currency: currency.into(),
        }
    }

    /// Opens one checkout attempt over a set of orders.
    ///
    /// Validates the orders (existence, ownership, pending payment,
    /// non-zero total), creates a provider session under a fresh
    /// reference, persists the intent with the amount snapshotted,
    /// stamps every order with the intent id and transaction id, and
    /// returns a signed 10-minute checkout token.
    #[tracing::instrument(skip(self))]
    pub async fn create_payment_intent(
        &self,
        user_id: UserId,
        order_ids: &[OrderId],
        provider: PaymentProvider,
    ) -> Result<CreatedPaymentIntent> {
        if order_ids.is_empty() {
            return Err(CheckoutError::NoOrders);
        }

        let mut orders = self.orders.find_many_by_ids(order_ids).await?;
        if orders.len() != order_ids.len() {
            return Err(CheckoutError::OrdersMissing {
                requested: order_ids.len(),
                found: orders.len(),
            });
        }
        if let Some(foreign) = orders.iter().find(|o| o.user_id() != user_id) {
            return Err(CheckoutError::OwnershipMismatch(foreign.id()));
        }
        let amount: Money = orders.iter().map(|o| o.total_amount()).sum();
        if amount.is_zero() {
            return Err(CheckoutError::ZeroAmount);
        }
        if let Some(not_pending) = orders.iter().find(|o| !o.is_payment_pending()) {
            return Err(CheckoutError::AlreadyPaid(not_pending.id()));
        }

        let reference = generate_reference(provider);
        let adapter = self.providers.get(provider)?;
        let session = adapter
            .create_session(CreateSessionParams {
                user_id,
                amount,
                currency: self.currency.clone(),
                order_ids: order_ids.to_vec(),
                reference: reference.clone(),
            })
            .await?;

        let expires_at = session
            .expires_at
            .unwrap_or_else(|| Utc::now() + Duration::seconds(SESSION_FALLBACK_TTL_SECS));
        let transaction_id = session.transaction_id.clone();
        let intent = PaymentIntent::create(NewPaymentIntent {
            user_id,
            order_ids: order_ids.to_vec(),
            amount,
            currency: self.currency.clone(),
            provider,
            provider_reference: reference,
            transaction_ids: vec![transaction_id.clone()],
            expires_at: Some(expires_at),
            metadata: serde_json::json!({ "session": &session }),
        });

        for order in &mut orders {
            order.attach_payment_intent(intent.id());
            order.set_transaction_id(transaction_id.clone());
        }
        // Orders first, then the intent: the two writes are not atomic.
        self.orders.update_many(&orders).await?;
        self.intents.create(&intent).await?;

        let claims = claims_for(
            intent.id(),
            user_id,
            order_ids.to_vec(),
            provider,
            Duration::seconds(CHECKOUT_TOKEN_TTL_SECS),
        );
        let token = self
            .signer
            .generate(&claims)
            .map_err(|e| CheckoutError::Internal(e.to_string()))?;

        metrics::counter!("payment_intents_created_total").increment(1);
        tracing::info!(intent_id = %intent.id(), %amount, "payment intent created");
        Ok(CreatedPaymentIntent { token })
    }

    /// Verifies a checkout token and assembles the live session state
    /// from the intent and its orders.
    #[tracing::instrument(skip(self, token))]
    pub async fn get_checkout_session(&self, token: &str) -> Result<CheckoutSessionView> {
        let claims = self
            .signer
            .verify(token)
            .map_err(|e| CheckoutError::InvalidToken(e.to_string()))?;

        let intent = self
            .intents
            .find_by_id(claims.payment_intent_id)
            .await?
            .ok_or(CheckoutError::IntentNotFound(claims.payment_intent_id))?;
        let orders = self.orders.find_many_by_ids(intent.order_ids()).await?;

        let payment_url = intent
            .metadata()
            .pointer("/session/payment_url")
            .and_then(|v| v.as_str())
            .map(String::from);

        Ok(CheckoutSessionView {
            payment_intent_id: intent.id(),
            amount: intent.amount(),
            currency: intent.currency().to_string(),
            provider: intent.provider(),
            status: intent.status(),
            payment_url,
            expires_at: intent.expires_at(),
            orders: orders
                .into_iter()
                .map(|o| CheckoutSessionOrder {
                    id: o.id(),
                    code: o.code().to_string(),
                    total_amount: o.total_amount(),
                    payment_status: o.payment_status(),
                })
                .collect(),
        })
    }

    /// Reconciles an asynchronous provider callback.
    ///
    /// An unknown reference is a silent no-op: callbacks legitimately
    /// race and duplicate-fire. A found, non-terminal intent flips to
    /// succeeded/failed exactly once; on ACCEPTED the orders carrying
    /// the intent's transaction ids cascade to paid. The intent status
    /// update is authoritative even when the cascade fails; cascade
    /// errors are logged, never propagated.
    #[tracing::instrument(skip(self))]
    pub async fn process_provider_payment(
        &self,
        reference: &str,
        status: CallbackStatus,
    ) -> Result<CallbackOutcome> {
        metrics::counter!("payment_callbacks_total").increment(1);

        let Some(mut intent) = self.intents.find_by_provider_reference(reference).await? else {
            tracing::info!(reference, "callback for unknown reference ignored");
            return Ok(CallbackOutcome {
                payment_intent_found: false,
                orders_updated: false,
            });
        };

        if !intent.is_terminal() {
            match status {
                CallbackStatus::Accepted => intent.mark_succeeded(),
                CallbackStatus::Rejected => intent.mark_failed(),
            }
            self.intents.update(&intent).await?;
            tracing::info!(intent_id = %intent.id(), status = %intent.status(), "payment intent resolved");
        }

        let mut orders_updated = false;
        if status == CallbackStatus::Accepted && !intent.transaction_ids().is_empty() {
            for transaction_id in intent.transaction_ids() {
                match self
                    .order_service
                    .mark_as_paid_by_transaction_id(transaction_id)
                    .await
                {
                    Ok(count) => orders_updated |= count > 0,
                    Err(e) => {
                        tracing::error!(error = %e, reference, "order cascade failed");
                        metrics::counter!("payment_cascade_failures_total").increment(1);
                    }
                }
            }
        }

        Ok(CallbackOutcome {
            payment_intent_found: true,
            orders_updated,
        })
    }

    /// Expires pending intents whose deadline passed, and the
    /// untouched orders attached to them. Returns the number of
    /// intents expired.
    #[tracing::instrument(skip(self))]
    pub async fn expire_overdue_intents(&self, now: DateTime<Utc>) -> Result<usize> {
        let overdue = self.intents.find_expired_before(now).await?;
        let mut expired = 0;

        for mut intent in overdue {
            intent.mark_expired();
            self.intents.update(&intent).await?;
            expired += 1;

            let orders = self.orders.find_many_by_ids(intent.order_ids()).await?;
            let mut updates = Vec::new();
            for mut order in orders {
                if order.is_payment_pending()
                    && order
                        .fulfillment_status()
                        .can_transition_to(FulfillmentStatus::Expired)
                {
                    order.expire();
                    updates.push(order);
                }
            }
            if !updates.is_empty() {
                self.orders.update_many(&updates).await?;
            }
        }

        if expired > 0 {
            metrics::counter!("payment_intents_expired_total").increment(expired as u64);
        }
        Ok(expired)
    }
}

fn generate_reference(provider: PaymentProvider) -> String {
    let prefix = match provider {
        PaymentProvider::Payrex => "PRX-",
    };
    let suffix: String = rand::rng()
        .sample_iter(rand::distr::Alphanumeric)
        .take(REFERENCE_LEN - prefix.len())
        .map(char::from)
        .collect();
    format!("{prefix}{suffix}")
}
