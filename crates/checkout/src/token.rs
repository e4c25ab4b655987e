//! Checkout token signing.
//!
//! The token is the stateless session pointer: instead of persisting a
//! checkout-session row, the server hands the client a short-lived
//! signed credential naming the intent and its orders.

use chrono::{Duration, Utc};
use common::{OrderId, PaymentIntentId, UserId};
use domain::PaymentProvider;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How long a checkout token stays valid, in seconds.
pub const CHECKOUT_TOKEN_TTL_SECS: i64 = 600;

/// Errors from token generation or verification.
#[derive(Debug, Error)]
#[error("token error: {0}")]
pub struct TokenError(#[from] jsonwebtoken::errors::Error);

/// What a checkout token certifies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutClaims {
    pub payment_intent_id: PaymentIntentId,
    pub user_id: UserId,
    pub order_ids: Vec<OrderId>,
    pub provider: PaymentProvider,
    /// Expiry as a unix timestamp; validated on decode.
    pub exp: i64,
}

/// Signs and verifies short-lived tokens. The same abstraction serves
/// checkout tokens here and unrelated auth tokens elsewhere.
pub trait TokenSigner: Send + Sync {
    fn generate(&self, claims: &CheckoutClaims) -> Result<String, TokenError>;

    fn verify(&self, token: &str) -> Result<CheckoutClaims, TokenError>;
}

/// HS256 JWT signer.
pub struct JwtTokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtTokenSigner {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

impl TokenSigner for JwtTokenSigner {
    fn generate(&self, claims: &CheckoutClaims) -> Result<String, TokenError> {
        Ok(jsonwebtoken::encode(
            &Header::default(),
            claims,
            &self.encoding,
        )?)
    }

    fn verify(&self, token: &str) -> Result<CheckoutClaims, TokenError> {
        let data = jsonwebtoken::decode::<CheckoutClaims>(
            token,
            &self.decoding,
            &Validation::default(),
        )?;
        Ok(data.claims)
    }
}

/// Builds claims expiring `ttl` from now.
pub fn claims_for(
    payment_intent_id: PaymentIntentId,
    user_id: UserId,
    order_ids: Vec<OrderId>,
    provider: PaymentProvider,
    ttl: Duration,
) -> CheckoutClaims {
    CheckoutClaims {
        payment_intent_id,
        user_id,
        order_ids,
        provider,
        exp: (Utc::now() + ttl).timestamp(),
    }
}
