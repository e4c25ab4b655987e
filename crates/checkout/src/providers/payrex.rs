//! Payrex gateway adapter.
//!
//! Payrex is a redirect-based gateway: we request a checkout token,
//! send the shopper to the returned URL, and learn the outcome later
//! through the webhook callback carrying our reference.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{CreateSessionParams, PaymentProviderService, PaymentSession, ProviderError};

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    amount: i64,
    currency: &'a str,
    reference: &'a str,
    #[serde(rename = "customerId")]
    customer_id: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    id: String,
    #[serde(rename = "timeToLive")]
    time_to_live: Option<i64>,
    #[serde(rename = "checkoutUrl")]
    checkout_url: Option<String>,
}

/// HTTP client for the Payrex token-request endpoint.
pub struct PayrexProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PayrexProvider {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl PaymentProviderService for PayrexProvider {
    async fn create_session(
        &self,
        params: CreateSessionParams,
    ) -> Result<PaymentSession, ProviderError> {
        let request = TokenRequest {
            amount: params.amount.cents(),
            currency: &params.currency,
            reference: &params.reference,
            customer_id: params.user_id.to_string(),
        };

        let resp = self
            .http
            .post(format!("{}/v1/checkout/tokens", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::InvalidResponse(format!("{e}; body={body}")))?;

        Ok(PaymentSession {
            transaction_id: token.id,
            expires_at: token
                .time_to_live
                .map(|secs| Utc::now() + Duration::seconds(secs)),
            payment_url: token.checkout_url,
        })
    }
}
