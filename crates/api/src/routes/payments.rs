//! Checkout and payment endpoints, including the provider webhook.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use checkout::{CallbackStatus, CheckoutSessionView, CreatedPaymentIntent};
use common::{OrderId, UserId};
use domain::PaymentProvider;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

use super::{AppState, parse_id};

// -- Request types --

#[derive(Deserialize)]
pub struct CreateIntentRequest {
    pub order_ids: Vec<String>,
    pub provider: String,
}

#[derive(Deserialize)]
pub struct SessionQuery {
    pub token: String,
}

#[derive(Deserialize)]
pub struct CallbackRequest {
    pub reference: String,
    pub status: CallbackStatus,
}

// -- Response types --

#[derive(Serialize)]
pub struct CallbackResponse {
    pub success: bool,
    pub message: String,
    pub data: CallbackData,
}

#[derive(Serialize)]
pub struct CallbackData {
    pub payment_intent_found: bool,
    pub orders_updated: bool,
}

fn parse_provider(provider: &str) -> Result<PaymentProvider, ApiError> {
    provider
        .parse()
        .map_err(|e: domain::UnknownProviderError| ApiError::BadRequest(e.to_string()))
}

// -- Handlers --

/// POST /users/{user_id}/payment-intents — open a checkout attempt
/// over a set of orders; returns only the signed checkout token.
#[tracing::instrument(skip(state, req))]
pub async fn create_intent(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(req): Json<CreateIntentRequest>,
) -> Result<(StatusCode, Json<CreatedPaymentIntent>), ApiError> {
    let user_id: UserId = parse_id(&user_id)?;
    let provider = parse_provider(&req.provider)?;
    let order_ids: Vec<OrderId> = req
        .order_ids
        .iter()
        .map(|id| parse_id(id))
        .collect::<Result<_, _>>()?;

    let created = state
        .payment_service
        .create_payment_intent(user_id, &order_ids, provider)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /checkout/session?token=… — token-gated live session state.
#[tracing::instrument(skip(state, query))]
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<CheckoutSessionView>, ApiError> {
    let session = state.payment_service.get_checkout_session(&query.token).await?;
    Ok(Json(session))
}

/// POST /payments/{provider}/callback — provider webhook.
///
/// Trust here rests on the unguessable reference alone; the payload
/// carries no provider signature to verify.
#[tracing::instrument(skip(state, req))]
pub async fn provider_callback(
    State(state): State<Arc<AppState>>,
    Path(provider): Path<String>,
    Json(req): Json<CallbackRequest>,
) -> Result<Json<CallbackResponse>, ApiError> {
    parse_provider(&provider)?;

    let outcome = state
        .payment_service
        .process_provider_payment(&req.reference, req.status)
        .await?;

    Ok(Json(CallbackResponse {
        success: true,
        message: "callback processed".to_string(),
        data: CallbackData {
            payment_intent_found: outcome.payment_intent_found,
            orders_updated: outcome.orders_updated,
        },
    }))
}
