//! Order endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use common::{OrderId, OrganizationId, ProductId, UserId};
use domain::{FulfillmentStatus, Order, PaymentStatus};
use serde::{Deserialize, Serialize};
use store::OrderFilters;

use crate::error::ApiError;

use super::{AppState, parse_id};

// -- Request types --

#[derive(Deserialize)]
pub struct CreateOrdersRequest {
    /// Optional subset of cart products to order; omitted means the
    /// whole cart.
    #[serde(default)]
    pub product_ids: Option<Vec<String>>,
}

#[derive(Deserialize)]
pub struct CancelOrderRequest {
    pub user_id: String,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Deserialize)]
pub struct MoveOrderRequest {
    pub status: FulfillmentStatus,
}

#[derive(Debug, Deserialize, Default)]
pub struct ListOrdersQuery {
    pub payment_status: Option<PaymentStatus>,
    pub fulfillment_status: Option<FulfillmentStatus>,
}

// -- Response types --

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub code: String,
    pub user_id: String,
    pub organization_id: String,
    pub items: Vec<OrderItemResponse>,
    pub total_cents: i64,
    pub payment_status: PaymentStatus,
    pub fulfillment_status: FulfillmentStatus,
    pub payment_intent_ids: Vec<String>,
    pub transaction_id: Option<String>,
}

#[derive(Serialize)]
pub struct OrderItemResponse {
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_amount_cents: i64,
    pub subtotal_cents: i64,
}

fn order_response(order: &Order) -> OrderResponse {
    OrderResponse {
        id: order.id().to_string(),
        code: order.code().to_string(),
        user_id: order.user_id().to_string(),
        organization_id: order.organization_id().to_string(),
        items: order
            .items()
            .iter()
            .map(|i| OrderItemResponse {
                product_id: i.product_id.to_string(),
                name: i.name.clone(),
                quantity: i.quantity,
                unit_amount_cents: i.unit_amount.cents(),
                subtotal_cents: i.subtotal.cents(),
            })
            .collect(),
        total_cents: order.total_amount().cents(),
        payment_status: order.payment_status(),
        fulfillment_status: order.fulfillment_status(),
        payment_intent_ids: order
            .payment_intent_ids()
            .iter()
            .map(ToString::to_string)
            .collect(),
        transaction_id: order.transaction_id().map(String::from),
    }
}

// -- Handlers --

/// POST /users/{user_id}/orders — split the cart into per-organization
/// orders.
#[tracing::instrument(skip(state, req))]
pub async fn create_from_cart(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(req): Json<CreateOrdersRequest>,
) -> Result<(StatusCode, Json<Vec<OrderResponse>>), ApiError> {
    let user_id: UserId = parse_id(&user_id)?;
    let filter: Option<Vec<ProductId>> = req
        .product_ids
        .map(|ids| ids.iter().map(|id| parse_id(id)).collect::<Result<_, _>>())
        .transpose()?;

    let orders = state
        .order_service
        .create_orders_from_cart(user_id, filter.as_deref())
        .await?;

    let responses = orders.iter().map(order_response).collect();
    Ok((StatusCode::CREATED, Json(responses)))
}

/// GET /orders/{id}
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id: OrderId = parse_id(&id)?;
    let order = state.order_service.get_order(order_id).await?;
    Ok(Json(order_response(&order)))
}

/// GET /users/{user_id}/orders — list with optional status filters.
#[tracing::instrument(skip(state))]
pub async fn list(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(query): Query<ListOrdersQuery>,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let user_id: UserId = parse_id(&user_id)?;
    let filters = OrderFilters {
        payment_status: query.payment_status,
        fulfillment_status: query.fulfillment_status,
    };
    let orders = state.order_service.list_for_user(user_id, &filters).await?;
    Ok(Json(orders.iter().map(order_response).collect()))
}

/// GET /organizations/{organization_id}/orders — a store's inbound
/// orders, with optional status filters.
#[tracing::instrument(skip(state))]
pub async fn list_for_organization(
    State(state): State<Arc<AppState>>,
    Path(organization_id): Path<String>,
    Query(query): Query<ListOrdersQuery>,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let organization_id: OrganizationId = parse_id(&organization_id)?;
    let filters = OrderFilters {
        payment_status: query.payment_status,
        fulfillment_status: query.fulfillment_status,
    };
    let orders = state
        .order_service
        .list_for_organization(organization_id, &filters)
        .await?;
    Ok(Json(orders.iter().map(order_response).collect()))
}

/// POST /orders/{id}/cancel
#[tracing::instrument(skip(state, req))]
pub async fn cancel(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<CancelOrderRequest>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id: OrderId = parse_id(&id)?;
    let caller: UserId = parse_id(&req.user_id)?;
    let order = state
        .order_service
        .cancel_order(caller, order_id, req.reason)
        .await?;
    Ok(Json(order_response(&order)))
}

/// POST /orders/{id}/move — generic fulfillment progression.
#[tracing::instrument(skip(state, req))]
pub async fn move_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<MoveOrderRequest>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id: OrderId = parse_id(&id)?;
    let order = state.order_service.move_order(order_id, req.status).await?;
    Ok(Json(order_response(&order)))
}
