//! Cart endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use common::{ProductId, UserId};
use domain::Cart;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

use super::{AppState, parse_id};

// -- Request types --

#[derive(Deserialize)]
pub struct AddItemRequest {
    pub product_id: String,
    pub quantity: u32,
}

#[derive(Deserialize)]
pub struct UpdateItemRequest {
    pub quantity: u32,
}

// -- Response types --

#[derive(Serialize)]
pub struct CartResponse {
    pub id: String,
    pub user_id: String,
    pub items: Vec<CartItemResponse>,
    pub updated_at: String,
}

#[derive(Serialize)]
pub struct CartItemResponse {
    pub product_id: String,
    pub quantity: u32,
}

fn cart_response(cart: &Cart) -> CartResponse {
    CartResponse {
        id: cart.id().to_string(),
        user_id: cart.user_id().to_string(),
        items: cart
            .items()
            .iter()
            .map(|i| CartItemResponse {
                product_id: i.product_id.to_string(),
                quantity: i.quantity,
            })
            .collect(),
        updated_at: cart.updated_at().to_rfc3339(),
    }
}

// -- Handlers --

/// GET /users/{user_id}/cart
#[tracing::instrument(skip(state))]
pub async fn get_cart(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<CartResponse>, ApiError> {
    let user_id: UserId = parse_id(&user_id)?;
    let cart = state.cart_service.get_cart(user_id).await?;
    Ok(Json(cart_response(&cart)))
}

/// POST /users/{user_id}/cart/items — add a line (merges duplicates).
#[tracing::instrument(skip(state, req))]
pub async fn add_item(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(req): Json<AddItemRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    let user_id: UserId = parse_id(&user_id)?;
    let product_id: ProductId = parse_id(&req.product_id)?;
    let cart = state
        .cart_service
        .add_item(user_id, product_id, req.quantity)
        .await?;
    Ok(Json(cart_response(&cart)))
}

/// PATCH /users/{user_id}/cart/items/{product_id} — set quantity;
/// quantity 0 removes the line.
#[tracing::instrument(skip(state, req))]
pub async fn update_item(
    State(state): State<Arc<AppState>>,
    Path((user_id, product_id)): Path<(String, String)>,
    Json(req): Json<UpdateItemRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    let user_id: UserId = parse_id(&user_id)?;
    let product_id: ProductId = parse_id(&product_id)?;
    let cart = state
        .cart_service
        .update_item(user_id, product_id, req.quantity)
        .await?;
    Ok(Json(cart_response(&cart)))
}

/// DELETE /users/{user_id}/cart/items/{product_id}
#[tracing::instrument(skip(state))]
pub async fn remove_item(
    State(state): State<Arc<AppState>>,
    Path((user_id, product_id)): Path<(String, String)>,
) -> Result<Json<CartResponse>, ApiError> {
    let user_id: UserId = parse_id(&user_id)?;
    let product_id: ProductId = parse_id(&product_id)?;
    let cart = state.cart_service.remove_item(user_id, product_id).await?;
    Ok(Json(cart_response(&cart)))
}

/// DELETE /users/{user_id}/cart — empty the cart.
#[tracing::instrument(skip(state))]
pub async fn clear(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<CartResponse>, ApiError> {
    let user_id: UserId = parse_id(&user_id)?;
    let cart = state.cart_service.clear(user_id).await?;
    Ok(Json(cart_response(&cart)))
}
