//! Order creation and query endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::OrderId;
use domain::{CreateOrder, Order};
use order_store::OrderStore;
use serde::Deserialize;

use crate::error::ApiError;
use crate::service::OrderService;

/// Shared application state accessible from all handlers.
pub struct AppState<S: OrderStore> {
    pub order_service: OrderService<S>,
}

// -- Request types --

/// Body of `POST /orders`. Missing fields are treated as empty and rejected
/// by validation.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub customer_id: String,
    #[serde(default)]
    pub restaurant_id: String,
    #[serde(default)]
    pub items: Vec<String>,
}

impl From<CreateOrderRequest> for CreateOrder {
    fn from(req: CreateOrderRequest) -> Self {
        CreateOrder::new(req.customer_id, req.restaurant_id, req.items)
    }
}

// -- Handlers --

/// POST /orders — create an order and queue it for processing.
#[tracing::instrument(skip(state, payload))]
pub async fn create<S: OrderStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let Json(req) = payload?;
    let order = state.order_service.create_order(req.into()).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /orders/{id} — load one order.
#[tracing::instrument(skip(state))]
pub async fn get<S: OrderStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    if id.trim().is_empty() {
        return Err(ApiError::BadRequest("Order ID required".to_string()));
    }
    let order = state.order_service.get_order(&OrderId::new(id)).await?;
    Ok(Json(order))
}

/// GET /orders — list every order.
#[tracing::instrument(skip(state))]
pub async fn list<S: OrderStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Json<Vec<Order>> {
    Json(state.order_service.get_all_orders().await)
}
