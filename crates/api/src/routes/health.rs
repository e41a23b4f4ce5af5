//! Health check endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use order_store::OrderStore;
use serde::Serialize;

use crate::routes::orders::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub orders: usize,
    pub queued: usize,
    pub accepting_orders: bool,
}

/// GET /health — returns service health and queue depth.
pub async fn check<S: OrderStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Json<HealthResponse> {
    let pool = state.order_service.pool();
    Json(HealthResponse {
        status: "ok",
        orders: state.order_service.count_orders().await,
        queued: pool.queued(),
        accepting_orders: !pool.is_closed(),
    })
}
