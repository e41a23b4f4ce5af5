//! HTTP ingestion adapter for the order processing service.
//!
//! Provides REST endpoints for creating and querying orders, with
//! structured logging (tracing) and Prometheus metrics. Order creation hands
//! each new order to the worker pool, which processes it in the background.

pub mod config;
pub mod error;
pub mod routes;
pub mod service;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use common::{IdGenerator, UuidIdGenerator};
use metrics_exporter_prometheus::PrometheusHandle;
use order_store::{InMemoryOrderStore, OrderStore};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use worker::{FulfillmentStage, ProcessingStage, WorkerError, WorkerPool};

use config::Config;
use routes::orders::AppState;
use service::OrderService;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: OrderStore + Clone + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check::<S>))
        .route(
            "/orders",
            get(routes::orders::list::<S>).post(routes::orders::create::<S>),
        )
        .route("/orders/{id}", get(routes::orders::get::<S>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Wires a store, a processing stage, and an ID source into application state.
///
/// The worker pool is created but not started; the caller owns its lifecycle
/// through `state.order_service.pool()`.
pub fn create_state<S: OrderStore + Clone + 'static>(
    store: S,
    stage: Arc<dyn ProcessingStage>,
    config: &Config,
    ids: Arc<dyn IdGenerator>,
) -> Result<Arc<AppState<S>>, WorkerError> {
    let pool = Arc::new(WorkerPool::new(config.pool_config(), store.clone(), stage)?);
    let order_service = OrderService::new(store, pool, ids);
    Ok(Arc::new(AppState { order_service }))
}

/// Creates the default application state: in-memory store, simulated
/// fulfillment services, and UUID-based order IDs.
pub fn create_default_state(
    config: &Config,
) -> Result<Arc<AppState<InMemoryOrderStore>>, WorkerError> {
    let stage = FulfillmentStage::simulated(config.simulated_latency());
    create_state(
        InMemoryOrderStore::new(),
        Arc::new(stage),
        config,
        Arc::new(UuidIdGenerator::new()),
    )
}
