//! HTTP API server for the order service.
//!
//! Exposes the order lifecycle over REST, with structured logging (tracing)
//! and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};
use gateway::{
    HttpInventoryGateway, HttpPaymentGateway, InMemoryInventoryGateway, InMemoryPaymentGateway,
    InventoryGateway, PaymentGateway, demo_catalog,
};
use metrics_exporter_prometheus::PrometheusHandle;
use orchestrator::{OrchestratorConfig, OrderOrchestrator};
use order_store::InMemoryOrderStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use config::Config;
use routes::orders::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(
    state: Arc<AppState>,
    metrics_handle: PrometheusHandle,
    request_timeout: Duration,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::render))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/api/v1/orders", post(routes::orders::create))
        .route("/api/v1/orders/{order_uuid}", get(routes::orders::get))
        .route("/api/v1/orders/{order_uuid}/pay", post(routes::orders::pay))
        .route(
            "/api/v1/orders/{order_uuid}/cancel",
            post(routes::orders::cancel),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}

/// Creates application state over the given gateways and an empty store.
pub fn create_state(
    inventory: Arc<dyn InventoryGateway>,
    payment: Arc<dyn PaymentGateway>,
    config: OrchestratorConfig,
) -> Arc<AppState> {
    let orchestrator =
        OrderOrchestrator::with_config(InMemoryOrderStore::new(), inventory, payment, config);
    Arc::new(AppState { orchestrator })
}

/// Creates application state from configuration.
///
/// A configured service URL selects the HTTP gateway; otherwise the
/// in-memory one is used.
pub fn create_default_state(config: &Config) -> Arc<AppState> {
    let inventory: Arc<dyn InventoryGateway> = match &config.inventory_service_url {
        Some(url) => {
            tracing::info!(%url, "using remote inventory service");
            Arc::new(HttpInventoryGateway::new(url.as_str(), config.gateway_timeout))
        }
        None => {
            tracing::info!("using in-memory inventory seeded with the demo catalog");
            Arc::new(InMemoryInventoryGateway::with_parts(demo_catalog()))
        }
    };

    let payment: Arc<dyn PaymentGateway> = match &config.payment_service_url {
        Some(url) => {
            tracing::info!(%url, "using remote payment service");
            Arc::new(HttpPaymentGateway::new(url.as_str(), config.gateway_timeout))
        }
        None => {
            tracing::info!("using in-memory payment service");
            Arc::new(InMemoryPaymentGateway::new())
        }
    };

    create_state(
        inventory,
        payment,
        OrchestratorConfig::with_timeout(config.gateway_timeout),
    )
}
