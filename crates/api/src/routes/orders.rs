//! Order lifecycle endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::{OrderId, PartId, UserId};
use domain::{Order, PaymentMethod};
use gateway::{InventoryGateway, PaymentGateway};
use orchestrator::OrderOrchestrator;
use order_store::InMemoryOrderStore;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Orchestrator wired with runtime-selected gateways.
pub type Orchestrator = OrderOrchestrator<
    InMemoryOrderStore,
    Arc<dyn InventoryGateway>,
    Arc<dyn PaymentGateway>,
>;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub orchestrator: Orchestrator,
}

// -- Request types --

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub user_uuid: String,
    #[serde(default)]
    pub part_uuids: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PayOrderRequest {
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

// -- Response types --

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub order_uuid: String,
    pub user_uuid: String,
    pub part_uuids: Vec<String>,
    pub total_price_cents: i64,
    pub transaction_uuid: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct OrderCreatedResponse {
    pub order_uuid: String,
    pub total_price_cents: i64,
}

#[derive(Debug, Serialize)]
pub struct OrderPaidResponse {
    pub transaction_uuid: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            order_uuid: order.id.into_inner(),
            user_uuid: order.user_id.into_inner(),
            part_uuids: order.part_ids.into_iter().map(PartId::into_inner).collect(),
            total_price_cents: order.total_price.cents(),
            transaction_uuid: order.transaction_id.map(|tx| tx.into_inner()),
            payment_method: order.payment_method,
            status: order.status.to_string(),
        }
    }
}

// -- Handlers --

/// GET /api/v1/orders/{order_uuid} - load an order.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = state.orchestrator.get_order(&OrderId::from(id)).await?;
    Ok(Json(order.into()))
}

/// POST /api/v1/orders - create an order priced against the catalog.
#[tracing::instrument(skip(state, req))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    req: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderCreatedResponse>), ApiError> {
    let Json(req) = req?;

    let part_ids = req.part_uuids.into_iter().map(PartId::from).collect();
    let created = state
        .orchestrator
        .create_order(UserId::from(req.user_uuid), part_ids)
        .await?;

    let response = OrderCreatedResponse {
        order_uuid: created.order_id.into_inner(),
        total_price_cents: created.total_price.cents(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/orders/{order_uuid}/pay - pay a pending order.
#[tracing::instrument(skip(state, req))]
pub async fn pay(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    req: Result<Json<PayOrderRequest>, JsonRejection>,
) -> Result<Json<OrderPaidResponse>, ApiError> {
    let Json(req) = req?;

    let transaction_id = state
        .orchestrator
        .pay_order(&OrderId::from(id), req.payment_method)
        .await?;

    Ok(Json(OrderPaidResponse {
        transaction_uuid: transaction_id.into_inner(),
    }))
}

/// POST /api/v1/orders/{order_uuid}/cancel - cancel a pending order.
#[tracing::instrument(skip(state))]
pub async fn cancel(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.orchestrator.cancel_order(&OrderId::from(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
