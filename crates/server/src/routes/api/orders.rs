//! Order API handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use serde::Deserialize;

use techstore_core::{CustomerId, OrderId, OrderStatus};

use crate::error::Result;
use crate::models::order::{Order, OrderWithLines, PlaceOrder};
use crate::services::OrderService;
use crate::state::AppState;
use crate::validate;

/// Status-update payload.
#[derive(Debug, Deserialize)]
pub struct UpdateStatus {
    pub status: String,
}

/// Order API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/customers/{id}/orders",
            get(list_for_customer).post(place),
        )
        .route("/orders/{id}", get(show))
        .route("/orders/{id}/status", put(update_status))
}

/// Place an order from the customer's cart.
pub async fn place(
    State(state): State<AppState>,
    Path(customer_id): Path<CustomerId>,
    Json(payload): Json<PlaceOrder>,
) -> Result<(StatusCode, Json<Order>)> {
    validate::place_order(&payload)?;

    let service = OrderService::new(state.store());
    let order = service.place(customer_id, payload.shipping_address).await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// The customer's orders, newest first.
pub async fn list_for_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<CustomerId>,
) -> Result<Json<Vec<Order>>> {
    let service = OrderService::new(state.store());
    let orders = service.list_for_customer(customer_id).await?;

    Ok(Json(orders))
}

/// Fetch one order with its lines.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderWithLines>> {
    let service = OrderService::new(state.store());
    let order = service.get(id).await?;

    Ok(Json(order))
}

/// Replace an order's status.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(payload): Json<UpdateStatus>,
) -> Result<StatusCode> {
    let service = OrderService::new(state.store());
    service
        .update_status(id, OrderStatus::new(payload.status))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
