//! Cart API handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};

use techstore_core::{CartItemId, CustomerId};

use crate::error::Result;
use crate::models::cart::{AddCartItem, CartItem, UpdateCartItem};
use crate::services::CartService;
use crate::state::AppState;
use crate::validate;

/// Cart API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/customers/{id}/cart",
            get(items).post(add).delete(clear),
        )
        .route("/cart/{item_id}", put(update_quantity).delete(remove))
}

/// The customer's cart items.
pub async fn items(
    State(state): State<AppState>,
    Path(customer_id): Path<CustomerId>,
) -> Result<Json<Vec<CartItem>>> {
    let service = CartService::new(state.store());
    let items = service.items(customer_id).await?;

    Ok(Json(items))
}

/// Add a product to the customer's cart (or bump its quantity).
pub async fn add(
    State(state): State<AppState>,
    Path(customer_id): Path<CustomerId>,
    Json(payload): Json<AddCartItem>,
) -> Result<(StatusCode, Json<CartItem>)> {
    let quantity = validate::add_cart_item(&payload)?;

    let service = CartService::new(state.store());
    let item = service.add(customer_id, payload.product_id, quantity).await?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// Empty the customer's cart.
pub async fn clear(
    State(state): State<AppState>,
    Path(customer_id): Path<CustomerId>,
) -> Result<StatusCode> {
    let service = CartService::new(state.store());
    service.clear(customer_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Change a cart item's quantity.
pub async fn update_quantity(
    State(state): State<AppState>,
    Path(item_id): Path<CartItemId>,
    Json(payload): Json<UpdateCartItem>,
) -> Result<Json<CartItem>> {
    validate::update_cart_item(&payload)?;

    let service = CartService::new(state.store());
    let item = service.update_quantity(item_id, payload.quantity).await?;

    Ok(Json(item))
}

/// Remove a cart item.
pub async fn remove(
    State(state): State<AppState>,
    Path(item_id): Path<CartItemId>,
) -> Result<StatusCode> {
    let service = CartService::new(state.store());
    service.remove(item_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
