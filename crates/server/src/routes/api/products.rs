//! Product API handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;

use techstore_core::ProductId;

use crate::error::{AppError, Result};
use crate::models::product::{Product, ProductInput};
use crate::services::ProductService;
use crate::state::AppState;
use crate::validate;

/// Filters for the product list endpoint.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Search term; restricts the result to active products.
    pub q: Option<String>,
    /// Category filter; restricts the result to active products.
    pub category: Option<String>,
    /// When true, return active products only.
    #[serde(default)]
    pub active: bool,
}

/// Stock adjustment payload.
#[derive(Debug, Deserialize)]
pub struct StockAdjustment {
    pub quantity: i32,
}

/// Product API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list).post(create))
        .route(
            "/products/{id}",
            get(show).put(update).delete(remove),
        )
        .route("/products/{id}/deactivate", post(deactivate))
        .route("/products/{id}/reactivate", post(reactivate))
        .route("/products/{id}/stock/reduce", post(reduce_stock))
        .route("/products/{id}/stock/increase", post(increase_stock))
}

/// List products.
///
/// `?q=` searches active products; `?category=` filters active products;
/// `?active=true` lists active products; otherwise the whole catalog is
/// returned, inactive products included.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Product>>> {
    let service = ProductService::new(state.store());

    let products = if let Some(term) = query.q {
        service.search(&term).await?
    } else if let Some(category) = query.category {
        service.by_category(&category).await?
    } else if query.active {
        service.list_active().await?
    } else {
        service.list().await?
    };

    Ok(Json(products))
}

/// Fetch one product.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    let service = ProductService::new(state.store());
    let product = service.get(id).await?;

    Ok(Json(product))
}

/// Add a product to the catalog.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<ProductInput>,
) -> Result<(StatusCode, Json<Product>)> {
    let fields = validate::product(payload)?;

    let service = ProductService::new(state.store());
    let product = service.create(fields).await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// Overwrite a product's fields wholesale.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(payload): Json<ProductInput>,
) -> Result<Json<Product>> {
    let fields = validate::product(payload)?;

    let service = ProductService::new(state.store());
    let product = service
        .update(id, fields)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(Json(product))
}

/// Hard-delete a product.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<StatusCode> {
    let service = ProductService::new(state.store());

    if !service.delete(id).await? {
        return Err(AppError::NotFound(format!("product {id}")));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Soft-delete: mark a product inactive.
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<StatusCode> {
    let service = ProductService::new(state.store());

    if !service.deactivate(id).await? {
        return Err(AppError::NotFound(format!("product {id}")));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Undo a soft-delete.
pub async fn reactivate(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<StatusCode> {
    let service = ProductService::new(state.store());

    if !service.reactivate(id).await? {
        return Err(AppError::NotFound(format!("product {id}")));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Atomically decrement stock; fails closed when unavailable.
pub async fn reduce_stock(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(payload): Json<StockAdjustment>,
) -> Result<StatusCode> {
    let service = ProductService::new(state.store());

    if !service.reduce_stock(id, payload.quantity).await? {
        return Err(AppError::Service(crate::services::ServiceError::Conflict(
            "insufficient stock, or product is missing or inactive".to_owned(),
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Increment stock.
pub async fn increase_stock(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(payload): Json<StockAdjustment>,
) -> Result<StatusCode> {
    let service = ProductService::new(state.store());

    if !service.increase_stock(id, payload.quantity).await? {
        return Err(AppError::Service(crate::services::ServiceError::Conflict(
            "product is missing or inactive".to_owned(),
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}
