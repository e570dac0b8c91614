//! Customer API handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;

use techstore_core::{CustomerId, Email};

use crate::error::{AppError, Result};
use crate::models::customer::{CreateCustomer, CustomerResponse, UpdateCustomer};
use crate::services::CustomerService;
use crate::state::AppState;
use crate::validate;

/// Optional search term for list endpoints.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Login request payload.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Password-change request payload.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Password-reset request payload.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub new_password: String,
}

/// Customer API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list).post(create))
        .route("/customers/count", get(count))
        .route(
            "/customers/{id}",
            get(show).put(update).delete(remove),
        )
        .route("/customers/{id}/password", post(change_password))
        .route("/auth/login", post(login))
        .route("/auth/reset-password", post(reset_password))
}

/// List customers, or search them when `?q=` is present.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<CustomerResponse>>> {
    let service = CustomerService::new(state.store());

    let customers = match query.q {
        Some(term) => service.search(&term).await?,
        None => service.list().await?,
    };

    Ok(Json(customers.into_iter().map(CustomerResponse::from).collect()))
}

/// Total number of customers.
pub async fn count(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    let service = CustomerService::new(state.store());
    let count = service.count().await?;

    Ok(Json(serde_json::json!({ "count": count })))
}

/// Fetch one customer.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
) -> Result<Json<CustomerResponse>> {
    let service = CustomerService::new(state.store());
    let customer = service.get(id).await?;

    Ok(Json(customer.into()))
}

/// Register a new customer.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateCustomer>,
) -> Result<(StatusCode, Json<CustomerResponse>)> {
    let new = validate::create_customer(payload)?;

    let service = CustomerService::new(state.store());
    let customer = service.create(new).await?;

    Ok((StatusCode::CREATED, Json(customer.into())))
}

/// Update a customer's profile fields.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
    Json(payload): Json<UpdateCustomer>,
) -> Result<Json<CustomerResponse>> {
    validate::update_customer(&payload)?;

    let service = CustomerService::new(state.store());
    let customer = service.update(id, payload).await?;

    Ok(Json(customer.into()))
}

/// Delete a customer. Blocked when orders exist.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
) -> Result<StatusCode> {
    let service = CustomerService::new(state.store());
    service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Authenticate by email and password.
///
/// An unknown email and a wrong password both produce the same 401.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<CustomerResponse>> {
    let service = CustomerService::new(state.store());

    let customer = service
        .authenticate(&payload.email, &payload.password)
        .await?
        .ok_or_else(|| AppError::Unauthorized("invalid credentials".to_owned()))?;

    Ok(Json(customer.into()))
}

/// Change a customer's password after verifying the current one.
pub async fn change_password(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<StatusCode> {
    validate::change_password(&payload.new_password)?;

    let service = CustomerService::new(state.store());
    service
        .change_password(id, &payload.current_password, &payload.new_password)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Replace a customer's password by email.
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<StatusCode> {
    validate::change_password(&payload.new_password)?;

    let email = Email::parse(&payload.email)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let service = CustomerService::new(state.store());
    if !service.reset_password(&email, &payload.new_password).await? {
        return Err(AppError::NotFound("no customer with that email".to_owned()));
    }

    Ok(StatusCode::NO_CONTENT)
}
