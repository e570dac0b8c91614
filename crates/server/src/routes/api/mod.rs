//! JSON API route handlers.

pub mod cart;
pub mod customers;
pub mod orders;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// All JSON API routes, to be nested under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(customers::routes())
        .merge(products::routes())
        .merge(cart::routes())
        .merge(orders::routes())
}
