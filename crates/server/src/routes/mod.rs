//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (active product grid)
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database)
//!
//! # Storefront (server-rendered)
//! GET  /products               - Product listing (?q= search, ?category=)
//! GET  /products/{id}          - Product detail (active products only)
//!
//! # Customers API
//! GET    /api/customers            - List customers (?q= search)
//! POST   /api/customers            - Register customer (201)
//! GET    /api/customers/count      - Customer count
//! GET    /api/customers/{id}       - Fetch customer
//! PUT    /api/customers/{id}       - Update profile fields
//! DELETE /api/customers/{id}       - Delete (409 when orders exist)
//! POST   /api/customers/{id}/password - Change password
//! POST   /api/auth/login           - Authenticate (401 on no match)
//! POST   /api/auth/reset-password  - Reset password by email
//!
//! # Products API
//! GET    /api/products             - List (?q=, ?category=, ?active=true)
//! POST   /api/products             - Create (201)
//! GET    /api/products/{id}        - Fetch product
//! PUT    /api/products/{id}        - Wholesale update
//! DELETE /api/products/{id}        - Hard delete
//! POST   /api/products/{id}/deactivate     - Soft delete
//! POST   /api/products/{id}/reactivate     - Undo soft delete
//! POST   /api/products/{id}/stock/reduce   - Decrement stock (409 on shortfall)
//! POST   /api/products/{id}/stock/increase - Increment stock
//!
//! # Cart API
//! GET    /api/customers/{id}/cart  - Cart items
//! POST   /api/customers/{id}/cart  - Add product (201)
//! DELETE /api/customers/{id}/cart  - Empty cart
//! PUT    /api/cart/{item_id}       - Change quantity
//! DELETE /api/cart/{item_id}       - Remove item
//!
//! # Orders API
//! GET    /api/customers/{id}/orders - Customer's orders
//! POST   /api/customers/{id}/orders - Place order from cart (201)
//! GET    /api/orders/{id}           - Order with lines
//! PUT    /api/orders/{id}/status    - Replace status
//! ```

pub mod api;
pub mod home;
pub mod products;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the storefront page routes.
pub fn storefront_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/products", get(products::index))
        .route("/products/{id}", get(products::show))
}

/// Create all routes for the server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(storefront_routes())
        .nest("/api", api::routes())
}
