//! Shopping-cart domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use techstore_core::{CartItemId, CustomerId, ProductId};

/// One product in one customer's cart.
///
/// Lifecycle is owned by the customer: deleting the customer deletes their
/// cart items.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CartItem {
    pub id: CartItemId,
    pub customer_id: CustomerId,
    pub product_id: ProductId,
    /// Positive quantity; defaults to 1.
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

/// Payload for adding a product to a cart.
#[derive(Debug, Clone, Deserialize)]
pub struct AddCartItem {
    pub product_id: ProductId,
    /// Defaults to 1 when omitted.
    pub quantity: Option<i32>,
}

/// Payload for changing a cart item's quantity.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCartItem {
    pub quantity: i32,
}
