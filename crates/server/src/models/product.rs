//! Product domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use techstore_core::{Price, ProductId};

/// A catalog product.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    /// Unique product ID, assigned by the store at creation.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Long-form description.
    pub description: String,
    /// Unit price (non-negative).
    pub price: Price,
    /// Category label used for filtering.
    pub category: String,
    /// Image reference shown on the storefront.
    pub image_url: String,
    /// Units in stock. Never negative.
    pub stock: i32,
    /// Soft-delete marker; inactive products are hidden from the
    /// storefront and refuse stock movements.
    pub active: bool,
    /// When the product was created, assigned by the store.
    pub created_at: DateTime<Utc>,
}

/// Raw product payload as received over the wire, for create and update.
///
/// Updates overwrite every mutable field wholesale; there are no
/// partial-field semantics.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image_url: String,
    pub stock: i32,
    /// Defaults to `true` on create.
    pub active: Option<bool>,
}

/// Validated product fields, ready for insert or wholesale update.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category: String,
    pub image_url: String,
    pub stock: i32,
    pub active: bool,
}
