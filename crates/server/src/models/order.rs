//! Order domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use techstore_core::{CustomerId, OrderId, OrderLineId, OrderStatus, Price, ProductId};

/// A placed order.
///
/// `total` is the sum of the lines' quantity x unit price, computed from
/// the price snapshots taken at placement time.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub total: Decimal,
    pub shipping_address: String,
    pub created_at: DateTime<Utc>,
}

/// One line of an order.
///
/// `unit_price` is a snapshot of the product's price at order time; later
/// price changes do not affect it.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderLine {
    pub id: OrderLineId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub unit_price: Price,
}

/// An order together with its lines, as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithLines {
    #[serde(flatten)]
    pub order: Order,
    pub lines: Vec<OrderLine>,
}

/// Line data captured while building an order.
#[derive(Debug, Clone)]
pub struct NewOrderLine {
    pub product_id: ProductId,
    pub quantity: i32,
    pub unit_price: Price,
}

/// Payload for placing an order from the customer's cart.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceOrder {
    pub shipping_address: String,
}
