//! Order repository.

use async_trait::async_trait;
use rust_decimal::Decimal;

use techstore_core::{CustomerId, OrderId, OrderStatus};

use super::{PgStore, RepositoryError};
use crate::models::order::{NewOrderLine, Order, OrderLine};

const ORDER_COLUMNS: &str =
    "id, customer_id, order_date, status, total, shipping_address, created_at";
const LINE_COLUMNS: &str = "id, order_id, product_id, quantity, unit_price";

/// Fields persisted when creating an order. Id, order date, and creation
/// timestamp are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewOrderRecord {
    pub customer_id: CustomerId,
    pub status: OrderStatus,
    pub total: Decimal,
    pub shipping_address: String,
}

/// Repository for orders and their lines.
///
/// Order lines only exist attached to an order, so they are created
/// together with it and never mutated afterwards.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist an order and its lines as one unit.
    async fn insert(
        &self,
        record: NewOrderRecord,
        lines: &[NewOrderLine],
    ) -> Result<Order, RepositoryError>;

    /// Look up an order by id.
    async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError>;

    /// The lines of an order, in insertion order.
    async fn lines(&self, order_id: OrderId) -> Result<Vec<OrderLine>, RepositoryError>;

    /// All orders placed by a customer, newest first.
    async fn for_customer(&self, customer_id: CustomerId)
    -> Result<Vec<Order>, RepositoryError>;

    /// Replace an order's status. Returns `false` if the order does not
    /// exist.
    async fn update_status(
        &self,
        id: OrderId,
        status: &OrderStatus,
    ) -> Result<bool, RepositoryError>;

    /// Whether the customer has placed at least one order.
    async fn customer_has_orders(
        &self,
        customer_id: CustomerId,
    ) -> Result<bool, RepositoryError>;
}

#[async_trait]
impl OrderRepository for PgStore {
    async fn insert(
        &self,
        record: NewOrderRecord,
        lines: &[NewOrderLine],
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool().begin().await?;

        let order = sqlx::query_as::<_, Order>(&format!(
            "INSERT INTO orders (customer_id, status, total, shipping_address) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(record.customer_id)
        .bind(&record.status)
        .bind(record.total)
        .bind(&record.shipping_address)
        .fetch_one(&mut *tx)
        .await?;

        for (line_no, line) in (0i32..).zip(lines) {
            sqlx::query(
                "INSERT INTO order_lines (order_id, product_id, line_no, quantity, unit_price) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(order.id)
            .bind(line.product_id)
            .bind(line_no)
            .bind(line.quantity)
            .bind(line.unit_price)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(order)
    }

    async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        Ok(order)
    }

    async fn lines(&self, order_id: OrderId) -> Result<Vec<OrderLine>, RepositoryError> {
        let lines = sqlx::query_as::<_, OrderLine>(&format!(
            "SELECT {LINE_COLUMNS} FROM order_lines WHERE order_id = $1 ORDER BY line_no"
        ))
        .bind(order_id)
        .fetch_all(self.pool())
        .await?;

        Ok(lines)
    }

    async fn for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE customer_id = $1 ORDER BY order_date DESC"
        ))
        .bind(customer_id)
        .fetch_all(self.pool())
        .await?;

        Ok(orders)
    }

    async fn update_status(
        &self,
        id: OrderId,
        status: &OrderStatus,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE orders SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn customer_has_orders(
        &self,
        customer_id: CustomerId,
    ) -> Result<bool, RepositoryError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM orders WHERE customer_id = $1)")
                .bind(customer_id)
                .fetch_one(self.pool())
                .await?;

        Ok(exists)
    }
}
