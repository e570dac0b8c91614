//! Shopping-cart repository.

use async_trait::async_trait;

use techstore_core::{CartItemId, CustomerId, ProductId};

use super::{PgStore, RepositoryError};
use crate::models::cart::CartItem;

const COLUMNS: &str = "id, customer_id, product_id, quantity, created_at";

/// Repository for cart items.
///
/// Cart items only exist attached to a customer; there is no standalone
/// lifecycle.
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// All items in a customer's cart, oldest first.
    async fn items_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<CartItem>, RepositoryError>;

    /// Look up a single cart item.
    async fn get_item(&self, id: CartItemId) -> Result<Option<CartItem>, RepositoryError>;

    /// Add a product to the cart, or bump its quantity if already present.
    async fn upsert_item(
        &self,
        customer_id: CustomerId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<CartItem, RepositoryError>;

    /// Set a cart item's quantity. Returns `None` if the item does not
    /// exist.
    async fn update_quantity(
        &self,
        id: CartItemId,
        quantity: i32,
    ) -> Result<Option<CartItem>, RepositoryError>;

    /// Remove a cart item. Returns `false` if it did not exist.
    async fn remove(&self, id: CartItemId) -> Result<bool, RepositoryError>;

    /// Empty a customer's cart, returning how many items were removed.
    async fn clear(&self, customer_id: CustomerId) -> Result<u64, RepositoryError>;
}

#[async_trait]
impl CartRepository for PgStore {
    async fn items_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<CartItem>, RepositoryError> {
        let items = sqlx::query_as::<_, CartItem>(&format!(
            "SELECT {COLUMNS} FROM cart_items WHERE customer_id = $1 ORDER BY created_at"
        ))
        .bind(customer_id)
        .fetch_all(self.pool())
        .await?;

        Ok(items)
    }

    async fn get_item(&self, id: CartItemId) -> Result<Option<CartItem>, RepositoryError> {
        let item = sqlx::query_as::<_, CartItem>(&format!(
            "SELECT {COLUMNS} FROM cart_items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        Ok(item)
    }

    async fn upsert_item(
        &self,
        customer_id: CustomerId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<CartItem, RepositoryError> {
        let item = sqlx::query_as::<_, CartItem>(&format!(
            "INSERT INTO cart_items (customer_id, product_id, quantity) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (customer_id, product_id) \
             DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity \
             RETURNING {COLUMNS}"
        ))
        .bind(customer_id)
        .bind(product_id)
        .bind(quantity)
        .fetch_one(self.pool())
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::Conflict(
                    "customer or product does not exist".to_owned(),
                );
            }
            RepositoryError::Database(e)
        })?;

        Ok(item)
    }

    async fn update_quantity(
        &self,
        id: CartItemId,
        quantity: i32,
    ) -> Result<Option<CartItem>, RepositoryError> {
        let item = sqlx::query_as::<_, CartItem>(&format!(
            "UPDATE cart_items SET quantity = $2 WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(quantity)
        .fetch_optional(self.pool())
        .await?;

        Ok(item)
    }

    async fn remove(&self, id: CartItemId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn clear(&self, customer_id: CustomerId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE customer_id = $1")
            .bind(customer_id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected())
    }
}
