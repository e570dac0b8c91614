//! Product repository.

use async_trait::async_trait;

use techstore_core::ProductId;

use super::{PgStore, RepositoryError, like_pattern};
use crate::models::product::{NewProduct, Product};

const COLUMNS: &str =
    "id, name, description, price, category, image_url, stock, active, created_at";

/// Repository for catalog products.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products, active or not, ordered by name.
    async fn list(&self) -> Result<Vec<Product>, RepositoryError>;

    /// Active products only, ordered by name.
    async fn list_active(&self) -> Result<Vec<Product>, RepositoryError>;

    /// Look up a product by id (active or not).
    async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;

    /// Active products in a category, ordered by name.
    async fn by_category(&self, category: &str) -> Result<Vec<Product>, RepositoryError>;

    /// Case-insensitive substring search over name, description, and
    /// category, restricted to active products.
    async fn search(&self, term: &str) -> Result<Vec<Product>, RepositoryError>;

    /// Persist a new product. Id and creation timestamp are assigned by the
    /// store.
    async fn insert(&self, fields: NewProduct) -> Result<Product, RepositoryError>;

    /// Overwrite every mutable field wholesale. Returns `None` if the
    /// product does not exist.
    async fn update(
        &self,
        id: ProductId,
        fields: &NewProduct,
    ) -> Result<Option<Product>, RepositoryError>;

    /// Hard-delete a product. Returns `false` if it did not exist.
    async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError>;

    /// Set the active flag. Returns `false` if the product does not exist.
    async fn set_active(&self, id: ProductId, active: bool) -> Result<bool, RepositoryError>;

    /// Atomically decrement stock by `quantity`.
    ///
    /// Returns `false` without mutating when the product is missing,
    /// inactive, or has insufficient stock. Stock can never go negative.
    async fn reduce_stock(&self, id: ProductId, quantity: i32) -> Result<bool, RepositoryError>;

    /// Increment stock by `quantity`. Returns `false` when the product is
    /// missing or inactive.
    async fn increase_stock(&self, id: ProductId, quantity: i32) -> Result<bool, RepositoryError>;
}

#[async_trait]
impl ProductRepository for PgStore {
    async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let products =
            sqlx::query_as::<_, Product>(&format!("SELECT {COLUMNS} FROM products ORDER BY name"))
                .fetch_all(self.pool())
                .await?;

        Ok(products)
    }

    async fn list_active(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {COLUMNS} FROM products WHERE active ORDER BY name"
        ))
        .fetch_all(self.pool())
        .await?;

        Ok(products)
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product =
            sqlx::query_as::<_, Product>(&format!("SELECT {COLUMNS} FROM products WHERE id = $1"))
                .bind(id)
                .fetch_optional(self.pool())
                .await?;

        Ok(product)
    }

    async fn by_category(&self, category: &str) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {COLUMNS} FROM products WHERE active AND category = $1 ORDER BY name"
        ))
        .bind(category)
        .fetch_all(self.pool())
        .await?;

        Ok(products)
    }

    async fn search(&self, term: &str) -> Result<Vec<Product>, RepositoryError> {
        let pattern = like_pattern(term);
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {COLUMNS} FROM products \
             WHERE active \
               AND (name ILIKE $1 OR description ILIKE $1 OR category ILIKE $1) \
             ORDER BY name"
        ))
        .bind(&pattern)
        .fetch_all(self.pool())
        .await?;

        Ok(products)
    }

    async fn insert(&self, fields: NewProduct) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products \
                 (name, description, price, category, image_url, stock, active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        ))
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.price)
        .bind(&fields.category)
        .bind(&fields.image_url)
        .bind(fields.stock)
        .bind(fields.active)
        .fetch_one(self.pool())
        .await?;

        Ok(product)
    }

    async fn update(
        &self,
        id: ProductId,
        fields: &NewProduct,
    ) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "UPDATE products \
             SET name = $2, description = $3, price = $4, category = $5, \
                 image_url = $6, stock = $7, active = $8 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.price)
        .bind(&fields.category)
        .bind(&fields.image_url)
        .bind(fields.stock)
        .bind(fields.active)
        .fetch_optional(self.pool())
        .await?;

        Ok(product)
    }

    async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_active(&self, id: ProductId, active: bool) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE products SET active = $2 WHERE id = $1")
            .bind(id)
            .bind(active)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn reduce_stock(&self, id: ProductId, quantity: i32) -> Result<bool, RepositoryError> {
        // Availability check and decrement are one conditional statement;
        // zero rows affected means missing, inactive, or insufficient stock.
        let result = sqlx::query(
            "UPDATE products SET stock = stock - $2 \
             WHERE id = $1 AND active AND stock >= $2",
        )
        .bind(id)
        .bind(quantity)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn increase_stock(&self, id: ProductId, quantity: i32) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "UPDATE products SET stock = stock + $2 \
             WHERE id = $1 AND active",
        )
        .bind(id)
        .bind(quantity)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
