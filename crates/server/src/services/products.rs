//! Product service: CRUD plus stock control.

use techstore_core::ProductId;

use super::ServiceError;
use crate::db::products::ProductRepository;
use crate::models::product::{NewProduct, Product};
use crate::validate::ValidationErrors;

/// Product service.
///
/// Stock movements are delegated to the repository's conditional updates,
/// so availability checks and mutations cannot interleave with concurrent
/// requests.
pub struct ProductService<R> {
    products: R,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new product service over a repository.
    pub const fn new(products: R) -> Self {
        Self { products }
    }

    /// All products, active or not.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self.products.list().await?)
    }

    /// Active products only.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn list_active(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self.products.list_active().await?)
    }

    /// Look up a product by id.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the id is unknown.
    pub async fn get(&self, id: ProductId) -> Result<Product, ServiceError> {
        self.products.get(id).await?.ok_or(ServiceError::NotFound)
    }

    /// Active products in a category.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn by_category(&self, category: &str) -> Result<Vec<Product>, ServiceError> {
        Ok(self.products.by_category(category).await?)
    }

    /// Case-insensitive substring search over name, description, and
    /// category, restricted to active products. An empty term returns all
    /// active products.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn search(&self, term: &str) -> Result<Vec<Product>, ServiceError> {
        let term = term.trim();
        if term.is_empty() {
            return self.list_active().await;
        }

        Ok(self.products.search(term).await?)
    }

    /// Add a product to the catalog. Id and creation timestamp are
    /// assigned by the store.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn create(&self, fields: NewProduct) -> Result<Product, ServiceError> {
        Ok(self.products.insert(fields).await?)
    }

    /// Overwrite every mutable field wholesale.
    ///
    /// Returns `None` - distinguishable from success, but not an error -
    /// when the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn update(
        &self,
        id: ProductId,
        fields: NewProduct,
    ) -> Result<Option<Product>, ServiceError> {
        Ok(self.products.update(id, &fields).await?)
    }

    /// Hard-delete a product. Returns whether a record existed and was
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Conflict` if the product is referenced by
    /// existing orders; deactivate instead.
    pub async fn delete(&self, id: ProductId) -> Result<bool, ServiceError> {
        Ok(self.products.delete(id).await?)
    }

    /// Soft-delete: mark the product inactive without removing it.
    /// Returns `false` if the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn deactivate(&self, id: ProductId) -> Result<bool, ServiceError> {
        Ok(self.products.set_active(id, false).await?)
    }

    /// Undo a soft-delete. Returns `false` if the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn reactivate(&self, id: ProductId) -> Result<bool, ServiceError> {
        Ok(self.products.set_active(id, true).await?)
    }

    /// Atomically decrement stock.
    ///
    /// Returns `false` without mutating when the product is missing,
    /// inactive, or has fewer than `quantity` units. Stock never goes
    /// negative, even under concurrent decrements.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` if `quantity` is not positive.
    pub async fn reduce_stock(
        &self,
        id: ProductId,
        quantity: i32,
    ) -> Result<bool, ServiceError> {
        check_quantity(quantity)?;
        Ok(self.products.reduce_stock(id, quantity).await?)
    }

    /// Increment stock. Returns `false` when the product is missing or
    /// inactive. There is no upper bound.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` if `quantity` is not positive.
    pub async fn increase_stock(
        &self,
        id: ProductId,
        quantity: i32,
    ) -> Result<bool, ServiceError> {
        check_quantity(quantity)?;
        Ok(self.products.increase_stock(id, quantity).await?)
    }
}

fn check_quantity(quantity: i32) -> Result<(), ServiceError> {
    if quantity <= 0 {
        return Err(ServiceError::Validation(ValidationErrors::single(
            "quantity",
            "quantity must be positive",
        )));
    }
    Ok(())
}
