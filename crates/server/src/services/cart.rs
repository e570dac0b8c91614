//! Shopping-cart service.

use techstore_core::{CartItemId, CustomerId, ProductId};

use super::ServiceError;
use crate::db::cart::CartRepository;
use crate::db::customers::CustomerRepository;
use crate::db::products::ProductRepository;
use crate::models::cart::CartItem;

/// Cart service.
///
/// Cart items belong to exactly one customer and reference exactly one
/// product; adding a product already in the cart bumps its quantity.
pub struct CartService<S> {
    store: S,
}

impl<S> CartService<S>
where
    S: CartRepository + ProductRepository + CustomerRepository,
{
    /// Create a new cart service over a store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// The customer's cart items, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn items(&self, customer_id: CustomerId) -> Result<Vec<CartItem>, ServiceError> {
        Ok(CartRepository::items_for_customer(&self.store, customer_id).await?)
    }

    /// Add a product to the customer's cart.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the customer or product does not
    /// exist and `ServiceError::Conflict` if the product is inactive.
    pub async fn add(
        &self,
        customer_id: CustomerId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<CartItem, ServiceError> {
        if CustomerRepository::get(&self.store, customer_id).await?.is_none() {
            return Err(ServiceError::NotFound);
        }

        let product = ProductRepository::get(&self.store, product_id)
            .await?
            .ok_or(ServiceError::NotFound)?;
        if !product.active {
            return Err(ServiceError::Conflict(
                "product is inactive and cannot be added to a cart".to_owned(),
            ));
        }

        Ok(self.store.upsert_item(customer_id, product_id, quantity).await?)
    }

    /// Set a cart item's quantity.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the item does not exist.
    pub async fn update_quantity(
        &self,
        id: CartItemId,
        quantity: i32,
    ) -> Result<CartItem, ServiceError> {
        self.store
            .update_quantity(id, quantity)
            .await?
            .ok_or(ServiceError::NotFound)
    }

    /// Remove a cart item.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the item does not exist.
    pub async fn remove(&self, id: CartItemId) -> Result<(), ServiceError> {
        if !CartRepository::remove(&self.store, id).await? {
            return Err(ServiceError::NotFound);
        }
        Ok(())
    }

    /// Empty the customer's cart, returning how many items were removed.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn clear(&self, customer_id: CustomerId) -> Result<u64, ServiceError> {
        Ok(CartRepository::clear(&self.store, customer_id).await?)
    }
}
