//! Order service: checkout from cart, listing, status updates.

use rust_decimal::Decimal;

use techstore_core::{CustomerId, OrderId, OrderStatus};

use super::ServiceError;
use crate::db::cart::CartRepository;
use crate::db::customers::CustomerRepository;
use crate::db::orders::{NewOrderRecord, OrderRepository};
use crate::db::products::ProductRepository;
use crate::models::order::{NewOrderLine, Order, OrderWithLines};
use crate::validate::ValidationErrors;

/// Order service.
///
/// Orders are built from the customer's cart. Each line captures the
/// product's price at placement time; the order total is the sum of those
/// snapshots times the quantities, and later catalog price changes do not
/// affect it.
pub struct OrderService<S> {
    store: S,
}

impl<S> OrderService<S>
where
    S: OrderRepository + ProductRepository + CartRepository + CustomerRepository,
{
    /// Create a new order service over a store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Place an order from the customer's cart.
    ///
    /// Stock is decremented line by line through the store's conditional
    /// update, so no line can drive stock negative. If a line fails -
    /// product gone, deactivated, or short on stock - the decrements
    /// already made are restored and the placement fails closed with a
    /// conflict; the cart is left untouched. On success the cart is
    /// emptied.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` for an unknown customer,
    /// `ServiceError::Validation` for an empty cart, and
    /// `ServiceError::Conflict` when a product is unavailable.
    pub async fn place(
        &self,
        customer_id: CustomerId,
        shipping_address: String,
    ) -> Result<Order, ServiceError> {
        if CustomerRepository::get(&self.store, customer_id).await?.is_none() {
            return Err(ServiceError::NotFound);
        }

        let items = CartRepository::items_for_customer(&self.store, customer_id).await?;
        if items.is_empty() {
            return Err(ServiceError::Validation(ValidationErrors::single(
                "cart",
                "cart is empty",
            )));
        }

        let mut lines: Vec<NewOrderLine> = Vec::with_capacity(items.len());
        for item in &items {
            let product = match ProductRepository::get(&self.store, item.product_id).await {
                Ok(Some(product)) => product,
                Ok(None) => {
                    self.restore_stock(&lines).await;
                    return Err(ServiceError::Conflict(
                        "a product in the cart is no longer available".to_owned(),
                    ));
                }
                Err(e) => {
                    self.restore_stock(&lines).await;
                    return Err(e.into());
                }
            };

            match self.store.reduce_stock(item.product_id, item.quantity).await {
                Ok(true) => {}
                Ok(false) => {
                    self.restore_stock(&lines).await;
                    return Err(ServiceError::Conflict(format!(
                        "insufficient stock for {}",
                        product.name
                    )));
                }
                Err(e) => {
                    self.restore_stock(&lines).await;
                    return Err(e.into());
                }
            }

            lines.push(NewOrderLine {
                product_id: item.product_id,
                quantity: item.quantity,
                unit_price: product.price,
            });
        }

        let total: Decimal = lines
            .iter()
            .map(|line| line.unit_price.extended(line.quantity))
            .sum();

        let record = NewOrderRecord {
            customer_id,
            status: OrderStatus::default(),
            total,
            shipping_address,
        };

        let order = match OrderRepository::insert(&self.store, record, &lines).await {
            Ok(order) => order,
            Err(e) => {
                self.restore_stock(&lines).await;
                return Err(e.into());
            }
        };

        CartRepository::clear(&self.store, customer_id).await?;

        Ok(order)
    }

    /// An order with its lines.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the id is unknown.
    pub async fn get(&self, id: OrderId) -> Result<OrderWithLines, ServiceError> {
        let order = OrderRepository::get(&self.store, id)
            .await?
            .ok_or(ServiceError::NotFound)?;
        let lines = self.store.lines(id).await?;

        Ok(OrderWithLines { order, lines })
    }

    /// All orders placed by a customer, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the customer is unknown.
    pub async fn list_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Order>, ServiceError> {
        if CustomerRepository::get(&self.store, customer_id).await?.is_none() {
            return Err(ServiceError::NotFound);
        }

        Ok(self.store.for_customer(customer_id).await?)
    }

    /// Replace an order's status.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the id is unknown.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<(), ServiceError> {
        if !self.store.update_status(id, &status).await? {
            return Err(ServiceError::NotFound);
        }
        Ok(())
    }

    /// Undo the stock decrements of already-reserved lines after a later
    /// line failed.
    async fn restore_stock(&self, lines: &[NewOrderLine]) {
        for line in lines {
            match self.store.increase_stock(line.product_id, line.quantity).await {
                Ok(true) => {}
                Ok(false) => tracing::warn!(
                    product_id = %line.product_id,
                    quantity = line.quantity,
                    "could not restore stock for inactive or removed product"
                ),
                Err(e) => tracing::error!(
                    product_id = %line.product_id,
                    quantity = line.quantity,
                    error = %e,
                    "failed to restore stock after aborted order"
                ),
            }
        }
    }
}
