//! In-memory store implementing every repository trait.
//!
//! Backs the service-level tests and documents the repository contract
//! without requiring `PostgreSQL`. Each operation takes the mutex once, so
//! every check-then-act sequence (uniqueness on insert, stock availability
//! on decrement, orders check on customer delete) is atomic with respect to
//! concurrent callers, matching the conditional statements of the
//! `PostgreSQL` implementation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use techstore_core::{CartItemId, CustomerId, Document, Email, OrderId, OrderStatus, ProductId};

use super::cart::CartRepository;
use super::customers::{CustomerDeletion, CustomerRepository, NewCustomerRecord};
use super::orders::{NewOrderRecord, OrderRepository};
use super::products::ProductRepository;
use super::RepositoryError;
use crate::models::cart::CartItem;
use crate::models::customer::{Customer, UpdateCustomer};
use crate::models::order::{NewOrderLine, Order, OrderLine};
use crate::models::product::{NewProduct, Product};

#[derive(Default)]
struct Inner {
    customers: HashMap<CustomerId, Customer>,
    products: HashMap<ProductId, Product>,
    cart_items: Vec<CartItem>,
    orders: HashMap<OrderId, Order>,
    order_lines: HashMap<OrderId, Vec<OrderLine>>,
}

/// Thread-safe in-memory store for tests and development.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("mutex poisoned")
    }
}

fn sorted_by_name(mut customers: Vec<Customer>) -> Vec<Customer> {
    customers.sort_by(|a, b| {
        (a.last_name.as_str(), a.first_name.as_str())
            .cmp(&(b.last_name.as_str(), b.first_name.as_str()))
    });
    customers
}

fn sorted_products(mut products: Vec<Product>) -> Vec<Product> {
    products.sort_by(|a, b| a.name.cmp(&b.name));
    products
}

fn contains_insensitive(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[async_trait]
impl CustomerRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Customer>, RepositoryError> {
        Ok(sorted_by_name(self.lock().customers.values().cloned().collect()))
    }

    async fn get(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        Ok(self.lock().customers.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &Email) -> Result<Option<Customer>, RepositoryError> {
        let needle = email.normalized();
        Ok(self
            .lock()
            .customers
            .values()
            .find(|c| c.email.normalized() == needle)
            .cloned())
    }

    async fn get_by_document(
        &self,
        document: &Document,
    ) -> Result<Option<Customer>, RepositoryError> {
        Ok(self
            .lock()
            .customers
            .values()
            .find(|c| c.document == *document)
            .cloned())
    }

    async fn email_exists(&self, email: &Email) -> Result<bool, RepositoryError> {
        let needle = email.normalized();
        Ok(self
            .lock()
            .customers
            .values()
            .any(|c| c.email.normalized() == needle))
    }

    async fn document_exists(&self, document: &Document) -> Result<bool, RepositoryError> {
        Ok(self
            .lock()
            .customers
            .values()
            .any(|c| c.document == *document))
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        Ok(i64::try_from(self.lock().customers.len()).unwrap_or(i64::MAX))
    }

    async fn search(&self, term: &str) -> Result<Vec<Customer>, RepositoryError> {
        let needle = term.to_lowercase();
        let matches = self
            .lock()
            .customers
            .values()
            .filter(|c| {
                contains_insensitive(&c.first_name, &needle)
                    || contains_insensitive(&c.last_name, &needle)
                    || contains_insensitive(c.email.as_str(), &needle)
                    || contains_insensitive(c.document.as_str(), &needle)
            })
            .cloned()
            .collect();

        Ok(sorted_by_name(matches))
    }

    async fn insert(&self, record: NewCustomerRecord) -> Result<Customer, RepositoryError> {
        let mut inner = self.lock();

        // Uniqueness checks and the insert happen under one lock, mirroring
        // the unique indexes of the SQL schema.
        let needle = record.email.normalized();
        if inner.customers.values().any(|c| c.email.normalized() == needle) {
            return Err(RepositoryError::Conflict("email already registered".to_owned()));
        }
        if inner.customers.values().any(|c| c.document == record.document) {
            return Err(RepositoryError::Conflict(
                "document already registered".to_owned(),
            ));
        }

        let customer = Customer {
            id: CustomerId::generate(),
            document: record.document,
            first_name: record.first_name,
            last_name: record.last_name,
            email: record.email,
            password_hash: record.password_hash,
            address: record.address,
            phone: record.phone,
            created_at: Utc::now(),
        };
        inner.customers.insert(customer.id, customer.clone());

        Ok(customer)
    }

    async fn update_profile(
        &self,
        id: CustomerId,
        update: &UpdateCustomer,
    ) -> Result<Option<Customer>, RepositoryError> {
        let mut inner = self.lock();
        let Some(customer) = inner.customers.get_mut(&id) else {
            return Ok(None);
        };

        customer.first_name = update.first_name.clone();
        customer.last_name = update.last_name.clone();
        customer.address = update.address.clone();
        customer.phone = update.phone.clone();

        Ok(Some(customer.clone()))
    }

    async fn update_password_hash(
        &self,
        id: CustomerId,
        password_hash: &str,
    ) -> Result<bool, RepositoryError> {
        let mut inner = self.lock();
        let Some(customer) = inner.customers.get_mut(&id) else {
            return Ok(false);
        };

        customer.password_hash = password_hash.to_owned();
        Ok(true)
    }

    async fn delete(&self, id: CustomerId) -> Result<CustomerDeletion, RepositoryError> {
        let mut inner = self.lock();

        if !inner.customers.contains_key(&id) {
            return Ok(CustomerDeletion::NotFound);
        }
        if inner.orders.values().any(|o| o.customer_id == id) {
            return Ok(CustomerDeletion::HasOrders);
        }

        inner.customers.remove(&id);
        // Cart items cascade with their owner.
        inner.cart_items.retain(|item| item.customer_id != id);

        Ok(CustomerDeletion::Deleted)
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(sorted_products(self.lock().products.values().cloned().collect()))
    }

    async fn list_active(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(sorted_products(
            self.lock()
                .products
                .values()
                .filter(|p| p.active)
                .cloned()
                .collect(),
        ))
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        Ok(self.lock().products.get(&id).cloned())
    }

    async fn by_category(&self, category: &str) -> Result<Vec<Product>, RepositoryError> {
        Ok(sorted_products(
            self.lock()
                .products
                .values()
                .filter(|p| p.active && p.category == category)
                .cloned()
                .collect(),
        ))
    }

    async fn search(&self, term: &str) -> Result<Vec<Product>, RepositoryError> {
        let needle = term.to_lowercase();
        Ok(sorted_products(
            self.lock()
                .products
                .values()
                .filter(|p| {
                    p.active
                        && (contains_insensitive(&p.name, &needle)
                            || contains_insensitive(&p.description, &needle)
                            || contains_insensitive(&p.category, &needle))
                })
                .cloned()
                .collect(),
        ))
    }

    async fn insert(&self, fields: NewProduct) -> Result<Product, RepositoryError> {
        let mut inner = self.lock();

        let product = Product {
            id: ProductId::generate(),
            name: fields.name,
            description: fields.description,
            price: fields.price,
            category: fields.category,
            image_url: fields.image_url,
            stock: fields.stock,
            active: fields.active,
            created_at: Utc::now(),
        };
        inner.products.insert(product.id, product.clone());

        Ok(product)
    }

    async fn update(
        &self,
        id: ProductId,
        fields: &NewProduct,
    ) -> Result<Option<Product>, RepositoryError> {
        let mut inner = self.lock();
        let Some(product) = inner.products.get_mut(&id) else {
            return Ok(None);
        };

        product.name = fields.name.clone();
        product.description = fields.description.clone();
        product.price = fields.price;
        product.category = fields.category.clone();
        product.image_url = fields.image_url.clone();
        product.stock = fields.stock;
        product.active = fields.active;

        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let mut inner = self.lock();

        if !inner.products.contains_key(&id) {
            return Ok(false);
        }
        // Order lines keep their price snapshots; a referenced product
        // cannot be hard-deleted, matching the restrictive foreign key.
        if inner
            .order_lines
            .values()
            .flatten()
            .any(|line| line.product_id == id)
        {
            return Err(RepositoryError::Conflict(
                "product is referenced by existing orders".to_owned(),
            ));
        }

        inner.products.remove(&id);
        // Cart references cascade away with the product.
        inner.cart_items.retain(|item| item.product_id != id);

        Ok(true)
    }

    async fn set_active(&self, id: ProductId, active: bool) -> Result<bool, RepositoryError> {
        let mut inner = self.lock();
        let Some(product) = inner.products.get_mut(&id) else {
            return Ok(false);
        };

        product.active = active;
        Ok(true)
    }

    async fn reduce_stock(&self, id: ProductId, quantity: i32) -> Result<bool, RepositoryError> {
        let mut inner = self.lock();
        let Some(product) = inner.products.get_mut(&id) else {
            return Ok(false);
        };

        if !product.active || product.stock < quantity {
            return Ok(false);
        }

        product.stock -= quantity;
        Ok(true)
    }

    async fn increase_stock(&self, id: ProductId, quantity: i32) -> Result<bool, RepositoryError> {
        let mut inner = self.lock();
        let Some(product) = inner.products.get_mut(&id) else {
            return Ok(false);
        };

        if !product.active {
            return Ok(false);
        }

        product.stock += quantity;
        Ok(true)
    }
}

#[async_trait]
impl CartRepository for MemoryStore {
    async fn items_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<CartItem>, RepositoryError> {
        Ok(self
            .lock()
            .cart_items
            .iter()
            .filter(|item| item.customer_id == customer_id)
            .cloned()
            .collect())
    }

    async fn get_item(&self, id: CartItemId) -> Result<Option<CartItem>, RepositoryError> {
        Ok(self.lock().cart_items.iter().find(|item| item.id == id).cloned())
    }

    async fn upsert_item(
        &self,
        customer_id: CustomerId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<CartItem, RepositoryError> {
        let mut inner = self.lock();

        if let Some(item) = inner
            .cart_items
            .iter_mut()
            .find(|item| item.customer_id == customer_id && item.product_id == product_id)
        {
            item.quantity += quantity;
            return Ok(item.clone());
        }

        let item = CartItem {
            id: CartItemId::generate(),
            customer_id,
            product_id,
            quantity,
            created_at: Utc::now(),
        };
        inner.cart_items.push(item.clone());

        Ok(item)
    }

    async fn update_quantity(
        &self,
        id: CartItemId,
        quantity: i32,
    ) -> Result<Option<CartItem>, RepositoryError> {
        let mut inner = self.lock();
        let Some(item) = inner.cart_items.iter_mut().find(|item| item.id == id) else {
            return Ok(None);
        };

        item.quantity = quantity;
        Ok(Some(item.clone()))
    }

    async fn remove(&self, id: CartItemId) -> Result<bool, RepositoryError> {
        let mut inner = self.lock();
        let before = inner.cart_items.len();
        inner.cart_items.retain(|item| item.id != id);
        Ok(inner.cart_items.len() < before)
    }

    async fn clear(&self, customer_id: CustomerId) -> Result<u64, RepositoryError> {
        let mut inner = self.lock();
        let before = inner.cart_items.len();
        inner.cart_items.retain(|item| item.customer_id != customer_id);
        Ok((before - inner.cart_items.len()) as u64)
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn insert(
        &self,
        record: NewOrderRecord,
        lines: &[NewOrderLine],
    ) -> Result<Order, RepositoryError> {
        let mut inner = self.lock();

        let now = Utc::now();
        let order = Order {
            id: OrderId::generate(),
            customer_id: record.customer_id,
            order_date: now,
            status: record.status,
            total: record.total,
            shipping_address: record.shipping_address,
            created_at: now,
        };

        let stored_lines = lines
            .iter()
            .map(|line| OrderLine {
                id: techstore_core::OrderLineId::generate(),
                order_id: order.id,
                product_id: line.product_id,
                quantity: line.quantity,
                unit_price: line.unit_price,
            })
            .collect();

        inner.orders.insert(order.id, order.clone());
        inner.order_lines.insert(order.id, stored_lines);

        Ok(order)
    }

    async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        Ok(self.lock().orders.get(&id).cloned())
    }

    async fn lines(&self, order_id: OrderId) -> Result<Vec<OrderLine>, RepositoryError> {
        Ok(self.lock().order_lines.get(&order_id).cloned().unwrap_or_default())
    }

    async fn for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Order>, RepositoryError> {
        let mut orders: Vec<Order> = self
            .lock()
            .orders
            .values()
            .filter(|o| o.customer_id == customer_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.order_date.cmp(&a.order_date));

        Ok(orders)
    }

    async fn update_status(
        &self,
        id: OrderId,
        status: &OrderStatus,
    ) -> Result<bool, RepositoryError> {
        let mut inner = self.lock();
        let Some(order) = inner.orders.get_mut(&id) else {
            return Ok(false);
        };

        order.status = status.clone();
        Ok(true)
    }

    async fn customer_has_orders(
        &self,
        customer_id: CustomerId,
    ) -> Result<bool, RepositoryError> {
        Ok(self
            .lock()
            .orders
            .values()
            .any(|o| o.customer_id == customer_id))
    }
}
