//! Integration tests for TechStore.
//!
//! The tests exercise the service layer end to end against the in-memory
//! store, which implements the same repository contract as the
//! `PostgreSQL` store (conditional stock updates, uniqueness guards, the
//! orders check on customer deletion).
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p techstore-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use rust_decimal::Decimal;

use techstore_core::{Document, Email, Price};
use techstore_server::models::customer::NewCustomer;
use techstore_server::models::product::NewProduct;

/// Build a valid customer-creation input for tests.
///
/// # Panics
///
/// Panics if `document` or `email` are not valid for their types.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn new_customer(document: &str, email: &str) -> NewCustomer {
    NewCustomer {
        document: Document::parse(document).unwrap(),
        first_name: "Test".to_owned(),
        last_name: "Customer".to_owned(),
        email: Email::parse(email).unwrap(),
        password: "a sufficiently long password".to_owned(),
        address: "1 Test Street".to_owned(),
        phone: "555-0199".to_owned(),
    }
}

/// Build product fields for tests; price is given in cents.
///
/// # Panics
///
/// Panics if `cents` is negative.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn product(name: &str, cents: i64, stock: i32) -> NewProduct {
    NewProduct {
        name: name.to_owned(),
        description: format!("{name} description"),
        price: Price::new(Decimal::new(cents, 2)).unwrap(),
        category: "Test".to_owned(),
        image_url: String::new(),
        stock,
        active: true,
    }
}
