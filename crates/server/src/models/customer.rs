//! Customer domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use techstore_core::{CustomerId, Document, Email};

/// A customer record (domain type).
///
/// Carries the password hash and therefore deliberately does not implement
/// `Serialize`; use [`CustomerResponse`] for anything leaving the process.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Customer {
    /// Unique customer ID, assigned by the store at creation.
    pub id: CustomerId,
    /// National identity document number (globally unique).
    pub document: Document,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address (unique, case-insensitive).
    pub email: Email,
    /// Argon2 PHC-format password hash.
    pub password_hash: String,
    /// Shipping/billing address.
    pub address: String,
    /// Contact phone number.
    pub phone: String,
    /// When the customer was created, assigned by the store.
    pub created_at: DateTime<Utc>,
}

/// Customer shape returned by the API. Never contains the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerResponse {
    pub id: CustomerId,
    pub document: Document,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub address: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            document: customer.document,
            first_name: customer.first_name,
            last_name: customer.last_name,
            email: customer.email,
            address: customer.address,
            phone: customer.phone,
            created_at: customer.created_at,
        }
    }
}

/// Raw customer-creation payload as received over the wire.
///
/// Validated and parsed into a [`NewCustomer`] before reaching the service.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCustomer {
    pub document: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
}

/// Validated customer-creation input.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub document: Document,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    /// Plaintext password; hashed by the service, never stored.
    pub password: String,
    pub address: String,
    pub phone: String,
}

/// Customer-update payload.
///
/// Only the profile fields are mutable through this path; email, document,
/// and password hash cannot be changed here.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCustomer {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
}
