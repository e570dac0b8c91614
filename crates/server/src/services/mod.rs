//! Application services.
//!
//! Services orchestrate repository calls and enforce the business rules:
//! uniqueness on customer creation, the orders guard on customer deletion,
//! stock sufficiency on decrement, and password hashing/verification.
//! Each service is generic over the repository traits it needs, so the
//! same code runs against `PostgreSQL` in production and the in-memory
//! store in tests.

pub mod cart;
pub mod customers;
pub mod orders;
pub mod products;

pub use cart::CartService;
pub use customers::CustomerService;
pub use orders::OrderService;
pub use products::ProductService;

use crate::db::RepositoryError;
use crate::validate::ValidationErrors;

/// Business-level error taxonomy.
///
/// - `Validation` - malformed input; 400-equivalent
/// - `NotFound` - referenced identity does not exist; 404-equivalent
/// - `Conflict` - business-invariant violation; 409-equivalent
/// - `Repository` - underlying store failure; 500-equivalent
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Malformed input.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Referenced identity does not exist.
    #[error("not found")]
    NotFound,

    /// Business-invariant violation (duplicate email/document, blocked
    /// deletion, current-password mismatch).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Password hashing failed.
    #[error("password hashing failed")]
    PasswordHash,

    /// Underlying persistence failure.
    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => Self::NotFound,
            RepositoryError::Conflict(message) => Self::Conflict(message),
            other => Self::Repository(other),
        }
    }
}
