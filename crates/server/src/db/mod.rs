//! Persistence layer.
//!
//! One repository trait per aggregate root ([`CustomerRepository`],
//! [`ProductRepository`]) plus traits for the owned collections
//! ([`CartRepository`], [`OrderRepository`]). Two implementations exist:
//!
//! - [`PgStore`] - `PostgreSQL` via sqlx. Check-then-act races are closed at
//!   the store: unique indexes back the creation pre-checks, and stock/delete
//!   mutations are single conditional statements where zero rows affected is
//!   the failure signal.
//! - [`memory::MemoryStore`] - mutex-guarded maps with the same contract,
//!   used by tests.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p techstore-cli -- migrate
//! ```

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub mod cart;
pub mod customers;
pub mod memory;
pub mod orders;
pub mod products;

pub use cart::CartRepository;
pub use customers::{CustomerDeletion, CustomerRepository};
pub use memory::MemoryStore;
pub use orders::OrderRepository;
pub use products::ProductRepository;

/// Errors produced by the repository layer.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// `PostgreSQL`-backed store implementing all repository traits.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a store over an existing connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Build a `LIKE`/`ILIKE` substring pattern, escaping wildcard characters
/// in the user-supplied term.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("abc"), "%abc%");
        assert_eq!(like_pattern("50%"), "%50\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
    }
}
