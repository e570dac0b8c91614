//! Customer repository.

use async_trait::async_trait;

use techstore_core::{CustomerId, Document, Email};

use super::{PgStore, RepositoryError, like_pattern};
use crate::models::customer::{Customer, UpdateCustomer};

const COLUMNS: &str =
    "id, document, first_name, last_name, email, password_hash, address, phone, created_at";

/// Fields persisted when creating a customer. The password arrives here
/// already hashed; id and creation timestamp are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewCustomerRecord {
    pub document: Document,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub password_hash: String,
    pub address: String,
    pub phone: String,
}

/// Outcome of a customer deletion attempt.
///
/// The existence check and the delete execute as one unit: the store only
/// removes a customer that has no orders, so a concurrently placed order
/// cannot slip past the check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerDeletion {
    /// The customer was removed.
    Deleted,
    /// The customer exists but has at least one order; nothing was removed.
    HasOrders,
    /// No customer with that id exists.
    NotFound,
}

/// Repository for customer records.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// All customers, ordered by name.
    async fn list(&self) -> Result<Vec<Customer>, RepositoryError>;

    /// Look up a customer by id.
    async fn get(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError>;

    /// Look up a customer by email, case-insensitively.
    async fn get_by_email(&self, email: &Email) -> Result<Option<Customer>, RepositoryError>;

    /// Look up a customer by document number.
    async fn get_by_document(
        &self,
        document: &Document,
    ) -> Result<Option<Customer>, RepositoryError>;

    /// Whether any customer is registered under this email (case-insensitive).
    async fn email_exists(&self, email: &Email) -> Result<bool, RepositoryError>;

    /// Whether any customer is registered under this document number.
    async fn document_exists(&self, document: &Document) -> Result<bool, RepositoryError>;

    /// Total number of customers.
    async fn count(&self) -> Result<i64, RepositoryError>;

    /// Case-insensitive substring search over name, surname, email, and
    /// document.
    async fn search(&self, term: &str) -> Result<Vec<Customer>, RepositoryError>;

    /// Persist a new customer.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Conflict`] if the email or document is
    /// already registered (enforced by unique indexes, so this holds even
    /// when two creates race).
    async fn insert(&self, record: NewCustomerRecord) -> Result<Customer, RepositoryError>;

    /// Overwrite the mutable profile fields (name, surname, address, phone).
    ///
    /// Email, document, and password hash are immutable through this path.
    /// Returns `None` if the customer does not exist.
    async fn update_profile(
        &self,
        id: CustomerId,
        update: &UpdateCustomer,
    ) -> Result<Option<Customer>, RepositoryError>;

    /// Replace the stored password hash. Returns `false` if the customer
    /// does not exist.
    async fn update_password_hash(
        &self,
        id: CustomerId,
        password_hash: &str,
    ) -> Result<bool, RepositoryError>;

    /// Delete the customer unless they have orders.
    async fn delete(&self, id: CustomerId) -> Result<CustomerDeletion, RepositoryError>;
}

#[async_trait]
impl CustomerRepository for PgStore {
    async fn list(&self) -> Result<Vec<Customer>, RepositoryError> {
        let customers = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {COLUMNS} FROM customers ORDER BY last_name, first_name"
        ))
        .fetch_all(self.pool())
        .await?;

        Ok(customers)
    }

    async fn get(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let customer =
            sqlx::query_as::<_, Customer>(&format!("SELECT {COLUMNS} FROM customers WHERE id = $1"))
                .bind(id)
                .fetch_optional(self.pool())
                .await?;

        Ok(customer)
    }

    async fn get_by_email(&self, email: &Email) -> Result<Option<Customer>, RepositoryError> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {COLUMNS} FROM customers WHERE lower(email) = $1"
        ))
        .bind(email.normalized())
        .fetch_optional(self.pool())
        .await?;

        Ok(customer)
    }

    async fn get_by_document(
        &self,
        document: &Document,
    ) -> Result<Option<Customer>, RepositoryError> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {COLUMNS} FROM customers WHERE document = $1"
        ))
        .bind(document)
        .fetch_optional(self.pool())
        .await?;

        Ok(customer)
    }

    async fn email_exists(&self, email: &Email) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM customers WHERE lower(email) = $1)",
        )
        .bind(email.normalized())
        .fetch_one(self.pool())
        .await?;

        Ok(exists)
    }

    async fn document_exists(&self, document: &Document) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM customers WHERE document = $1)",
        )
        .bind(document)
        .fetch_one(self.pool())
        .await?;

        Ok(exists)
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customers")
            .fetch_one(self.pool())
            .await?;

        Ok(count)
    }

    async fn search(&self, term: &str) -> Result<Vec<Customer>, RepositoryError> {
        let pattern = like_pattern(term);
        let customers = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {COLUMNS} FROM customers \
             WHERE first_name ILIKE $1 OR last_name ILIKE $1 \
                OR email ILIKE $1 OR document ILIKE $1 \
             ORDER BY last_name, first_name"
        ))
        .bind(&pattern)
        .fetch_all(self.pool())
        .await?;

        Ok(customers)
    }

    async fn insert(&self, record: NewCustomerRecord) -> Result<Customer, RepositoryError> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "INSERT INTO customers \
                 (document, first_name, last_name, email, password_hash, address, phone) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        ))
        .bind(&record.document)
        .bind(&record.first_name)
        .bind(&record.last_name)
        .bind(&record.email)
        .bind(&record.password_hash)
        .bind(&record.address)
        .bind(&record.phone)
        .fetch_one(self.pool())
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                let message = match db_err.constraint() {
                    Some("customers_document_key") => "document already registered",
                    Some("customers_email_lower_idx") => "email already registered",
                    _ => "customer already exists",
                };
                return RepositoryError::Conflict(message.to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(customer)
    }

    async fn update_profile(
        &self,
        id: CustomerId,
        update: &UpdateCustomer,
    ) -> Result<Option<Customer>, RepositoryError> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "UPDATE customers \
             SET first_name = $2, last_name = $3, address = $4, phone = $5 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.address)
        .bind(&update.phone)
        .fetch_optional(self.pool())
        .await?;

        Ok(customer)
    }

    async fn update_password_hash(
        &self,
        id: CustomerId,
        password_hash: &str,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE customers SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: CustomerId) -> Result<CustomerDeletion, RepositoryError> {
        // The orders check and the delete are one statement; the restrictive
        // foreign key on orders.customer_id backs it at the schema level.
        let result = sqlx::query(
            "DELETE FROM customers \
             WHERE id = $1 \
               AND NOT EXISTS (SELECT 1 FROM orders WHERE customer_id = $1)",
        )
        .bind(id)
        .execute(self.pool())
        .await?;

        if result.rows_affected() > 0 {
            return Ok(CustomerDeletion::Deleted);
        }

        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM customers WHERE id = $1)")
                .bind(id)
                .fetch_one(self.pool())
                .await?;

        Ok(if exists {
            CustomerDeletion::HasOrders
        } else {
            CustomerDeletion::NotFound
        })
    }
}
