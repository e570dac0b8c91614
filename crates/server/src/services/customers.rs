//! Customer service: CRUD plus authentication.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use techstore_core::{CustomerId, Email};

use super::ServiceError;
use crate::db::customers::{CustomerDeletion, CustomerRepository, NewCustomerRecord};
use crate::models::customer::{Customer, NewCustomer, UpdateCustomer};
use crate::validate::ValidationErrors;

/// Customer service.
///
/// Enforces email/document uniqueness on creation, blocks deletion of
/// customers with orders, and owns password hashing and verification.
pub struct CustomerService<R> {
    customers: R,
}

impl<R: CustomerRepository> CustomerService<R> {
    /// Create a new customer service over a repository.
    pub const fn new(customers: R) -> Self {
        Self { customers }
    }

    /// All customers.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn list(&self) -> Result<Vec<Customer>, ServiceError> {
        Ok(self.customers.list().await?)
    }

    /// Look up a customer by id.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the id is unknown.
    pub async fn get(&self, id: CustomerId) -> Result<Customer, ServiceError> {
        self.customers.get(id).await?.ok_or(ServiceError::NotFound)
    }

    /// Case-insensitive substring search over name, surname, email, and
    /// document. An empty or whitespace-only term returns the full list.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn search(&self, term: &str) -> Result<Vec<Customer>, ServiceError> {
        let term = term.trim();
        if term.is_empty() {
            return self.list().await;
        }

        Ok(self.customers.search(term).await?)
    }

    /// Total number of customers.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn count(&self) -> Result<i64, ServiceError> {
        Ok(self.customers.count().await?)
    }

    /// Register a new customer.
    ///
    /// The plaintext password is hashed with Argon2id; only the hash is
    /// persisted. Id and creation timestamp are assigned by the store.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Conflict` if the email (case-insensitive) or
    /// document is already registered. The pre-checks give precise
    /// messages; the store's unique indexes make the answer authoritative
    /// when two creates race.
    pub async fn create(&self, new: NewCustomer) -> Result<Customer, ServiceError> {
        if self.customers.email_exists(&new.email).await? {
            return Err(ServiceError::Conflict("email already registered".to_owned()));
        }
        if self.customers.document_exists(&new.document).await? {
            return Err(ServiceError::Conflict(
                "document already registered".to_owned(),
            ));
        }

        let password_hash = hash_password(&new.password)?;

        let customer = self
            .customers
            .insert(NewCustomerRecord {
                document: new.document,
                first_name: new.first_name,
                last_name: new.last_name,
                email: new.email,
                password_hash,
                address: new.address,
                phone: new.phone,
            })
            .await?;

        Ok(customer)
    }

    /// Update a customer's profile fields (name, surname, address, phone).
    ///
    /// Email, document, and password hash are immutable through this path.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the id is unknown.
    pub async fn update(
        &self,
        id: CustomerId,
        update: UpdateCustomer,
    ) -> Result<Customer, ServiceError> {
        self.customers
            .update_profile(id, &update)
            .await?
            .ok_or(ServiceError::NotFound)
    }

    /// Delete a customer.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the id is unknown and
    /// `ServiceError::Conflict` if the customer has placed orders. The
    /// orders check and the delete run as one unit in the store.
    pub async fn delete(&self, id: CustomerId) -> Result<(), ServiceError> {
        match self.customers.delete(id).await? {
            CustomerDeletion::Deleted => Ok(()),
            CustomerDeletion::HasOrders => Err(ServiceError::Conflict(
                "customer has orders and cannot be deleted".to_owned(),
            )),
            CustomerDeletion::NotFound => Err(ServiceError::NotFound),
        }
    }

    /// Authenticate by email and password.
    ///
    /// Returns `Ok(None)` - not an error - when the email is unknown or the
    /// password does not verify. The presented password is hashed even when
    /// the email is unknown, so the two cases cost the same and timing does
    /// not reveal which one occurred.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Customer>, ServiceError> {
        if email.trim().is_empty() || password.is_empty() {
            return Ok(None);
        }

        let Ok(email) = Email::parse(email) else {
            return Ok(None);
        };

        let Some(customer) = self.customers.get_by_email(&email).await? else {
            let _ = hash_password(password);
            return Ok(None);
        };

        if !verify_password(password, &customer.password_hash) {
            return Ok(None);
        }

        Ok(Some(customer))
    }

    /// Change a customer's password after verifying the current one.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the id is unknown and
    /// `ServiceError::Validation` if the current password does not verify.
    pub async fn change_password(
        &self,
        id: CustomerId,
        current: &str,
        new: &str,
    ) -> Result<(), ServiceError> {
        let customer = self.get(id).await?;

        if !verify_password(current, &customer.password_hash) {
            return Err(ServiceError::Validation(ValidationErrors::single(
                "current_password",
                "current password is not correct",
            )));
        }

        let password_hash = hash_password(new)?;
        if !self.customers.update_password_hash(id, &password_hash).await? {
            return Err(ServiceError::NotFound);
        }

        Ok(())
    }

    /// Replace a customer's password by email, without the current one.
    ///
    /// Returns `false` if no customer is registered under the email.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn reset_password(
        &self,
        email: &Email,
        new_password: &str,
    ) -> Result<bool, ServiceError> {
        let Some(customer) = self.customers.get_by_email(email).await? else {
            return Ok(false);
        };

        let password_hash = hash_password(new_password)?;
        Ok(self
            .customers
            .update_password_hash(customer.id, &password_hash)
            .await?)
    }
}

/// Hash a password using Argon2id.
///
/// The PHC output string embeds the algorithm, salt, and cost parameters,
/// so verification needs no external configuration.
fn hash_password(password: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| ServiceError::PasswordHash)
}

/// Verify a password against a stored PHC hash string.
fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("hunter22").unwrap();
        assert_ne!(hash, "hunter22");
        // PHC format is self-describing
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("hunter22", &hash));
        assert!(!verify_password("hunter23", &hash));
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same password").unwrap();
        let b = hash_password("same password").unwrap();
        assert_ne!(a, b);
    }
}
