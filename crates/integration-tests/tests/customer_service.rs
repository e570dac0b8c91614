//! Customer service behavior: creation uniqueness, authentication,
//! password management, and the orders guard on deletion.

#![allow(clippy::unwrap_used)]

use techstore_core::Email;
use techstore_integration_tests::{new_customer, product};
use techstore_server::db::MemoryStore;
use techstore_server::models::customer::{CustomerResponse, UpdateCustomer};
use techstore_server::services::{
    CartService, CustomerService, OrderService, ServiceError,
};

#[tokio::test]
async fn create_assigns_id_and_never_exposes_hash() {
    let service = CustomerService::new(MemoryStore::new());

    let created = service
        .create(new_customer("11111111", "ada@example.com"))
        .await
        .unwrap();

    // Stored hash is not the plaintext
    assert_ne!(created.password_hash, "a sufficiently long password");

    // The response shape carries no password material at all
    let json = serde_json::to_value(CustomerResponse::from(created)).unwrap();
    let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
    assert!(keys.iter().all(|k| !k.contains("password")));
}

#[tokio::test]
async fn create_rejects_duplicate_email_case_insensitively() {
    let service = CustomerService::new(MemoryStore::new());

    service
        .create(new_customer("11111111", "ada@example.com"))
        .await
        .unwrap();

    let err = service
        .create(new_customer("22222222", "ADA@Example.COM"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
}

#[tokio::test]
async fn create_rejects_duplicate_document() {
    let service = CustomerService::new(MemoryStore::new());

    service
        .create(new_customer("11111111", "ada@example.com"))
        .await
        .unwrap();

    let err = service
        .create(new_customer("11111111", "grace@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
}

#[tokio::test]
async fn authenticate_unknown_email_is_no_match_not_error() {
    let service = CustomerService::new(MemoryStore::new());

    let result = service.authenticate("a@b.com", "secret").await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn authenticate_roundtrip_after_create() {
    let service = CustomerService::new(MemoryStore::new());

    service
        .create(new_customer("11111111", "a@b.com"))
        .await
        .unwrap();

    // Correct credentials succeed
    let found = service
        .authenticate("a@b.com", "a sufficiently long password")
        .await
        .unwrap();
    assert!(found.is_some());

    // Wrong password is a no-match, indistinguishable from unknown email
    let wrong = service.authenticate("a@b.com", "wrong password").await.unwrap();
    assert!(wrong.is_none());
}

#[tokio::test]
async fn update_only_touches_profile_fields() {
    let service = CustomerService::new(MemoryStore::new());

    let created = service
        .create(new_customer("11111111", "ada@example.com"))
        .await
        .unwrap();

    let updated = service
        .update(
            created.id,
            UpdateCustomer {
                first_name: "Augusta".to_owned(),
                last_name: "King".to_owned(),
                address: "2 New Street".to_owned(),
                phone: "555-0000".to_owned(),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.first_name, "Augusta");
    assert_eq!(updated.address, "2 New Street");
    // Email, document, and hash are immutable through this path
    assert_eq!(updated.email, created.email);
    assert_eq!(updated.document, created.document);
    assert_eq!(updated.password_hash, created.password_hash);
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let service = CustomerService::new(MemoryStore::new());

    let err = service
        .update(
            techstore_core::CustomerId::generate(),
            UpdateCustomer {
                first_name: "Nobody".to_owned(),
                last_name: "Here".to_owned(),
                address: String::new(),
                phone: String::new(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound));
}

#[tokio::test]
async fn change_password_requires_current() {
    let service = CustomerService::new(MemoryStore::new());

    let created = service
        .create(new_customer("11111111", "ada@example.com"))
        .await
        .unwrap();

    // Wrong current password
    let err = service
        .change_password(created.id, "not the password", "a brand new password")
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    // Correct current password
    service
        .change_password(
            created.id,
            "a sufficiently long password",
            "a brand new password",
        )
        .await
        .unwrap();

    // Old password no longer authenticates, new one does
    assert!(
        service
            .authenticate("ada@example.com", "a sufficiently long password")
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        service
            .authenticate("ada@example.com", "a brand new password")
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn reset_password_by_email() {
    let service = CustomerService::new(MemoryStore::new());

    service
        .create(new_customer("11111111", "ada@example.com"))
        .await
        .unwrap();

    let email = Email::parse("ada@example.com").unwrap();
    assert!(service.reset_password(&email, "a replacement password").await.unwrap());

    assert!(
        service
            .authenticate("ada@example.com", "a replacement password")
            .await
            .unwrap()
            .is_some()
    );

    // Unknown email reports false, not an error
    let unknown = Email::parse("nobody@example.com").unwrap();
    assert!(!service.reset_password(&unknown, "whatever password").await.unwrap());
}

#[tokio::test]
async fn delete_blocked_while_orders_exist() {
    let store = MemoryStore::new();
    let customers = CustomerService::new(store.clone());
    let products =
        techstore_server::services::ProductService::new(store.clone());
    let cart = CartService::new(store.clone());
    let orders = OrderService::new(store.clone());

    let customer = customers
        .create(new_customer("11111111", "ada@example.com"))
        .await
        .unwrap();
    let widget = products.create(product("Widget", 999, 5)).await.unwrap();

    cart.add(customer.id, widget.id, 1).await.unwrap();
    orders
        .place(customer.id, "1 Test Street".to_owned())
        .await
        .unwrap();

    let err = customers.delete(customer.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));

    // The customer record still exists afterwards
    assert!(customers.get(customer.id).await.is_ok());
}

#[tokio::test]
async fn delete_without_orders_succeeds() {
    let service = CustomerService::new(MemoryStore::new());

    let created = service
        .create(new_customer("11111111", "ada@example.com"))
        .await
        .unwrap();

    service.delete(created.id).await.unwrap();
    assert!(matches!(
        service.get(created.id).await.unwrap_err(),
        ServiceError::NotFound
    ));

    // Deleting again reports not found
    assert!(matches!(
        service.delete(created.id).await.unwrap_err(),
        ServiceError::NotFound
    ));
}

#[tokio::test]
async fn search_is_case_insensitive_and_empty_term_lists_all() {
    let service = CustomerService::new(MemoryStore::new());

    service
        .create(new_customer("11111111", "ada@example.com"))
        .await
        .unwrap();
    service
        .create(new_customer("22222222", "grace@example.com"))
        .await
        .unwrap();

    // Substring match on email, any case
    let found = service.search("ADA").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].email.as_str(), "ada@example.com");

    // Document numbers are searchable too
    let by_document = service.search("2222").await.unwrap();
    assert_eq!(by_document.len(), 1);

    // Empty and whitespace-only terms return everything
    assert_eq!(service.search("").await.unwrap().len(), 2);
    assert_eq!(service.search("   ").await.unwrap().len(), 2);

    assert_eq!(service.count().await.unwrap(), 2);
}
