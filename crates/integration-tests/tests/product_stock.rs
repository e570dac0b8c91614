//! Product CRUD and stock control: the conditional decrement, the
//! active-flag guards, and wholesale updates.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use techstore_core::Price;
use techstore_integration_tests::product;
use techstore_server::db::MemoryStore;
use techstore_server::services::{ProductService, ServiceError};

#[tokio::test]
async fn stock_walkthrough() {
    let service = ProductService::new(MemoryStore::new());

    // {name:"Widget", price:9.99, stock:5, active:true}
    let widget = service.create(product("Widget", 999, 5)).await.unwrap();
    assert!(widget.active);

    assert!(service.reduce_stock(widget.id, 3).await.unwrap());
    assert_eq!(service.get(widget.id).await.unwrap().stock, 2);

    // Second reduction exceeds remaining stock: refused, stock unchanged
    assert!(!service.reduce_stock(widget.id, 3).await.unwrap());
    assert_eq!(service.get(widget.id).await.unwrap().stock, 2);

    assert!(service.increase_stock(widget.id, 10).await.unwrap());
    assert_eq!(service.get(widget.id).await.unwrap().stock, 12);
}

#[tokio::test]
async fn reduce_to_exactly_zero_is_allowed() {
    let service = ProductService::new(MemoryStore::new());
    let widget = service.create(product("Widget", 999, 5)).await.unwrap();

    assert!(service.reduce_stock(widget.id, 5).await.unwrap());
    assert_eq!(service.get(widget.id).await.unwrap().stock, 0);

    // Nothing left to take
    assert!(!service.reduce_stock(widget.id, 1).await.unwrap());
}

#[tokio::test]
async fn stock_operations_refuse_unknown_product() {
    let service = ProductService::new(MemoryStore::new());
    let ghost = techstore_core::ProductId::generate();

    assert!(!service.reduce_stock(ghost, 1).await.unwrap());
    assert!(!service.increase_stock(ghost, 1).await.unwrap());
}

#[tokio::test]
async fn stock_operations_reject_non_positive_quantities() {
    let service = ProductService::new(MemoryStore::new());
    let widget = service.create(product("Widget", 999, 5)).await.unwrap();

    assert!(matches!(
        service.reduce_stock(widget.id, 0).await.unwrap_err(),
        ServiceError::Validation(_)
    ));
    assert!(matches!(
        service.increase_stock(widget.id, -2).await.unwrap_err(),
        ServiceError::Validation(_)
    ));
    assert_eq!(service.get(widget.id).await.unwrap().stock, 5);
}

#[tokio::test]
async fn deactivated_product_refuses_stock_movements() {
    let service = ProductService::new(MemoryStore::new());
    let widget = service.create(product("Widget", 999, 5)).await.unwrap();

    assert!(service.deactivate(widget.id).await.unwrap());

    assert!(!service.reduce_stock(widget.id, 1).await.unwrap());
    assert!(!service.increase_stock(widget.id, 1).await.unwrap());
    assert_eq!(service.get(widget.id).await.unwrap().stock, 5);

    // Reactivation restores normal behavior
    assert!(service.reactivate(widget.id).await.unwrap());
    assert!(service.reduce_stock(widget.id, 1).await.unwrap());
    assert_eq!(service.get(widget.id).await.unwrap().stock, 4);
}

#[tokio::test]
async fn search_and_listing_hide_inactive_products() {
    let service = ProductService::new(MemoryStore::new());

    let widget = service.create(product("Widget", 999, 5)).await.unwrap();
    service.create(product("Gadget", 1999, 3)).await.unwrap();

    service.deactivate(widget.id).await.unwrap();

    // Search only sees active products (case-insensitive)
    assert!(service.search("widget").await.unwrap().is_empty());
    assert_eq!(service.search("GADGET").await.unwrap().len(), 1);

    // Active listing hides it; the full catalog still shows it
    assert_eq!(service.list_active().await.unwrap().len(), 1);
    assert_eq!(service.list().await.unwrap().len(), 2);

    // Empty search term returns all active products
    assert_eq!(service.search("").await.unwrap().len(), 1);
}

#[tokio::test]
async fn update_overwrites_every_field_wholesale() {
    let service = ProductService::new(MemoryStore::new());
    let widget = service.create(product("Widget", 999, 5)).await.unwrap();

    let mut fields = product("Widget Pro", 1299, 8);
    fields.description = "New description".to_owned();
    fields.category = "Upgrades".to_owned();
    fields.active = false;

    let updated = service.update(widget.id, fields).await.unwrap().unwrap();
    assert_eq!(updated.name, "Widget Pro");
    assert_eq!(updated.price, Price::new(Decimal::new(1299, 2)).unwrap());
    assert_eq!(updated.stock, 8);
    assert!(!updated.active);
    // Identity and creation timestamp are untouched
    assert_eq!(updated.id, widget.id);
    assert_eq!(updated.created_at, widget.created_at);

    // Unknown id is an absent result, not an error
    let missing = service
        .update(techstore_core::ProductId::generate(), product("X", 1, 1))
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn delete_reports_existence() {
    let service = ProductService::new(MemoryStore::new());
    let widget = service.create(product("Widget", 999, 5)).await.unwrap();

    assert!(service.delete(widget.id).await.unwrap());
    assert!(!service.delete(widget.id).await.unwrap());
    assert!(matches!(
        service.get(widget.id).await.unwrap_err(),
        ServiceError::NotFound
    ));
}

#[tokio::test]
async fn category_listing_is_restricted_to_active() {
    let service = ProductService::new(MemoryStore::new());

    let a = service.create(product("Widget", 999, 5)).await.unwrap();
    service.create(product("Gadget", 1999, 3)).await.unwrap();
    service.deactivate(a.id).await.unwrap();

    let in_category = service.by_category("Test").await.unwrap();
    assert_eq!(in_category.len(), 1);
    assert_eq!(in_category[0].name, "Gadget");
}
