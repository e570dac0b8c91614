//! Cart and checkout: quantity folding, price snapshots, fail-closed
//! stock reservation, and order status updates.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use techstore_core::OrderStatus;
use techstore_integration_tests::{new_customer, product};
use techstore_server::db::MemoryStore;
use techstore_server::services::{
    CartService, CustomerService, OrderService, ProductService, ServiceError,
};

struct Fixture {
    customers: CustomerService<MemoryStore>,
    products: ProductService<MemoryStore>,
    cart: CartService<MemoryStore>,
    orders: OrderService<MemoryStore>,
}

fn fixture() -> Fixture {
    let store = MemoryStore::new();
    Fixture {
        customers: CustomerService::new(store.clone()),
        products: ProductService::new(store.clone()),
        cart: CartService::new(store.clone()),
        orders: OrderService::new(store),
    }
}

#[tokio::test]
async fn adding_same_product_folds_into_quantity() {
    let f = fixture();
    let customer = f
        .customers
        .create(new_customer("11111111", "ada@example.com"))
        .await
        .unwrap();
    let widget = f.products.create(product("Widget", 999, 10)).await.unwrap();

    let first = f.cart.add(customer.id, widget.id, 1).await.unwrap();
    assert_eq!(first.quantity, 1);

    let second = f.cart.add(customer.id, widget.id, 2).await.unwrap();
    assert_eq!(second.id, first.id);
    assert_eq!(second.quantity, 3);

    assert_eq!(f.cart.items(customer.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn cart_rejects_inactive_products_and_unknown_ids() {
    let f = fixture();
    let customer = f
        .customers
        .create(new_customer("11111111", "ada@example.com"))
        .await
        .unwrap();
    let widget = f.products.create(product("Widget", 999, 10)).await.unwrap();

    f.products.deactivate(widget.id).await.unwrap();
    assert!(matches!(
        f.cart.add(customer.id, widget.id, 1).await.unwrap_err(),
        ServiceError::Conflict(_)
    ));

    assert!(matches!(
        f.cart
            .add(customer.id, techstore_core::ProductId::generate(), 1)
            .await
            .unwrap_err(),
        ServiceError::NotFound
    ));

    assert!(matches!(
        f.cart
            .add(
                techstore_core::CustomerId::generate(),
                widget.id,
                1
            )
            .await
            .unwrap_err(),
        ServiceError::NotFound
    ));
}

#[tokio::test]
async fn placing_an_order_snapshots_prices_and_clears_the_cart() {
    let f = fixture();
    let customer = f
        .customers
        .create(new_customer("11111111", "ada@example.com"))
        .await
        .unwrap();
    let widget = f.products.create(product("Widget", 999, 10)).await.unwrap();
    let gadget = f.products.create(product("Gadget", 2500, 4)).await.unwrap();

    f.cart.add(customer.id, widget.id, 3).await.unwrap();
    f.cart.add(customer.id, gadget.id, 1).await.unwrap();

    let order = f
        .orders
        .place(customer.id, "1 Ship Lane".to_owned())
        .await
        .unwrap();

    // total = 3 x 9.99 + 1 x 25.00
    assert_eq!(order.total, Decimal::new(5497, 2));
    assert!(order.status.is_pending());
    assert_eq!(order.shipping_address, "1 Ship Lane");

    // Stock was decremented per line
    assert_eq!(f.products.get(widget.id).await.unwrap().stock, 7);
    assert_eq!(f.products.get(gadget.id).await.unwrap().stock, 3);

    // Cart is now empty
    assert!(f.cart.items(customer.id).await.unwrap().is_empty());

    // A later price change does not alter the snapshot or the total
    f.products
        .update(widget.id, product("Widget", 99_999, 7))
        .await
        .unwrap();

    let fetched = f.orders.get(order.id).await.unwrap();
    assert_eq!(fetched.order.total, Decimal::new(5497, 2));
    assert_eq!(fetched.lines.len(), 2);
    let widget_line = fetched
        .lines
        .iter()
        .find(|l| l.product_id == widget.id)
        .unwrap();
    assert_eq!(widget_line.unit_price.amount(), Decimal::new(999, 2));
}

#[tokio::test]
async fn insufficient_stock_fails_closed_and_restores_reservations() {
    let f = fixture();
    let customer = f
        .customers
        .create(new_customer("11111111", "ada@example.com"))
        .await
        .unwrap();
    let widget = f.products.create(product("Widget", 999, 10)).await.unwrap();
    let scarce = f.products.create(product("Scarce", 500, 1)).await.unwrap();

    f.cart.add(customer.id, widget.id, 2).await.unwrap();
    f.cart.add(customer.id, scarce.id, 5).await.unwrap();

    let err = f
        .orders
        .place(customer.id, "1 Ship Lane".to_owned())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));

    // The widget reservation was rolled back; nothing was decremented
    assert_eq!(f.products.get(widget.id).await.unwrap().stock, 10);
    assert_eq!(f.products.get(scarce.id).await.unwrap().stock, 1);

    // The cart is untouched so the customer can adjust and retry
    assert_eq!(f.cart.items(customer.id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn empty_cart_cannot_be_checked_out() {
    let f = fixture();
    let customer = f
        .customers
        .create(new_customer("11111111", "ada@example.com"))
        .await
        .unwrap();

    let err = f
        .orders
        .place(customer.id, "1 Ship Lane".to_owned())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    // Unknown customers get a not-found, not an empty-cart error
    assert!(matches!(
        f.orders
            .place(
                techstore_core::CustomerId::generate(),
                "1 Ship Lane".to_owned()
            )
            .await
            .unwrap_err(),
        ServiceError::NotFound
    ));
}

#[tokio::test]
async fn order_listing_and_status_updates() {
    let f = fixture();
    let customer = f
        .customers
        .create(new_customer("11111111", "ada@example.com"))
        .await
        .unwrap();
    let widget = f.products.create(product("Widget", 999, 10)).await.unwrap();

    f.cart.add(customer.id, widget.id, 1).await.unwrap();
    let order = f
        .orders
        .place(customer.id, "1 Ship Lane".to_owned())
        .await
        .unwrap();

    let listed = f.orders.list_for_customer(customer.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, order.id);

    f.orders
        .update_status(order.id, OrderStatus::new(OrderStatus::SHIPPED))
        .await
        .unwrap();
    let fetched = f.orders.get(order.id).await.unwrap();
    assert_eq!(fetched.order.status.as_str(), "Shipped");

    assert!(matches!(
        f.orders
            .update_status(
                techstore_core::OrderId::generate(),
                OrderStatus::new("Lost")
            )
            .await
            .unwrap_err(),
        ServiceError::NotFound
    ));
}

#[tokio::test]
async fn cart_item_updates_and_removal() {
    let f = fixture();
    let customer = f
        .customers
        .create(new_customer("11111111", "ada@example.com"))
        .await
        .unwrap();
    let widget = f.products.create(product("Widget", 999, 10)).await.unwrap();

    let item = f.cart.add(customer.id, widget.id, 1).await.unwrap();

    let updated = f.cart.update_quantity(item.id, 4).await.unwrap();
    assert_eq!(updated.quantity, 4);

    f.cart.remove(item.id).await.unwrap();
    assert!(matches!(
        f.cart.remove(item.id).await.unwrap_err(),
        ServiceError::NotFound
    ));

    // Clearing an empty cart is fine and reports zero removals
    assert_eq!(f.cart.clear(customer.id).await.unwrap(), 0);
}
