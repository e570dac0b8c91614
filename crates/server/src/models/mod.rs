//! Domain types and API shapes.
//!
//! Domain structs mirror the relational schema; request/response shapes are
//! kept separate so that what goes over the wire is an explicit decision.
//! Notably, [`customer::Customer`] carries the password hash and therefore
//! does not implement `Serialize` - only the hash-free
//! [`customer::CustomerResponse`] does.

pub mod cart;
pub mod customer;
pub mod order;
pub mod product;

pub use cart::{AddCartItem, CartItem, UpdateCartItem};
pub use customer::{
    CreateCustomer, Customer, CustomerResponse, NewCustomer, UpdateCustomer,
};
pub use order::{NewOrderLine, Order, OrderLine, OrderWithLines, PlaceOrder};
pub use product::{NewProduct, Product, ProductInput};
