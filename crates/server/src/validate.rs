//! Explicit input validation.
//!
//! One validation function per input shape, invoked by the route handlers
//! before anything reaches a service. Each returns either the parsed,
//! typed input or a structured list of field/message pairs that the error
//! layer renders as a 400 response.

use serde::Serialize;

use techstore_core::{Document, Email, Price};

use crate::models::cart::{AddCartItem, UpdateCartItem};
use crate::models::customer::{CreateCustomer, NewCustomer, UpdateCustomer};
use crate::models::order::PlaceOrder;
use crate::models::product::{NewProduct, ProductInput};

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;
/// Maximum password length.
pub const MAX_PASSWORD_LENGTH: usize = 100;

const MAX_NAME_LENGTH: usize = 50;
const MAX_EMAIL_LENGTH: usize = 100;
const MAX_ADDRESS_LENGTH: usize = 200;
const MAX_PHONE_LENGTH: usize = 20;
const MAX_PRODUCT_NAME_LENGTH: usize = 100;
const MAX_CATEGORY_LENGTH: usize = 50;

/// A single field-level validation failure.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    /// Name of the offending input field.
    pub field: &'static str,
    /// Human-readable description of the violation.
    pub message: String,
}

/// All validation failures for one input shape.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// A single-failure list, for rules checked outside the boundary
    /// functions (e.g. a current-password mismatch).
    #[must_use]
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.push(field, message);
        errors
    }

    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Whether any failure was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The recorded failures.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for err in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", err.field, err.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

fn check_required(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    max: usize,
) {
    if value.trim().is_empty() {
        errors.push(field, format!("{field} is required"));
    } else if value.len() > max {
        errors.push(field, format!("{field} must be at most {max} characters"));
    }
}

fn check_length(errors: &mut ValidationErrors, field: &'static str, value: &str, max: usize) {
    if value.len() > max {
        errors.push(field, format!("{field} must be at most {max} characters"));
    }
}

fn check_password(errors: &mut ValidationErrors, field: &'static str, value: &str) {
    if value.len() < MIN_PASSWORD_LENGTH {
        errors.push(
            field,
            format!("password must be at least {MIN_PASSWORD_LENGTH} characters"),
        );
    } else if value.len() > MAX_PASSWORD_LENGTH {
        errors.push(
            field,
            format!("password must be at most {MAX_PASSWORD_LENGTH} characters"),
        );
    }
}

/// Validate a customer-creation payload and parse it into typed input.
///
/// # Errors
///
/// Returns the collected field errors if any constraint is violated.
pub fn create_customer(input: CreateCustomer) -> Result<NewCustomer, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let document = match Document::parse(&input.document) {
        Ok(document) => Some(document),
        Err(e) => {
            errors.push("document", e.to_string());
            None
        }
    };

    check_required(&mut errors, "first_name", &input.first_name, MAX_NAME_LENGTH);
    check_required(&mut errors, "last_name", &input.last_name, MAX_NAME_LENGTH);

    let email = if input.email.len() > MAX_EMAIL_LENGTH {
        errors.push(
            "email",
            format!("email must be at most {MAX_EMAIL_LENGTH} characters"),
        );
        None
    } else {
        match Email::parse(&input.email) {
            Ok(email) => Some(email),
            Err(e) => {
                errors.push("email", e.to_string());
                None
            }
        }
    };

    check_password(&mut errors, "password", &input.password);
    check_length(&mut errors, "address", &input.address, MAX_ADDRESS_LENGTH);
    check_length(&mut errors, "phone", &input.phone, MAX_PHONE_LENGTH);

    match (document, email, errors.is_empty()) {
        (Some(document), Some(email), true) => Ok(NewCustomer {
            document,
            first_name: input.first_name,
            last_name: input.last_name,
            email,
            password: input.password,
            address: input.address,
            phone: input.phone,
        }),
        _ => Err(errors),
    }
}

/// Validate a customer-update payload.
///
/// # Errors
///
/// Returns the collected field errors if any constraint is violated.
pub fn update_customer(input: &UpdateCustomer) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    check_required(&mut errors, "first_name", &input.first_name, MAX_NAME_LENGTH);
    check_required(&mut errors, "last_name", &input.last_name, MAX_NAME_LENGTH);
    check_length(&mut errors, "address", &input.address, MAX_ADDRESS_LENGTH);
    check_length(&mut errors, "phone", &input.phone, MAX_PHONE_LENGTH);

    errors.into_result()
}

/// Validate a password-change payload.
///
/// # Errors
///
/// Returns the collected field errors if the new password is out of bounds.
pub fn change_password(new_password: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    check_password(&mut errors, "new_password", new_password);
    errors.into_result()
}

/// Validate a product payload (create or wholesale update) and parse it
/// into typed fields. `active` defaults to true when omitted.
///
/// # Errors
///
/// Returns the collected field errors if any constraint is violated.
pub fn product(input: ProductInput) -> Result<NewProduct, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    check_required(&mut errors, "name", &input.name, MAX_PRODUCT_NAME_LENGTH);
    check_length(&mut errors, "category", &input.category, MAX_CATEGORY_LENGTH);

    let price = match Price::new(input.price) {
        Ok(price) => Some(price),
        Err(e) => {
            errors.push("price", e.to_string());
            None
        }
    };

    if input.stock < 0 {
        errors.push("stock", "stock cannot be negative");
    }

    match (price, errors.is_empty()) {
        (Some(price), true) => Ok(NewProduct {
            name: input.name,
            description: input.description,
            price,
            category: input.category,
            image_url: input.image_url,
            stock: input.stock,
            active: input.active.unwrap_or(true),
        }),
        _ => Err(errors),
    }
}

/// Validate an add-to-cart payload, returning the effective quantity
/// (default 1).
///
/// # Errors
///
/// Returns a field error if the quantity is not positive.
pub fn add_cart_item(input: &AddCartItem) -> Result<i32, ValidationErrors> {
    let quantity = input.quantity.unwrap_or(1);
    let mut errors = ValidationErrors::default();

    if quantity <= 0 {
        errors.push("quantity", "quantity must be positive");
    }

    errors.into_result().map(|()| quantity)
}

/// Validate a cart-quantity update.
///
/// # Errors
///
/// Returns a field error if the quantity is not positive.
pub fn update_cart_item(input: &UpdateCartItem) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if input.quantity <= 0 {
        errors.push("quantity", "quantity must be positive");
    }

    errors.into_result()
}

/// Validate an order-placement payload.
///
/// # Errors
///
/// Returns a field error if the shipping address is missing or too long.
pub fn place_order(input: &PlaceOrder) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    check_required(
        &mut errors,
        "shipping_address",
        &input.shipping_address,
        MAX_ADDRESS_LENGTH,
    );

    errors.into_result()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn valid_create() -> CreateCustomer {
        CreateCustomer {
            document: "12345678".to_owned(),
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            password: "correct horse".to_owned(),
            address: "12 Analytical St".to_owned(),
            phone: "555-0100".to_owned(),
        }
    }

    #[test]
    fn test_create_customer_valid() {
        let new = create_customer(valid_create()).unwrap();
        assert_eq!(new.email.as_str(), "ada@example.com");
        assert_eq!(new.document.as_str(), "12345678");
    }

    #[test]
    fn test_create_customer_collects_all_errors() {
        let input = CreateCustomer {
            document: String::new(),
            first_name: String::new(),
            last_name: "x".repeat(60),
            email: "not-an-email".to_owned(),
            password: "short".to_owned(),
            address: String::new(),
            phone: String::new(),
        };

        let errors = create_customer(input).unwrap_err();
        let fields: Vec<_> = errors.errors().iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            ["document", "first_name", "last_name", "email", "password"]
        );
    }

    #[test]
    fn test_create_customer_email_too_long() {
        let mut input = valid_create();
        input.email = format!("{}@example.com", "a".repeat(100));
        let errors = create_customer(input).unwrap_err();
        assert_eq!(errors.errors().len(), 1);
        assert_eq!(errors.errors()[0].field, "email");
    }

    #[test]
    fn test_product_rejects_negative_price_and_stock() {
        let input = ProductInput {
            name: "Widget".to_owned(),
            description: String::new(),
            price: Decimal::new(-100, 2),
            category: String::new(),
            image_url: String::new(),
            stock: -1,
            active: None,
        };

        let errors = product(input).unwrap_err();
        let fields: Vec<_> = errors.errors().iter().map(|e| e.field).collect();
        assert_eq!(fields, ["price", "stock"]);
    }

    #[test]
    fn test_product_active_defaults_true() {
        let input = ProductInput {
            name: "Widget".to_owned(),
            description: String::new(),
            price: Decimal::new(999, 2),
            category: String::new(),
            image_url: String::new(),
            stock: 5,
            active: None,
        };

        assert!(product(input).unwrap().active);
    }

    #[test]
    fn test_add_cart_item_defaults_to_one() {
        let input = AddCartItem {
            product_id: techstore_core::ProductId::generate(),
            quantity: None,
        };
        assert_eq!(add_cart_item(&input).unwrap(), 1);
    }

    #[test]
    fn test_add_cart_item_rejects_zero() {
        let input = AddCartItem {
            product_id: techstore_core::ProductId::generate(),
            quantity: Some(0),
        };
        assert!(add_cart_item(&input).is_err());
    }
}
