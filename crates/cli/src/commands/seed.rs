//! Seed the database with a demo catalog and customer.
//!
//! Inserts go through the service layer, so seeded data obeys the same
//! rules as data created over the API (hashed passwords, validated
//! prices). Re-running the command skips anything already present.

use rust_decimal::Decimal;
use secrecy::SecretString;
use tracing::info;

use techstore_core::{Document, Email, Price};
use techstore_server::db::{self, PgStore};
use techstore_server::models::customer::NewCustomer;
use techstore_server::models::product::NewProduct;
use techstore_server::services::{CustomerService, ProductService, ServiceError};

/// Demo products: name, description, price in cents, category, stock.
const DEMO_PRODUCTS: &[(&str, &str, i64, &str, i32)] = &[
    (
        "Mechanical Keyboard",
        "Tenkeyless mechanical keyboard with hot-swappable switches.",
        8999,
        "Peripherals",
        25,
    ),
    (
        "27\" 4K Monitor",
        "IPS panel, 60 Hz, factory calibrated.",
        32900,
        "Displays",
        10,
    ),
    (
        "USB-C Dock",
        "Dual-display dock with 96W power delivery.",
        14950,
        "Accessories",
        40,
    ),
    (
        "Wireless Mouse",
        "Ergonomic wireless mouse, 90-day battery life.",
        4599,
        "Peripherals",
        60,
    ),
];

/// Seed the database.
///
/// # Errors
///
/// Returns an error if environment variables are missing or database
/// operations fail.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("TECHSTORE_DATABASE_URL")
        .map(SecretString::from)
        .map_err(|_| "TECHSTORE_DATABASE_URL not set")?;

    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    let store = PgStore::new(pool);

    let products = ProductService::new(store.clone());
    let mut inserted = 0;
    for &(name, description, cents, category, stock) in DEMO_PRODUCTS {
        // Skip products that are already present (by name)
        let existing = products.search(name).await?;
        if existing.iter().any(|p| p.name == name) {
            continue;
        }

        products
            .create(NewProduct {
                name: name.to_owned(),
                description: description.to_owned(),
                price: Price::new(Decimal::new(cents, 2))?,
                category: category.to_owned(),
                image_url: String::new(),
                stock,
                active: true,
            })
            .await?;
        inserted += 1;
    }
    info!("Seeded {inserted} products");

    let customers = CustomerService::new(store);
    let demo = NewCustomer {
        document: Document::parse("10000001")?,
        first_name: "Demo".to_owned(),
        last_name: "Customer".to_owned(),
        email: Email::parse("demo@techstore.test")?,
        password: "demo-password".to_owned(),
        address: "1 Demo Street".to_owned(),
        phone: "555-0100".to_owned(),
    };
    match customers.create(demo).await {
        Ok(customer) => info!("Seeded demo customer {}", customer.email),
        Err(ServiceError::Conflict(_)) => info!("Demo customer already present"),
        Err(e) => return Err(e.into()),
    }

    info!("Seeding complete!");
    Ok(())
}
