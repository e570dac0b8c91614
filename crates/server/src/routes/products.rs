//! Storefront product page handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use techstore_core::ProductId;

use crate::error::{AppError, Result};
use crate::filters;
use crate::models::product::Product;
use crate::services::ProductService;
use crate::state::AppState;

/// Query parameters for the product listing page.
#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    pub q: Option<String>,
    pub category: Option<String>,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<Product>,
    pub query: String,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: Product,
}

/// Display the product listing, optionally filtered by search term or
/// category. Only active products are shown.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<ProductsIndexTemplate> {
    let service = ProductService::new(state.store());

    let (products, term) = match (query.q, query.category) {
        (Some(term), _) => (service.search(&term).await?, term),
        (None, Some(category)) => (service.by_category(&category).await?, String::new()),
        (None, None) => (service.list_active().await?, String::new()),
    };

    Ok(ProductsIndexTemplate {
        products,
        query: term,
    })
}

/// Display a product's detail page. Inactive products are not shown.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<ProductShowTemplate> {
    let service = ProductService::new(state.store());
    let product = service.get(id).await?;

    if !product.active {
        return Err(AppError::NotFound(format!("product {id}")));
    }

    Ok(ProductShowTemplate { product })
}
