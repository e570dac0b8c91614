//! Home page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use crate::error::Result;
use crate::filters;
use crate::models::product::Product;
use crate::services::ProductService;
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub products: Vec<Product>,
}

/// Display the home page with the active product grid.
pub async fn home(State(state): State<AppState>) -> Result<HomeTemplate> {
    let service = ProductService::new(state.store());
    let products = service.list_active().await?;

    Ok(HomeTemplate { products })
}
