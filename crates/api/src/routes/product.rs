//! Route definitions for the product catalog.
//!
//! Mounted at `/api` by `api_routes()`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::product;
use crate::state::AppState;

/// Product routes.
///
/// ```text
/// GET    /                     -> greeting
/// GET    /products             -> list_products
/// POST   /product              -> add_product
/// GET    /product/{id}         -> get_product
/// GET    /product/{id}/image   -> get_product_image
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(product::greeting))
        .route("/products", get(product::list_products))
        .route("/product", post(product::add_product))
        .route("/product/{id}", get(product::get_product))
        .route("/product/{id}/image", get(product::get_product_image))
}
