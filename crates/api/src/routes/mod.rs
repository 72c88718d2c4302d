pub mod health;
pub mod product;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                          greeting
/// /products                  list
/// /product                   create (multipart)
/// /product/{id}              get
/// /product/{id}/image        image bytes
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(product::router())
}
