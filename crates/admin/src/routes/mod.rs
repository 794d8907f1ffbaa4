//! HTTP route handlers for the admin API.

pub mod bulk_edit;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Build the API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(products::router())
        .merge(bulk_edit::router())
}
