//! Product catalog listing.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    error::AppError,
    shopify::types::{CatalogProduct, PageInfo},
    state::AppState,
};

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/products", get(list_products))
}

/// Pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    pub cursor: Option<String>,
    pub query: Option<String>,
    pub first: Option<i64>,
}

/// One page of the catalog.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsResponse {
    pub products: Vec<CatalogProduct>,
    pub page_info: PageInfo,
}

/// List products for the edit session snapshot.
///
/// # Errors
///
/// Returns an error if the Admin API request fails.
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<ProductsResponse>, AppError> {
    let first = query.first.unwrap_or(50).clamp(1, 250);

    let connection = state
        .shopify()
        .get_products(first, query.cursor, query.query)
        .await?;

    Ok(Json(ProductsResponse {
        products: connection.products,
        page_info: connection.page_info,
    }))
}
