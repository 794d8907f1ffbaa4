//! Domain-facing types returned by the Admin API client.

use pricelift_core::{Price, ProductId, VariantId};
use serde::Serialize;

/// A product as shown in the catalog listing.
///
/// Read-only projection fetched at the start of an edit session; it is held
/// in memory for the duration of the edit-and-preview flow and never
/// persisted. `variant_id`/`price` come from the product's first variant
/// and are absent when the product has no variant, in which case the
/// product is excluded from price updates.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    pub id: ProductId,
    pub title: String,
    pub product_type: String,
    pub vendor: String,
    pub tags: Vec<String>,
    pub total_inventory: i64,
    pub variant_id: Option<VariantId>,
    pub price: Option<Price>,
}

/// A price-bearing variant resolved for a product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantInfo {
    pub id: VariantId,
    pub price: Price,
}

/// Cursor-based pagination info.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// One page of catalog products.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductConnection {
    pub products: Vec<CatalogProduct>,
    pub page_info: PageInfo,
}
