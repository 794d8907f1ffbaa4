//! GraphQL documents for the Shopify Admin API.
//!
//! Each operation is a static document paired with a typed `Variables`
//! struct and a typed response shape. Request values travel only through
//! GraphQL variables - identifiers and prices are never interpolated into
//! the document text, so no request value can change the query structure.

use pricelift_core::{Price, ProductId, VariantId};
use serde::{Deserialize, Serialize};

// =============================================================================
// Documents
// =============================================================================

/// Catalog listing page: first variant's id and price plus the listing
/// fields (type, vendor, tags, inventory).
pub const GET_PRODUCTS: &str = "\
query GetProducts($first: Int!, $after: String, $query: String) {
  products(first: $first, after: $after, query: $query) {
    pageInfo {
      hasNextPage
      endCursor
    }
    edges {
      node {
        id
        title
        productType
        vendor
        tags
        totalInventory
        variants(first: 1) {
          edges {
            node {
              id
              price
            }
          }
        }
      }
    }
  }
}";

/// Resolve a product's first (price-bearing) variant.
pub const GET_FIRST_VARIANT: &str = "\
query GetFirstVariant($id: ID!) {
  product(id: $id) {
    variants(first: 1) {
      edges {
        node {
          id
          price
        }
      }
    }
  }
}";

/// Resolve the product that owns a variant.
pub const GET_VARIANT_PRODUCT: &str = "\
query GetVariantProduct($id: ID!) {
  productVariant(id: $id) {
    id
    product {
      id
    }
  }
}";

/// Write one variant's price.
pub const PRODUCT_VARIANTS_BULK_UPDATE: &str = "\
mutation ProductVariantsBulkUpdate($productId: ID!, $variants: [ProductVariantsBulkInput!]!) {
  productVariantsBulkUpdate(productId: $productId, variants: $variants) {
    productVariants {
      id
      price
    }
    userErrors {
      field
      message
    }
  }
}";

// =============================================================================
// Variables
// =============================================================================

#[derive(Debug, Serialize)]
pub struct GetProductsVariables {
    pub first: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct IdVariables {
    pub id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkUpdateVariables {
    pub product_id: ProductId,
    pub variants: Vec<VariantPriceInput>,
}

/// One variant's new price, formatted as a two-decimal string.
#[derive(Debug, Serialize)]
pub struct VariantPriceInput {
    pub id: VariantId,
    pub price: String,
}

// =============================================================================
// Response shapes
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfoNode {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GetProductsData {
    pub products: ProductConnectionNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductConnectionNode {
    pub page_info: PageInfoNode,
    pub edges: Vec<Edge<ProductNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductNode {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub product_type: String,
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub total_inventory: i64,
    pub variants: VariantConnectionNode,
}

#[derive(Debug, Deserialize)]
pub struct VariantConnectionNode {
    pub edges: Vec<Edge<VariantNode>>,
}

#[derive(Debug, Deserialize)]
pub struct VariantNode {
    pub id: VariantId,
    pub price: Price,
}

#[derive(Debug, Deserialize)]
pub struct GetFirstVariantData {
    pub product: Option<ProductVariantsNode>,
}

#[derive(Debug, Deserialize)]
pub struct ProductVariantsNode {
    pub variants: VariantConnectionNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetVariantProductData {
    pub product_variant: Option<VariantProductNode>,
}

#[derive(Debug, Deserialize)]
pub struct VariantProductNode {
    pub id: VariantId,
    pub product: ProductRefNode,
}

#[derive(Debug, Deserialize)]
pub struct ProductRefNode {
    pub id: ProductId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkUpdateData {
    pub product_variants_bulk_update: Option<BulkUpdatePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkUpdatePayload {
    #[serde(default)]
    pub product_variants: Vec<VariantNode>,
    #[serde(default)]
    pub user_errors: Vec<UserErrorNode>,
}

#[derive(Debug, Deserialize)]
pub struct UserErrorNode {
    pub field: Option<Vec<String>>,
    pub message: String,
}

impl UserErrorNode {
    /// Format as `field.path: message` for error surfaces.
    #[must_use]
    pub fn display(&self) -> String {
        let field = self.field.as_ref().map_or_else(String::new, |f| f.join("."));
        format!("{}: {}", field, self.message)
    }
}
