//! Shopify Admin API GraphQL client.
//!
//! This module provides a typed client for the Admin API operations the
//! bulk price editor needs: paging the catalog, resolving a product's
//! price-bearing variant, and writing a variant's price.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::instrument;

use async_trait::async_trait;
use pricelift_core::{Price, ProductId, VariantId};

use crate::config::ShopifyAdminConfig;
use crate::services::bulk_update::{MutationError, PriceMutation};

use super::{
    AdminShopifyError, GraphQLError, GraphQLErrorLocation,
    types::{CatalogProduct, PageInfo, ProductConnection, VariantInfo},
};

pub mod queries;

use queries::{
    BulkUpdateData, BulkUpdateVariables, GetFirstVariantData, GetProductsData,
    GetProductsVariables, GetVariantProductData, IdVariables, ProductNode, VariantPriceInput,
};

/// Shopify Admin API GraphQL client.
///
/// Provides typed access to the Admin API for reading the product catalog
/// and updating variant prices.
///
/// # Security
///
/// This client carries an access token with HIGH PRIVILEGE write access to
/// the store. Only use on trusted, network-restricted infrastructure.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    store: String,
    api_version: String,
    access_token: SecretString,
}

/// Request envelope: static document plus typed variables.
#[derive(Debug, Serialize)]
struct GraphQLRequest<V> {
    query: &'static str,
    variables: V,
}

/// GraphQL response wrapper.
#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLErrorResponse>>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorResponse {
    message: String,
    #[serde(default)]
    locations: Vec<GraphQLErrorLocationResponse>,
    #[serde(default)]
    path: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorLocationResponse {
    line: i64,
    column: i64,
}

impl AdminClient {
    /// Create a new Admin API client.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created. This should never
    /// happen under normal circumstances as we use standard TLS
    /// configuration.
    #[must_use]
    pub fn new(config: &ShopifyAdminConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            inner: Arc::new(AdminClientInner {
                client,
                store: config.store.clone(),
                api_version: config.api_version.clone(),
                access_token: config.access_token.clone(),
            }),
        }
    }

    /// Get the store domain.
    #[must_use]
    pub fn store(&self) -> &str {
        &self.inner.store
    }

    // =========================================================================
    // GraphQL Execution
    // =========================================================================

    /// Execute a GraphQL operation.
    async fn execute<V, T>(
        &self,
        document: &'static str,
        variables: V,
    ) -> Result<T, AdminShopifyError>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let endpoint = format!(
            "https://{}/admin/api/{}/graphql.json",
            self.inner.store, self.inner.api_version
        );

        let body = GraphQLRequest {
            query: document,
            variables,
        };

        let response = self
            .inner
            .client
            .post(&endpoint)
            .header(
                "X-Shopify-Access-Token",
                self.inner.access_token.expose_secret(),
            )
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        // Check for rate limiting
        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(AdminShopifyError::RateLimited(retry_after));
        }

        // Check for unauthorized
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AdminShopifyError::Unauthorized(
                "Invalid or expired access token".to_string(),
            ));
        }

        let graphql_response: GraphQLResponse<T> = response.json().await?;

        // Check for GraphQL errors
        if let Some(errors) = graphql_response.errors
            && !errors.is_empty()
        {
            let converted_errors: Vec<GraphQLError> = errors
                .into_iter()
                .map(|e| GraphQLError {
                    message: e.message,
                    locations: e
                        .locations
                        .into_iter()
                        .map(|l| GraphQLErrorLocation {
                            line: l.line,
                            column: l.column,
                        })
                        .collect(),
                    path: e.path,
                })
                .collect();
            return Err(AdminShopifyError::GraphQL(converted_errors));
        }

        graphql_response.data.ok_or_else(|| {
            AdminShopifyError::GraphQL(vec![GraphQLError {
                message: "No data in response".to_string(),
                locations: vec![],
                path: vec![],
            }])
        })
    }

    // =========================================================================
    // Catalog queries
    // =========================================================================

    /// Get one page of the product catalog.
    ///
    /// # Arguments
    ///
    /// * `first` - Number of products to return
    /// * `after` - Cursor for pagination
    /// * `query` - Optional search query
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error
    /// response.
    #[instrument(skip(self))]
    pub async fn get_products(
        &self,
        first: i64,
        after: Option<String>,
        query: Option<String>,
    ) -> Result<ProductConnection, AdminShopifyError> {
        let variables = GetProductsVariables {
            first,
            after,
            query,
        };

        let response: GetProductsData = self.execute(queries::GET_PRODUCTS, variables).await?;

        let products = response
            .products
            .edges
            .into_iter()
            .map(|e| convert_product(e.node))
            .collect();

        Ok(ProductConnection {
            products,
            page_info: PageInfo {
                has_next_page: response.products.page_info.has_next_page,
                end_cursor: response.products.page_info.end_cursor,
            },
        })
    }

    /// Resolve a product's first (price-bearing) variant.
    ///
    /// Returns `None` when the product does not exist or has no variants;
    /// such products are never submitted for price updates.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error
    /// response.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_first_variant(
        &self,
        id: &ProductId,
    ) -> Result<Option<VariantInfo>, AdminShopifyError> {
        let variables = IdVariables {
            id: id.as_str().to_string(),
        };

        let response: GetFirstVariantData =
            self.execute(queries::GET_FIRST_VARIANT, variables).await?;

        Ok(response.product.and_then(|p| {
            p.variants.edges.into_iter().next().map(|e| VariantInfo {
                id: e.node.id,
                price: e.node.price,
            })
        }))
    }

    /// Resolve the product that owns a variant.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error
    /// response.
    #[instrument(skip(self), fields(variant_id = %id))]
    pub async fn get_variant_product(
        &self,
        id: &VariantId,
    ) -> Result<Option<ProductId>, AdminShopifyError> {
        let variables = IdVariables {
            id: id.as_str().to_string(),
        };

        let response: GetVariantProductData =
            self.execute(queries::GET_VARIANT_PRODUCT, variables).await?;

        Ok(response.product_variant.map(|v| v.product.id))
    }

    // =========================================================================
    // Price mutation
    // =========================================================================

    /// Write one variant's price.
    ///
    /// The price is submitted as a two-decimal string, which is the format
    /// the Admin API expects for Money values.
    ///
    /// # Errors
    ///
    /// Returns `AdminShopifyError::UserError` if the mutation reports
    /// field-level validation errors, or another variant for transport and
    /// API failures.
    #[instrument(skip(self), fields(product_id = %product_id, variant_id = %variant_id))]
    pub async fn update_variant_price(
        &self,
        product_id: &ProductId,
        variant_id: &VariantId,
        price: Price,
    ) -> Result<(), AdminShopifyError> {
        let variables = BulkUpdateVariables {
            product_id: product_id.clone(),
            variants: vec![VariantPriceInput {
                id: variant_id.clone(),
                price: price.to_amount_string(),
            }],
        };

        let response: BulkUpdateData = self
            .execute(queries::PRODUCT_VARIANTS_BULK_UPDATE, variables)
            .await?;

        let Some(payload) = response.product_variants_bulk_update else {
            return Err(AdminShopifyError::GraphQL(vec![GraphQLError {
                message: "No payload returned from variant update".to_string(),
                locations: vec![],
                path: vec![],
            }]));
        };

        if !payload.user_errors.is_empty() {
            let error_messages: Vec<String> = payload
                .user_errors
                .iter()
                .map(queries::UserErrorNode::display)
                .collect();
            return Err(AdminShopifyError::UserError(error_messages.join("; ")));
        }

        Ok(())
    }
}

fn convert_product(node: ProductNode) -> CatalogProduct {
    let variant = node.variants.edges.into_iter().next().map(|e| e.node);

    CatalogProduct {
        id: node.id,
        title: node.title,
        product_type: node.product_type,
        vendor: node.vendor,
        tags: node.tags,
        total_inventory: node.total_inventory,
        variant_id: variant.as_ref().map(|v| v.id.clone()),
        price: variant.map(|v| v.price),
    }
}

/// The Admin API client is the production price-mutation collaborator.
///
/// Failures are folded into the updater's taxonomy: anything the remote
/// API rejected is `Remote` (not retryable), while network-level failures
/// and rate limiting are `Transport` (retryable).
#[async_trait]
impl PriceMutation for AdminClient {
    async fn update_price(
        &self,
        product_id: &ProductId,
        variant_id: &VariantId,
        new_price: Price,
    ) -> Result<(), MutationError> {
        self.update_variant_price(product_id, variant_id, new_price)
            .await
            .map_err(|err| match err {
                AdminShopifyError::Http(e) => MutationError::Transport(e.to_string()),
                AdminShopifyError::RateLimited(secs) => {
                    MutationError::Transport(format!("rate limited, retry after {secs}s"))
                }
                AdminShopifyError::UserError(msg) => MutationError::Remote(msg),
                other => MutationError::Remote(other.to_string()),
            })
    }
}
