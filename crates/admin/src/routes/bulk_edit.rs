//! Bulk price-edit handlers.
//!
//! Two entry points share the same dispatch core:
//! - `/api/bulk-edit` applies one [`EditRule`] to a selection and returns
//!   the full per-product report (partial success is representable)
//! - `/api/update-price` accepts explicit target prices, either for a
//!   batch of products (first variant resolved per product) or a single
//!   variant, and collapses the result to `{"success": true}` / `{"error"}`

use axum::{
    Json, Router,
    extract::State,
    routing::post,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use pricelift_core::{EditRule, Price, ProductId, VariantId};

use crate::{
    error::AppError,
    services::bulk_update::{PriceAssignment, SelectedProduct, UpdateOutcome},
    state::AppState,
};

/// Build the bulk-edit router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/bulk-edit", post(bulk_edit))
        .route("/api/update-price", post(update_price))
}

// =============================================================================
// POST /api/bulk-edit
// =============================================================================

/// Selected products plus the rule to apply.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkEditRequest {
    pub products: Vec<SelectedProductRequest>,
    pub rule: EditRule,
}

/// One selected product from the edit session snapshot.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedProductRequest {
    pub id: ProductId,
    pub variant_id: Option<VariantId>,
    pub price: Price,
}

/// Full batch report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkEditResponse {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub results: Vec<UpdateOutcome>,
}

/// Apply one price-edit rule to the selected products.
///
/// # Errors
///
/// Returns 400 if the rule is structurally invalid. Per-product mutation
/// failures are reported in the response body, not as an error status.
#[instrument(skip(state, body), fields(products = body.products.len()))]
pub async fn bulk_edit(
    State(state): State<AppState>,
    Json(body): Json<BulkEditRequest>,
) -> Result<Json<BulkEditResponse>, AppError> {
    body.rule
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let products: Vec<SelectedProduct> = body
        .products
        .into_iter()
        .map(|p| SelectedProduct {
            id: p.id,
            variant_id: p.variant_id,
            price: p.price,
        })
        .collect();

    let mut report = state.updater().run(products, &body.rule).await;
    report.sort_by_product_id();

    let succeeded = report.succeeded();
    let failed = report.failed();
    let results = report.into_outcomes();

    tracing::info!(total = results.len(), succeeded, failed, "bulk edit completed");

    Ok(Json(BulkEditResponse {
        total: results.len(),
        succeeded,
        failed,
        results,
    }))
}

// =============================================================================
// POST /api/update-price
// =============================================================================

/// Explicit price update, in either of the two accepted shapes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum UpdatePriceRequest {
    /// `{ "products": [{ "id": ..., "newPrice": ... }] }`
    Batch { products: Vec<PriceOverride> },
    /// `{ "variantId": ..., "newPrice": ... }`
    #[serde(rename_all = "camelCase")]
    Single {
        variant_id: VariantId,
        new_price: Price,
    },
}

/// One product's explicit target price.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceOverride {
    pub id: ProductId,
    pub new_price: Price,
}

#[derive(Debug, Serialize)]
pub struct UpdatePriceResponse {
    pub success: bool,
}

/// Set explicit variant prices.
///
/// Products whose first variant cannot be resolved are skipped, never
/// submitted. Collapses the batch result: 200 `{"success": true}` only
/// when every dispatched update was committed.
///
/// # Errors
///
/// Returns 400 for negative prices, 502 if variant resolution fails, and
/// 500 if any dispatched update failed.
#[instrument(skip(state, body))]
pub async fn update_price(
    State(state): State<AppState>,
    Json(body): Json<UpdatePriceRequest>,
) -> Result<Json<UpdatePriceResponse>, AppError> {
    let assignments = match body {
        UpdatePriceRequest::Single {
            variant_id,
            new_price,
        } => {
            validate_price(new_price)?;
            let product_id = state
                .shopify()
                .get_variant_product(&variant_id)
                .await?
                .ok_or_else(|| {
                    AppError::BadRequest(format!("unknown variant: {variant_id}"))
                })?;

            vec![PriceAssignment {
                product_id,
                variant_id: Some(variant_id),
                new_price: new_price.rounded(),
            }]
        }
        UpdatePriceRequest::Batch { products } => {
            let mut assignments = Vec::with_capacity(products.len());
            for product in products {
                validate_price(product.new_price)?;

                // Products without a price-bearing variant are excluded
                // from the update, matching the catalog contract.
                let Some(variant) = state.shopify().get_first_variant(&product.id).await? else {
                    tracing::debug!(product_id = %product.id, "no variant, skipping");
                    continue;
                };

                assignments.push(PriceAssignment {
                    product_id: product.id,
                    variant_id: Some(variant.id),
                    new_price: product.new_price.rounded(),
                });
            }
            assignments
        }
    };

    let report = state.updater().apply_prices(assignments).await;

    if report.all_succeeded() {
        Ok(Json(UpdatePriceResponse { success: true }))
    } else {
        Err(AppError::Internal(format!(
            "{} of {} price updates failed",
            report.failed(),
            report.outcomes().len()
        )))
    }
}

fn validate_price(price: Price) -> Result<(), AppError> {
    if price.amount() < Decimal::ZERO {
        return Err(AppError::BadRequest(format!(
            "newPrice must be non-negative, got {price}"
        )));
    }
    Ok(())
}
