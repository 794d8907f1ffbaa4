//! Bulk price updater.
//!
//! Given a snapshot of selected products and one [`EditRule`], computes each
//! product's new price and dispatches one price mutation per product against
//! the [`PriceMutation`] collaborator, collecting per-item success/failure.
//!
//! Dispatch rules:
//! - products without a resolvable variant are never submitted; they get a
//!   failed outcome with a validation detail and no remote call
//! - in-flight mutations are bounded by a semaphore so a large selection
//!   cannot trip the Admin API's rate limits
//! - every attempt carries its own timeout; a stuck call fails that item
//!   with `"timeout"` instead of stalling the batch
//! - transport-class failures are retried with exponential backoff; remote
//!   rejections and validation failures are not
//! - one item's failure never aborts the batch, and aggregation joins every
//!   dispatched call before returning, so a completed run yields exactly
//!   one outcome per input product
//!
//! There is no rollback: the report is best-effort, not atomic.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::{debug, instrument, warn};

use pricelift_core::{EditRule, Price, ProductId, VariantId};

use crate::config::BulkUpdateSettings;

/// Why a single price mutation failed.
///
/// Only `Transport` failures are transient; they are the only kind the
/// updater retries.
#[derive(Debug, Clone, Error)]
pub enum MutationError {
    /// The item was structurally invalid; no remote call was attempted.
    #[error("validation: {0}")]
    Validation(String),

    /// The remote API processed the call and rejected the update.
    #[error("rejected by remote API: {0}")]
    Remote(String),

    /// The call never completed: network failure, rate limiting, etc.
    #[error("transport: {0}")]
    Transport(String),
}

impl MutationError {
    /// Whether retrying the same call could plausibly succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Price-mutation collaborator contract.
///
/// Implemented by the Admin API client in production and by mocks in
/// tests. Implementations must accept structured parameters and are
/// responsible for safe encoding; callers never hand over query text.
#[async_trait]
pub trait PriceMutation: Send + Sync {
    /// Write one variant's price.
    async fn update_price(
        &self,
        product_id: &ProductId,
        variant_id: &VariantId,
        new_price: Price,
    ) -> Result<(), MutationError>;
}

/// One selected product as captured by the edit session snapshot.
#[derive(Debug, Clone)]
pub struct SelectedProduct {
    pub id: ProductId,
    /// The price-bearing variant; `None` for variant-less products, which
    /// are excluded from updates.
    pub variant_id: Option<VariantId>,
    /// Current price the rule is applied to.
    pub price: Price,
}

/// A fully-resolved price write: product, variant, target price.
#[derive(Debug, Clone)]
pub struct PriceAssignment {
    pub product_id: ProductId,
    pub variant_id: Option<VariantId>,
    pub new_price: Price,
}

/// Terminal state of one product's update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateStatus {
    Ok,
    Failed,
}

/// Per-product result of a bulk update run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub product_id: ProductId,
    pub variant_id: Option<VariantId>,
    pub requested_price: Price,
    pub status: UpdateStatus,
    /// Present only when `status == Failed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl UpdateOutcome {
    /// Whether this item's mutation was committed.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == UpdateStatus::Ok
    }
}

/// Aggregated result of one bulk update run.
///
/// Partial success is representable: `succeeded`/`failed` counts
/// distinguish it from total success and total failure.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct BulkUpdateReport {
    outcomes: Vec<UpdateOutcome>,
}

impl BulkUpdateReport {
    /// All per-product outcomes.
    #[must_use]
    pub fn outcomes(&self) -> &[UpdateOutcome] {
        &self.outcomes
    }

    /// Consume the report, returning the outcomes.
    #[must_use]
    pub fn into_outcomes(self) -> Vec<UpdateOutcome> {
        self.outcomes
    }

    /// Number of committed updates.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    /// Number of failed updates.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Whether every dispatched update was committed.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }

    /// Sort outcomes by product id for stable presentation.
    ///
    /// Completion order is not meaningful across independent dispatches;
    /// callers that need a deterministic order re-sort.
    pub fn sort_by_product_id(&mut self) {
        self.outcomes.sort_by(|a, b| a.product_id.cmp(&b.product_id));
    }
}

/// The bulk price updater.
///
/// Single-shot: each call to [`run`](Self::run) is an independent
/// idle -> in-progress -> completed pass with no pause/resume or
/// cancellation.
pub struct BulkUpdater<M> {
    mutation: Arc<M>,
    settings: BulkUpdateSettings,
}

impl<M: PriceMutation + 'static> BulkUpdater<M> {
    /// Create an updater over a price-mutation collaborator.
    pub fn new(mutation: Arc<M>, settings: BulkUpdateSettings) -> Self {
        Self { mutation, settings }
    }

    /// Apply one edit rule to every selected product.
    ///
    /// Computes each product's new price via [`EditRule::apply`] and
    /// dispatches the writes. An empty selection returns an empty report
    /// without invoking the collaborator.
    #[instrument(skip(self, products, rule), fields(products = products.len()))]
    pub async fn run(&self, products: Vec<SelectedProduct>, rule: &EditRule) -> BulkUpdateReport {
        let assignments = products
            .into_iter()
            .map(|p| PriceAssignment {
                product_id: p.id,
                variant_id: p.variant_id,
                new_price: rule.apply(p.price),
            })
            .collect();

        self.apply_prices(assignments).await
    }

    /// Dispatch pre-computed price writes.
    ///
    /// This is the fan-out core shared by rule-driven bulk edits and the
    /// explicit-price update endpoint.
    #[instrument(skip(self, assignments), fields(assignments = assignments.len()))]
    pub async fn apply_prices(&self, assignments: Vec<PriceAssignment>) -> BulkUpdateReport {
        if assignments.is_empty() {
            return BulkUpdateReport::default();
        }

        let semaphore = Arc::new(Semaphore::new(self.settings.max_concurrency.max(1)));
        let mut outcomes = Vec::with_capacity(assignments.len());
        let mut handles = Vec::new();

        for assignment in assignments {
            // Invariant: a product with no resolvable variant is never
            // submitted, but still yields exactly one outcome.
            let Some(variant_id) = assignment.variant_id.clone() else {
                debug!(product_id = %assignment.product_id, "skipping product without variant");
                outcomes.push(UpdateOutcome {
                    product_id: assignment.product_id,
                    variant_id: None,
                    requested_price: assignment.new_price,
                    status: UpdateStatus::Failed,
                    error_detail: Some(
                        MutationError::Validation("product has no variant".to_string())
                            .to_string(),
                    ),
                });
                continue;
            };

            let mutation = Arc::clone(&self.mutation);
            let semaphore = Arc::clone(&semaphore);
            let settings = self.settings.clone();
            let product_id = assignment.product_id.clone();
            let new_price = assignment.new_price;

            let handle = tokio::spawn(async move {
                // The semaphore is never closed while dispatches run.
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return failed_outcome(
                        product_id,
                        Some(variant_id),
                        new_price,
                        "dispatcher shut down".to_string(),
                    );
                };

                dispatch_one(&*mutation, product_id, variant_id, new_price, &settings).await
            });

            handles.push((assignment, handle));
        }

        // Join every dispatched call before returning. One item's failure
        // (including a panic in the collaborator) stays localized to its
        // own outcome.
        for (assignment, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(product_id = %assignment.product_id, error = %e, "dispatch task failed");
                    failed_outcome(
                        assignment.product_id,
                        assignment.variant_id,
                        assignment.new_price,
                        format!("internal: {e}"),
                    )
                }
            };
            outcomes.push(outcome);
        }

        let report = BulkUpdateReport { outcomes };
        debug!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            "bulk update completed"
        );
        report
    }
}

fn failed_outcome(
    product_id: ProductId,
    variant_id: Option<VariantId>,
    requested_price: Price,
    error_detail: String,
) -> UpdateOutcome {
    UpdateOutcome {
        product_id,
        variant_id,
        requested_price,
        status: UpdateStatus::Failed,
        error_detail: Some(error_detail),
    }
}

/// Run one item's mutation with timeout and transport-only retry.
async fn dispatch_one<M: PriceMutation>(
    mutation: &M,
    product_id: ProductId,
    variant_id: VariantId,
    new_price: Price,
    settings: &BulkUpdateSettings,
) -> UpdateOutcome {
    let max_attempts = settings.retry_max_attempts.max(1);
    let mut attempt = 1;

    loop {
        let result = tokio::time::timeout(
            settings.mutation_timeout,
            mutation.update_price(&product_id, &variant_id, new_price),
        )
        .await;

        let detail = match result {
            Ok(Ok(())) => {
                return UpdateOutcome {
                    product_id,
                    variant_id: Some(variant_id),
                    requested_price: new_price,
                    status: UpdateStatus::Ok,
                    error_detail: None,
                };
            }
            Ok(Err(err)) if err.is_transient() && attempt < max_attempts => err.to_string(),
            Ok(Err(err)) => {
                return failed_outcome(product_id, Some(variant_id), new_price, err.to_string());
            }
            Err(_elapsed) if attempt < max_attempts => "timeout".to_string(),
            Err(_elapsed) => {
                return failed_outcome(
                    product_id,
                    Some(variant_id),
                    new_price,
                    "timeout".to_string(),
                );
            }
        };

        let delay = settings.retry_base_delay * 2_u32.saturating_pow(attempt - 1);
        debug!(
            product_id = %product_id,
            attempt,
            detail = %detail,
            delay_ms = delay.as_millis() as u64,
            "retrying transient mutation failure"
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use pricelift_core::{EditDirection, EditMode};

    /// Collaborator that records calls and always succeeds.
    #[derive(Default)]
    struct CountingMutation {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PriceMutation for CountingMutation {
        async fn update_price(
            &self,
            _product_id: &ProductId,
            _variant_id: &VariantId,
            _new_price: Price,
        ) -> Result<(), MutationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn updater(mutation: Arc<CountingMutation>) -> BulkUpdater<CountingMutation> {
        BulkUpdater::new(mutation, BulkUpdateSettings::default())
    }

    fn percent_increase(magnitude: &str) -> EditRule {
        EditRule::new(
            EditMode::Percent,
            EditDirection::Increase,
            magnitude.parse().unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_empty_selection_invokes_nothing() {
        let mutation = Arc::new(CountingMutation::default());
        let report = updater(Arc::clone(&mutation))
            .run(vec![], &percent_increase("10"))
            .await;

        assert!(report.outcomes().is_empty());
        assert!(report.all_succeeded());
        assert_eq!(mutation.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_variantless_product_yields_outcome_without_call() {
        let mutation = Arc::new(CountingMutation::default());
        let products = vec![
            SelectedProduct {
                id: ProductId::new("gid://shopify/Product/1"),
                variant_id: Some(VariantId::new("gid://shopify/ProductVariant/11")),
                price: "10.00".parse().unwrap(),
            },
            SelectedProduct {
                id: ProductId::new("gid://shopify/Product/2"),
                variant_id: None,
                price: "10.00".parse().unwrap(),
            },
        ];

        let report = updater(Arc::clone(&mutation))
            .run(products, &percent_increase("10"))
            .await;

        assert_eq!(report.outcomes().len(), 2);
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(mutation.calls.load(Ordering::SeqCst), 1);

        let failed = report.outcomes().iter().find(|o| !o.is_ok()).unwrap();
        assert_eq!(failed.product_id.as_str(), "gid://shopify/Product/2");
        assert!(failed.variant_id.is_none());
        assert!(
            failed
                .error_detail
                .as_deref()
                .unwrap()
                .contains("no variant")
        );
    }

    #[tokio::test]
    async fn test_rule_prices_are_applied_before_dispatch() {
        let mutation = Arc::new(CountingMutation::default());
        let products = vec![SelectedProduct {
            id: ProductId::new("gid://shopify/Product/1"),
            variant_id: Some(VariantId::new("gid://shopify/ProductVariant/11")),
            price: "19.99".parse().unwrap(),
        }];

        let report = updater(mutation).run(products, &percent_increase("10")).await;

        // 19.99 * 1.10 = 21.989, rounded half-up to 21.99
        assert_eq!(
            report.outcomes()[0].requested_price.to_amount_string(),
            "21.99"
        );
    }
}
