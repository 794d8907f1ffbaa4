//! Wire-contract tests for the bulk-edit API request and response shapes.

#![allow(clippy::unwrap_used)]

use pricelift_admin::routes::bulk_edit::{BulkEditRequest, UpdatePriceRequest};
use pricelift_admin::services::bulk_update::{UpdateOutcome, UpdateStatus};
use pricelift_core::{EditDirection, EditMode, ProductId, VariantId};
use serde_json::json;

#[test]
fn test_bulk_edit_request_deserializes() {
    let body = json!({
        "products": [
            {
                "id": "gid://shopify/Product/1",
                "variantId": "gid://shopify/ProductVariant/11",
                "price": "19.99"
            },
            {
                "id": "gid://shopify/Product/2",
                "price": "5.00"
            }
        ],
        "rule": {
            "mode": "percent",
            "direction": "increase",
            "magnitude": "10"
        }
    });

    let request: BulkEditRequest = serde_json::from_value(body).unwrap();
    assert_eq!(request.products.len(), 2);
    assert_eq!(request.products[0].id.as_str(), "gid://shopify/Product/1");
    assert!(request.products[1].variant_id.is_none());
    assert_eq!(request.rule.mode, EditMode::Percent);
    assert_eq!(request.rule.direction, EditDirection::Increase);
}

#[test]
fn test_update_price_batch_shape() {
    let body = json!({
        "products": [
            { "id": "gid://shopify/Product/1", "newPrice": "12.34" }
        ]
    });

    let request: UpdatePriceRequest = serde_json::from_value(body).unwrap();
    match request {
        UpdatePriceRequest::Batch { products } => {
            assert_eq!(products.len(), 1);
            assert_eq!(products[0].new_price.to_amount_string(), "12.34");
        }
        UpdatePriceRequest::Single { .. } => panic!("expected batch shape"),
    }
}

#[test]
fn test_update_price_single_shape() {
    let body = json!({
        "variantId": "gid://shopify/ProductVariant/11",
        "newPrice": "9.99"
    });

    let request: UpdatePriceRequest = serde_json::from_value(body).unwrap();
    match request {
        UpdatePriceRequest::Single {
            variant_id,
            new_price,
        } => {
            assert_eq!(variant_id.as_str(), "gid://shopify/ProductVariant/11");
            assert_eq!(new_price.to_amount_string(), "9.99");
        }
        UpdatePriceRequest::Batch { .. } => panic!("expected single shape"),
    }
}

#[test]
fn test_outcome_serializes_camel_case() {
    let outcome = UpdateOutcome {
        product_id: ProductId::new("gid://shopify/Product/1"),
        variant_id: Some(VariantId::new("gid://shopify/ProductVariant/11")),
        requested_price: "21.99".parse().unwrap(),
        status: UpdateStatus::Failed,
        error_detail: Some("timeout".to_string()),
    };

    let value = serde_json::to_value(&outcome).unwrap();
    assert_eq!(value["productId"], "gid://shopify/Product/1");
    assert_eq!(value["variantId"], "gid://shopify/ProductVariant/11");
    assert_eq!(value["requestedPrice"], "21.99");
    assert_eq!(value["status"], "failed");
    assert_eq!(value["errorDetail"], "timeout");
}

#[test]
fn test_outcome_omits_error_detail_on_success() {
    let outcome = UpdateOutcome {
        product_id: ProductId::new("gid://shopify/Product/1"),
        variant_id: Some(VariantId::new("gid://shopify/ProductVariant/11")),
        requested_price: "21.99".parse().unwrap(),
        status: UpdateStatus::Ok,
        error_detail: None,
    };

    let value = serde_json::to_value(&outcome).unwrap();
    assert_eq!(value["status"], "ok");
    assert!(value.get("errorDetail").is_none());
}
