//! Integration tests for Pricelift.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pricelift-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `bulk_update` - Bulk updater behavior against a mock price-mutation
//!   collaborator: fault isolation, concurrency bounds, timeout, retry
//! - `api_contract` - Wire shapes of the bulk-edit and update-price APIs
//!
//! Tests here exercise the admin crate through its public library surface;
//! nothing talks to a live Shopify store.
