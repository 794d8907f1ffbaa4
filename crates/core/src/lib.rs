//! PriceLift Core - Shared types library.
//!
//! This crate provides the domain types used across PriceLift components:
//! - `admin` - Bulk price-edit service backed by the Shopify Admin API
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients, no async. This keeps it lightweight and allows it to be used
//! anywhere, including in tests that never touch the network.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices, plus the
//!   price-edit rule and its arithmetic

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
