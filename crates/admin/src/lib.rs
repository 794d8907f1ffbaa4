//! PriceLift Admin library.
//!
//! This crate provides the bulk price-edit service as a library, allowing
//! it to be tested and reused.
//!
//! # Security
//!
//! This crate holds the HIGH PRIVILEGE Shopify Admin API access token.
//! The Admin API has full write access to products, variants, and prices.
//! Only deploy on trusted, network-restricted infrastructure.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod shopify;
pub mod state;
