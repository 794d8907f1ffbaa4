//! Core types for PriceLift.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod rule;

pub use id::*;
pub use price::Price;
pub use rule::{EditDirection, EditMode, EditRule, RuleError};
