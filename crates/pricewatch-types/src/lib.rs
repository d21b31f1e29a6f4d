//! Shared domain types for Pricewatch.
//!
//! Products, price history records, owner identifiers, configuration and
//! the error types shared by every layer.
//!
//! Zero infrastructure dependencies -- only serde, chrono, rust_decimal, thiserror.

pub mod config;
pub mod error;
pub mod product;
