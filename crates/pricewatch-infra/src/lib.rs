//! Infrastructure layer for Pricewatch.
//!
//! Contains implementations of the repository traits defined in
//! `pricewatch-core` (SQLite storage) and the configuration loader.

pub mod config;
pub mod sqlite;
