//! Repository trait definitions (ports).
//!
//! These traits define the storage interface that the infrastructure layer
//! (pricewatch-infra) implements. The core crate never depends on any
//! specific storage technology.

pub mod price_history;
pub mod product;
