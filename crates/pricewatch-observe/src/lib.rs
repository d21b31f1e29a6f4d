//! Observability setup for Pricewatch.

pub mod tracing_setup;
