//! HTTP/REST API layer for Pricewatch.
//!
//! Axum-based REST API scoped by the `X-Session-ID` header, with CORS and
//! request tracing.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
