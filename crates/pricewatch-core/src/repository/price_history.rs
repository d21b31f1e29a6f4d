//! Price history repository trait definition.

use chrono::{DateTime, Utc};
use pricewatch_types::error::RepositoryError;
use pricewatch_types::product::{PriceRecord, ProductId};
use rust_decimal::Decimal;

/// Append-only log of observed prices.
pub trait PriceHistoryRepository: Send + Sync {
    /// Append one observation. Fails with `NotFound` if the product does
    /// not exist.
    fn record(
        &self,
        product_id: ProductId,
        price: Decimal,
        recorded_at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<PriceRecord, RepositoryError>> + Send;

    /// All observations for a product, oldest first.
    fn list_for_product(
        &self,
        product_id: ProductId,
    ) -> impl std::future::Future<Output = Result<Vec<PriceRecord>, RepositoryError>> + Send;
}
