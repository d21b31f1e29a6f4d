//! Product repository trait definition.

use pricewatch_types::error::RepositoryError;
use pricewatch_types::product::{OwnerId, Product, ProductId, ProductSnapshot};

/// Repository trait for product persistence.
///
/// Implementations live in pricewatch-infra (e.g., SqliteProductRepository).
/// Ownership is not checked here; callers filter on `user_id` themselves.
pub trait ProductRepository: Send + Sync {
    /// Insert a new product with only `url` and `user_id` set.
    /// Returns the stored row including its generated id.
    fn create(
        &self,
        url: &str,
        owner: &OwnerId,
    ) -> impl std::future::Future<Output = Result<Product, RepositoryError>> + Send;

    /// Point lookup by primary key.
    fn get_by_id(
        &self,
        id: ProductId,
    ) -> impl std::future::Future<Output = Result<Option<Product>, RepositoryError>> + Send;

    /// All products owned by `owner`, in store-native order.
    fn list_by_owner(
        &self,
        owner: &OwnerId,
    ) -> impl std::future::Future<Output = Result<Vec<Product>, RepositoryError>> + Send;

    /// Delete a product together with all of its price history in one
    /// transaction. Returns `NotFound` if no product row was deleted, in
    /// which case nothing is committed.
    fn delete_with_history(
        &self,
        id: ProductId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Overwrite the scraped fields of a product. Returns the updated row.
    fn update_snapshot(
        &self,
        id: ProductId,
        snapshot: &ProductSnapshot,
    ) -> impl std::future::Future<Output = Result<Product, RepositoryError>> + Send;
}
