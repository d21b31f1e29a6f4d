//! Product monitoring service.
//!
//! Every user-facing operation is scoped by an [`OwnerId`]. A product owned
//! by someone else is reported exactly like a product that does not exist.

use chrono::Utc;
use pricewatch_types::error::ProductError;
use pricewatch_types::product::{
    MAX_NAME_LEN, MAX_URL_LEN, OwnerId, PRICE_PRECISION, PRICE_SCALE, PriceRecord, Product,
    ProductId, ProductSnapshot, RATING_PRECISION, RATING_SCALE,
};
use rust_decimal::Decimal;

use crate::repository::price_history::PriceHistoryRepository;
use crate::repository::product::ProductRepository;

/// Service exposing the product use cases to the REST API, the bot and the CLI.
///
/// Generic over the repository traits -- pricewatch-core never depends on
/// pricewatch-infra.
pub struct ProductService<P: ProductRepository, H: PriceHistoryRepository> {
    products: P,
    history: H,
}

impl<P: ProductRepository, H: PriceHistoryRepository> ProductService<P, H> {
    pub fn new(products: P, history: H) -> Self {
        Self { products, history }
    }

    /// Register a URL for monitoring. Duplicate URLs are allowed; each call
    /// creates an independent row.
    pub async fn add_product(&self, owner: &OwnerId, url: &str) -> Result<Product, ProductError> {
        let url = validate_url(url)?;
        let product = self.products.create(url, owner).await?;
        tracing::info!(owner = %owner, product_id = %product.id, url, "product added");
        Ok(product)
    }

    pub async fn list_products(&self, owner: &OwnerId) -> Result<Vec<Product>, ProductError> {
        let products = self.products.list_by_owner(owner).await?;
        tracing::debug!(owner = %owner, count = products.len(), "products listed");
        Ok(products)
    }

    /// Fetch a product the caller owns.
    pub async fn get_product(
        &self,
        owner: &OwnerId,
        id: ProductId,
    ) -> Result<Product, ProductError> {
        match self.products.get_by_id(id).await? {
            Some(product) if product.is_owned_by(owner) => Ok(product),
            _ => Err(ProductError::NotFound),
        }
    }

    /// Delete a product and its price history atomically.
    pub async fn remove_product(&self, owner: &OwnerId, id: ProductId) -> Result<(), ProductError> {
        self.get_product(owner, id).await?;
        self.products.delete_with_history(id).await?;
        tracing::info!(owner = %owner, product_id = %id, "product deleted");
        Ok(())
    }

    /// Recorded prices for a product the caller owns, oldest first.
    ///
    /// An empty history is an error, not an empty list.
    pub async fn price_history(
        &self,
        owner: &OwnerId,
        id: ProductId,
    ) -> Result<Vec<PriceRecord>, ProductError> {
        self.get_product(owner, id).await?;
        let records = self.history.list_for_product(id).await?;
        if records.is_empty() {
            return Err(ProductError::NoPriceHistory);
        }
        tracing::debug!(owner = %owner, product_id = %id, count = records.len(), "price history fetched");
        Ok(records)
    }

    /// Store what the scraper observed for a product. Not owner-scoped.
    ///
    /// The product's current fields are replaced by the snapshot, and a
    /// history row is appended when the snapshot carries a price.
    pub async fn record_price(
        &self,
        id: ProductId,
        snapshot: ProductSnapshot,
    ) -> Result<Product, ProductError> {
        let snapshot = normalize_snapshot(snapshot)?;
        let product = self.products.update_snapshot(id, &snapshot).await?;
        if let Some(price) = snapshot.price {
            self.history.record(id, price, Utc::now()).await?;
        }
        tracing::info!(product_id = %id, price = ?snapshot.price, "observation recorded");
        Ok(product)
    }
}

fn validate_url(url: &str) -> Result<&str, ProductError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ProductError::InvalidUrl("url cannot be empty".to_string()));
    }
    if url.chars().count() > MAX_URL_LEN {
        return Err(ProductError::InvalidUrl(format!(
            "url must be at most {MAX_URL_LEN} characters"
        )));
    }
    Ok(url)
}

/// Round prices and ratings to their stored scale and reject values that
/// do not fit the column width.
fn normalize_snapshot(mut snapshot: ProductSnapshot) -> Result<ProductSnapshot, ProductError> {
    if let Some(name) = &snapshot.name {
        if name.chars().count() > MAX_NAME_LEN {
            return Err(ProductError::InvalidSnapshot(format!(
                "name must be at most {MAX_NAME_LEN} characters"
            )));
        }
    }
    snapshot.price = snapshot
        .price
        .map(|p| fit_decimal("price", p, PRICE_PRECISION, PRICE_SCALE))
        .transpose()?;
    snapshot.rating = snapshot
        .rating
        .map(|r| fit_decimal("rating", r, RATING_PRECISION, RATING_SCALE))
        .transpose()?;
    Ok(snapshot)
}

fn fit_decimal(
    field: &str,
    value: Decimal,
    precision: u32,
    scale: u32,
) -> Result<Decimal, ProductError> {
    if value.is_sign_negative() {
        return Err(ProductError::InvalidSnapshot(format!(
            "{field} cannot be negative"
        )));
    }
    let rounded = value.round_dp(scale);
    let limit = Decimal::from(10_i64.pow(precision - scale));
    if rounded >= limit {
        return Err(ProductError::InvalidSnapshot(format!(
            "{field} must be below {limit}"
        )));
    }
    Ok(rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{InMemoryStore, service};

    fn owner(id: &str) -> OwnerId {
        OwnerId::new(id)
    }

    #[tokio::test]
    async fn test_add_then_list_is_scoped_to_owner() {
        let svc = service();
        let created = svc
            .add_product(&owner("A"), "http://example.com/p1")
            .await
            .unwrap();
        assert_eq!(created.url, "http://example.com/p1");
        assert!(created.name.is_none());
        assert!(created.price.is_none());
        assert!(created.rating.is_none());

        let mine = svc.list_products(&owner("A")).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, created.id);

        let theirs = svc.list_products(&owner("B")).await.unwrap();
        assert!(theirs.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_urls_create_independent_rows() {
        let svc = service();
        let a = svc.add_product(&owner("A"), "http://x").await.unwrap();
        let b = svc.add_product(&owner("A"), "http://x").await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(svc.list_products(&owner("A")).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_add_rejects_blank_and_oversized_urls() {
        let svc = service();
        let err = svc.add_product(&owner("A"), "   ").await.unwrap_err();
        assert!(matches!(err, ProductError::InvalidUrl(_)));

        let long = format!("http://example.com/{}", "a".repeat(MAX_URL_LEN));
        let err = svc.add_product(&owner("A"), &long).await.unwrap_err();
        assert!(matches!(err, ProductError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_remove_by_other_owner_is_not_found() {
        let svc = service();
        let p = svc.add_product(&owner("A"), "http://x").await.unwrap();

        let foreign = svc.remove_product(&owner("B"), p.id).await.unwrap_err();
        let missing = svc
            .remove_product(&owner("B"), ProductId(9999))
            .await
            .unwrap_err();
        assert!(matches!(foreign, ProductError::NotFound));
        assert!(matches!(missing, ProductError::NotFound));

        // Still there for the owner
        assert_eq!(svc.list_products(&owner("A")).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_deletes_history() {
        let svc = service();
        let p = svc.add_product(&owner("A"), "http://x").await.unwrap();
        svc.record_price(
            p.id,
            ProductSnapshot {
                price: Some(Decimal::new(1000, 2)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        svc.remove_product(&owner("A"), p.id).await.unwrap();
        assert!(svc.list_products(&owner("A")).await.unwrap().is_empty());

        for who in ["A", "B"] {
            let err = svc.price_history(&owner(who), p.id).await.unwrap_err();
            assert!(matches!(err, ProductError::NotFound));
        }
    }

    #[tokio::test]
    async fn test_empty_history_is_an_error() {
        let svc = service();
        let p = svc.add_product(&owner("A"), "http://x").await.unwrap();
        let err = svc.price_history(&owner("A"), p.id).await.unwrap_err();
        assert!(matches!(err, ProductError::NoPriceHistory));
    }

    #[tokio::test]
    async fn test_history_of_foreign_product_is_not_found() {
        let svc = service();
        let p = svc.add_product(&owner("A"), "http://x").await.unwrap();
        svc.record_price(
            p.id,
            ProductSnapshot {
                price: Some(Decimal::new(500, 2)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let err = svc.price_history(&owner("B"), p.id).await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound));
        assert_eq!(svc.price_history(&owner("A"), p.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_record_price_rounds_and_updates_snapshot() {
        let svc = service();
        let p = svc.add_product(&owner("A"), "http://x").await.unwrap();
        let updated = svc
            .record_price(
                p.id,
                ProductSnapshot {
                    name: Some("Kettle".to_string()),
                    description: None,
                    price: Some(Decimal::new(19999, 3)),
                    rating: Some(Decimal::new(467, 2)),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name.as_deref(), Some("Kettle"));
        assert_eq!(updated.price, Some(Decimal::new(2000, 2)));
        assert_eq!(updated.rating, Some(Decimal::new(47, 1)));

        let history = svc.price_history(&owner("A"), p.id).await.unwrap();
        assert_eq!(history[0].price, Decimal::new(2000, 2));
    }

    #[tokio::test]
    async fn test_record_without_price_appends_nothing() {
        let svc = service();
        let p = svc.add_product(&owner("A"), "http://x").await.unwrap();
        svc.record_price(
            p.id,
            ProductSnapshot {
                name: Some("Kettle".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let err = svc.price_history(&owner("A"), p.id).await.unwrap_err();
        assert!(matches!(err, ProductError::NoPriceHistory));
    }

    #[tokio::test]
    async fn test_record_rejects_out_of_range_rating() {
        let svc = service();
        let p = svc.add_product(&owner("A"), "http://x").await.unwrap();
        let err = svc
            .record_price(
                p.id,
                ProductSnapshot {
                    rating: Some(Decimal::new(10, 0)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::InvalidSnapshot(_)));
    }

    #[tokio::test]
    async fn test_record_for_missing_product_is_not_found() {
        let svc = ProductService::new(InMemoryStore::default(), InMemoryStore::default());
        let err = svc
            .record_price(ProductId(1), ProductSnapshot::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::NotFound));
    }

    #[test]
    fn test_fit_decimal_limits() {
        assert!(fit_decimal("price", Decimal::new(9_999_999_999, 2), 10, 2).is_ok());
        assert!(fit_decimal("price", Decimal::new(10_000_000_000, 2), 10, 2).is_err());
        assert!(fit_decimal("price", Decimal::new(-1, 0), 10, 2).is_err());
        assert_eq!(
            fit_decimal("rating", Decimal::new(994, 2), 2, 1).unwrap(),
            Decimal::new(99, 1)
        );
        assert!(fit_decimal("rating", Decimal::new(996, 2), 2, 1).is_err());
    }
}
