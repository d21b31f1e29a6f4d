//! SQLite product repository implementation.
//!
//! Implements `ProductRepository` from `pricewatch-core` using sqlx with split read/write pools.

use pricewatch_core::repository::product::ProductRepository;
use pricewatch_types::error::RepositoryError;
use pricewatch_types::product::{OwnerId, Product, ProductId, ProductSnapshot};
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_decimal, parse_decimal, query_error};

/// SQLite-backed implementation of `ProductRepository`.
pub struct SqliteProductRepository {
    pool: DatabasePool,
}

impl SqliteProductRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Product.
struct ProductRow {
    id: i64,
    name: Option<String>,
    description: Option<String>,
    rating: Option<String>,
    url: String,
    price: Option<String>,
    user_id: String,
}

impl ProductRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            rating: row.try_get("rating")?,
            url: row.try_get("url")?,
            price: row.try_get("price")?,
            user_id: row.try_get("user_id")?,
        })
    }

    fn into_product(self) -> Result<Product, RepositoryError> {
        Ok(Product {
            id: ProductId(self.id),
            name: self.name,
            description: self.description,
            rating: self.rating.as_deref().map(parse_decimal).transpose()?,
            url: self.url,
            price: self.price.as_deref().map(parse_decimal).transpose()?,
            user_id: OwnerId::new(self.user_id),
        })
    }
}

fn map_product(row: &sqlx::sqlite::SqliteRow) -> Result<Product, RepositoryError> {
    ProductRow::from_row(row)
        .map_err(query_error)?
        .into_product()
}

const SELECT_PRODUCT: &str =
    "SELECT id, name, description, rating, url, price, user_id FROM products";

impl ProductRepository for SqliteProductRepository {
    async fn create(&self, url: &str, owner: &OwnerId) -> Result<Product, RepositoryError> {
        let result = sqlx::query("INSERT INTO products (url, user_id) VALUES (?, ?)")
            .bind(url)
            .bind(owner.as_str())
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;

        Ok(Product {
            id: ProductId(result.last_insert_rowid()),
            name: None,
            description: None,
            rating: None,
            url: url.to_string(),
            price: None,
            user_id: owner.clone(),
        })
    }

    async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let mut conn = self.pool.acquire().await.map_err(query_error)?;
        let row = sqlx::query(&format!("{SELECT_PRODUCT} WHERE id = ?"))
            .bind(id.0)
            .fetch_optional(&mut *conn)
            .await
            .map_err(query_error)?;

        row.as_ref().map(map_product).transpose()
    }

    async fn list_by_owner(&self, owner: &OwnerId) -> Result<Vec<Product>, RepositoryError> {
        let mut conn = self.pool.acquire().await.map_err(query_error)?;
        let rows = sqlx::query(&format!("{SELECT_PRODUCT} WHERE user_id = ? ORDER BY id"))
            .bind(owner.as_str())
            .fetch_all(&mut *conn)
            .await
            .map_err(query_error)?;

        rows.iter().map(map_product).collect()
    }

    async fn delete_with_history(&self, id: ProductId) -> Result<(), RepositoryError> {
        // Both deletes commit together; returning early drops `tx` and rolls back
        let mut tx = self.pool.begin().await.map_err(query_error)?;

        sqlx::query("DELETE FROM price_history WHERE product_id = ?")
            .bind(id.0)
            .execute(&mut *tx)
            .await
            .map_err(query_error)?;

        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id.0)
            .execute(&mut *tx)
            .await
            .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        tx.commit().await.map_err(query_error)?;
        Ok(())
    }

    async fn update_snapshot(
        &self,
        id: ProductId,
        snapshot: &ProductSnapshot,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query(
            "UPDATE products SET name = ?, description = ?, price = ?, rating = ?
             WHERE id = ?
             RETURNING id, name, description, rating, url, price, user_id",
        )
        .bind(&snapshot.name)
        .bind(&snapshot.description)
        .bind(snapshot.price.as_ref().map(format_decimal))
        .bind(snapshot.rating.as_ref().map(format_decimal))
        .bind(id.0)
        .fetch_optional(&self.pool.writer)
        .await
        .map_err(query_error)?;

        match row {
            Some(row) => map_product(&row),
            None => Err(RepositoryError::NotFound),
        }
    }
}
