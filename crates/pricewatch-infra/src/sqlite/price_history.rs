//! SQLite price history repository implementation.

use chrono::{DateTime, Utc};
use pricewatch_core::repository::price_history::PriceHistoryRepository;
use pricewatch_types::error::RepositoryError;
use pricewatch_types::product::{PriceRecord, ProductId};
use rust_decimal::Decimal;
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, format_decimal, parse_datetime, parse_decimal, query_error};

/// SQLite-backed implementation of `PriceHistoryRepository`.
pub struct SqlitePriceHistoryRepository {
    pool: DatabasePool,
}

impl SqlitePriceHistoryRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn map_record(row: &sqlx::sqlite::SqliteRow) -> Result<PriceRecord, RepositoryError> {
    let price: String = row.try_get("price").map_err(query_error)?;
    let recorded_at: String = row.try_get("recorded_at").map_err(query_error)?;
    Ok(PriceRecord {
        id: row.try_get("id").map_err(query_error)?,
        product_id: ProductId(row.try_get("product_id").map_err(query_error)?),
        price: parse_decimal(&price)?,
        recorded_at: parse_datetime(&recorded_at)?,
    })
}

impl PriceHistoryRepository for SqlitePriceHistoryRepository {
    async fn record(
        &self,
        product_id: ProductId,
        price: Decimal,
        recorded_at: DateTime<Utc>,
    ) -> Result<PriceRecord, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO price_history (product_id, price, recorded_at) VALUES (?, ?, ?)",
        )
        .bind(product_id.0)
        .bind(format_decimal(&price))
        .bind(format_datetime(&recorded_at))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(done) => Ok(PriceRecord {
                id: done.last_insert_rowid(),
                product_id,
                price,
                recorded_at,
            }),
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                Err(RepositoryError::NotFound)
            }
            Err(e) => Err(query_error(e)),
        }
    }

    async fn list_for_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<PriceRecord>, RepositoryError> {
        let mut conn = self.pool.acquire().await.map_err(query_error)?;
        let rows = sqlx::query(
            "SELECT id, product_id, price, recorded_at FROM price_history
             WHERE product_id = ? ORDER BY recorded_at, id",
        )
        .bind(product_id.0)
        .fetch_all(&mut *conn)
        .await
        .map_err(query_error)?;

        rows.iter().map(map_record).collect()
    }
}
