//! SQLite storage layer.
//!
//! Repository implementations backed by SQLite with WAL mode and split
//! read/write connection pools.

pub mod pool;
pub mod price_history;
pub mod product;

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use pricewatch_types::error::RepositoryError;
use rust_decimal::Decimal;

fn query_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Query(e.to_string())
}

// Decimals are stored as TEXT so that the scale survives a round trip.
fn format_decimal(d: &Decimal) -> String {
    d.to_string()
}

fn parse_decimal(s: &str) -> Result<Decimal, RepositoryError> {
    Decimal::from_str(s).map_err(|e| RepositoryError::Query(format!("invalid decimal '{s}': {e}")))
}

// Fixed-width UTC timestamps sort lexicographically in time order.
fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}
