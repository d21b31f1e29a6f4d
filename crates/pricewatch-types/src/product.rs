use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Maximum length (in characters) of a product URL.
pub const MAX_URL_LEN: usize = 255;

/// Maximum length (in characters) of a product name.
pub const MAX_NAME_LEN: usize = 255;

/// Maximum length (in characters) of an owner id.
pub const MAX_OWNER_LEN: usize = 255;

/// Fractional digits kept for prices (`DECIMAL(10, 2)`).
pub const PRICE_SCALE: u32 = 2;

/// Total digits allowed for prices.
pub const PRICE_PRECISION: u32 = 10;

/// Fractional digits kept for ratings (`NUMERIC(2, 1)`).
pub const RATING_SCALE: u32 = 1;

/// Total digits allowed for ratings.
pub const RATING_PRECISION: u32 = 2;

/// Auto-assigned product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Identifies whoever owns a product row.
///
/// For HTTP callers this is the `X-Session-ID` header value; for Telegram
/// users it is the sender's numeric id rendered in decimal. Both are
/// persisted verbatim in `products.user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Owner id for a Telegram sender.
    pub fn from_telegram(user_id: u64) -> Self {
        Self(user_id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A monitored product page.
///
/// Only `url` and `user_id` are set on creation. The scraper fills in
/// `name`, `description`, `price` and `rating` once it has visited the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: Option<String>,
    pub description: Option<String>,
    /// One fractional digit, 0.0 to 9.9.
    pub rating: Option<Decimal>,
    pub url: String,
    /// Two fractional digits.
    pub price: Option<Decimal>,
    pub user_id: OwnerId,
}

impl Product {
    pub fn is_owned_by(&self, owner: &OwnerId) -> bool {
        &self.user_id == owner
    }
}

/// One observed price for a product.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord {
    pub id: i64,
    pub product_id: ProductId,
    pub price: Decimal,
    pub recorded_at: DateTime<Utc>,
}

/// Fields observed by the scraper on a single visit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductSnapshot {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub rating: Option<Decimal>,
}

/// Body of `POST /products/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub url: String,
}

/// Public representation of a product. The owner id is never exposed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductView {
    pub id: ProductId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: String,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub rating: Option<Decimal>,
}

impl From<&Product> for ProductView {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            description: p.description.clone(),
            url: p.url.clone(),
            price: p.price,
            rating: p.rating,
        }
    }
}

impl From<Product> for ProductView {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            url: p.url,
            price: p.price,
            rating: p.rating,
        }
    }
}

/// Public representation of a price history row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecordView {
    pub id: i64,
    pub product_id: ProductId,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub recorded_at: DateTime<Utc>,
}

impl From<PriceRecord> for PriceRecordView {
    fn from(r: PriceRecord) -> Self {
        Self {
            id: r.id,
            product_id: r.product_id,
            price: r.price,
            recorded_at: r.recorded_at,
        }
    }
}
