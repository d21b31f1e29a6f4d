//! Plain-text rendering of products and price records for chat replies.

use std::fmt::Display;

use pricewatch_types::product::{PriceRecord, Product};

const MISSING: &str = "-";

/// One product entry, terminated by a blank line.
pub fn product_entry(product: &Product) -> String {
    format!(
        "ID: {}\nName: {}\nDescription: {}\nURL: {}\nPrice: {}\nRating: {}\n\n",
        product.id,
        or_missing(product.name.as_deref()),
        or_missing(product.description.as_deref()),
        product.url,
        or_missing(product.price.as_ref()),
        or_missing(product.rating.as_ref()),
    )
}

/// One price history entry, terminated by a blank line.
pub fn price_entry(record: &PriceRecord) -> String {
    format!(
        "Product ID: {}\nPrice: {}\nDate: {}\n\n",
        record.product_id,
        record.price,
        record.recorded_at.format("%Y-%m-%d %H:%M:%S UTC"),
    )
}

fn or_missing<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| v.to_string())
}
