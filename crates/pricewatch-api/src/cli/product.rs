//! Operator commands over the product use cases: add, list, remove,
//! history, record.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use rust_decimal::Decimal;

use pricewatch_types::product::{
    OwnerId, PriceRecord, PriceRecordView, Product, ProductId, ProductSnapshot, ProductView,
};

use crate::state::AppState;

pub async fn add_product(state: &AppState, user: &str, url: &str, json: bool) -> Result<()> {
    let product = state
        .product_service
        .add_product(&OwnerId::new(user), url)
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&ProductView::from(&product))?);
        return Ok(());
    }

    println!();
    println!("  {} Product added for monitoring", style("✓").green().bold());
    println!();
    println!("  {}   {}", style("ID:").bold(), style(product.id).cyan());
    println!("  {}  {}", style("URL:").bold(), &product.url);
    println!();

    Ok(())
}

/// List a user's products in a table.
pub async fn list_products(state: &AppState, user: &str, json: bool) -> Result<()> {
    let products = state
        .product_service
        .list_products(&OwnerId::new(user))
        .await?;

    if json {
        let views: Vec<ProductView> = products.iter().map(ProductView::from).collect();
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    if products.is_empty() {
        println!();
        println!(
            "  {} No products for '{}'. Add one with: {}",
            style("i").blue().bold(),
            user,
            style(format!("pricewatch add --user {user} <url>")).yellow()
        );
        println!();
        return Ok(());
    }

    println!();
    println!("{}", products_table(&products));
    println!();
    println!(
        "  {} product{}",
        style(products.len()).bold(),
        if products.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

pub async fn remove_product(
    state: &AppState,
    user: &str,
    product_id: ProductId,
    json: bool,
) -> Result<()> {
    state
        .product_service
        .remove_product(&OwnerId::new(user), product_id)
        .await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "message": "Product deleted" }))?
        );
        return Ok(());
    }

    println!();
    println!(
        "  {} Product {} removed with its price history",
        style("✓").green().bold(),
        style(product_id).cyan()
    );
    println!();

    Ok(())
}

pub async fn price_history(
    state: &AppState,
    user: &str,
    product_id: ProductId,
    json: bool,
) -> Result<()> {
    let records = state
        .product_service
        .price_history(&OwnerId::new(user), product_id)
        .await?;

    if json {
        let views: Vec<PriceRecordView> =
            records.into_iter().map(PriceRecordView::from).collect();
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    println!();
    println!("{}", history_table(&records));
    println!();

    Ok(())
}

/// Store a manual observation, as the scraper would.
pub async fn record_price(
    state: &AppState,
    product_id: ProductId,
    snapshot: ProductSnapshot,
    json: bool,
) -> Result<()> {
    let product = state
        .product_service
        .record_price(product_id, snapshot)
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&ProductView::from(&product))?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Recorded {} for product {}",
        style("✓").green().bold(),
        style(format_decimal(product.price)).cyan(),
        style(product.id).cyan()
    );
    println!();

    Ok(())
}

fn products_table(products: &[Product]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("Name").fg(Color::White),
        Cell::new("URL").fg(Color::White),
        Cell::new("Price").fg(Color::White),
        Cell::new("Rating").fg(Color::White),
    ]);

    for product in products {
        table.add_row(vec![
            Cell::new(product.id).fg(Color::Cyan),
            Cell::new(product.name.as_deref().unwrap_or("-")),
            Cell::new(&product.url),
            Cell::new(format_decimal(product.price)).fg(Color::Green),
            Cell::new(format_decimal(product.rating)).fg(Color::DarkGrey),
        ]);
    }

    table
}

fn history_table(records: &[PriceRecord]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Recorded").fg(Color::White),
        Cell::new("Price").fg(Color::White),
    ]);

    for record in records {
        table.add_row(vec![
            Cell::new(record.recorded_at.format("%Y-%m-%d %H:%M:%S UTC")).fg(Color::DarkGrey),
            Cell::new(record.price).fg(Color::Green),
        ]);
    }

    table
}

fn format_decimal(value: Option<Decimal>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
