//! Application state wiring the product service to the SQLite store.
//!
//! The service is generic over the repository traits; AppState pins it to
//! the infra implementations. The REST service, the bot and the CLI all
//! build one of these from the same persistence handle.

use std::sync::Arc;

use pricewatch_core::service::product::ProductService;
use pricewatch_infra::sqlite::pool::DatabasePool;
use pricewatch_infra::sqlite::price_history::SqlitePriceHistoryRepository;
use pricewatch_infra::sqlite::product::SqliteProductRepository;
use pricewatch_types::config::DatabaseConfig;

pub type ConcreteProductService =
    ProductService<SqliteProductRepository, SqlitePriceHistoryRepository>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub product_service: Arc<ConcreteProductService>,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Open the database, ensure the schema exists and wire the service.
    pub async fn init(config: &DatabaseConfig) -> anyhow::Result<Self> {
        let db_pool = DatabasePool::open(config).await?;
        Ok(Self::from_pool(db_pool))
    }

    pub fn from_pool(db_pool: DatabasePool) -> Self {
        let product_service = ProductService::new(
            SqliteProductRepository::new(db_pool.clone()),
            SqlitePriceHistoryRepository::new(db_pool.clone()),
        );
        Self {
            product_service: Arc::new(product_service),
            db_pool,
        }
    }
}
