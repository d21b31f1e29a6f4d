//! In-memory repository used by the core unit tests.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use pricewatch_types::error::RepositoryError;
use pricewatch_types::product::{OwnerId, PriceRecord, Product, ProductId, ProductSnapshot};
use rust_decimal::Decimal;

use crate::repository::price_history::PriceHistoryRepository;
use crate::repository::product::ProductRepository;
use crate::service::product::ProductService;

#[derive(Default)]
struct State {
    products: Vec<Product>,
    history: Vec<PriceRecord>,
    next_product_id: i64,
    next_record_id: i64,
}

/// Shared in-memory store. Clones see the same data, so one store can back
/// both repository traits.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

pub fn service() -> ProductService<InMemoryStore, InMemoryStore> {
    let store = InMemoryStore::default();
    ProductService::new(store.clone(), store)
}

impl ProductRepository for InMemoryStore {
    async fn create(&self, url: &str, owner: &OwnerId) -> Result<Product, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        state.next_product_id += 1;
        let product = Product {
            id: ProductId(state.next_product_id),
            name: None,
            description: None,
            rating: None,
            url: url.to_string(),
            price: None,
            user_id: owner.clone(),
        };
        state.products.push(product.clone());
        Ok(product)
    }

    async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.products.iter().find(|p| p.id == id).cloned())
    }

    async fn list_by_owner(&self, owner: &OwnerId) -> Result<Vec<Product>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .products
            .iter()
            .filter(|p| &p.user_id == owner)
            .cloned()
            .collect())
    }

    async fn delete_with_history(&self, id: ProductId) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        if !state.products.iter().any(|p| p.id == id) {
            return Err(RepositoryError::NotFound);
        }
        state.history.retain(|r| r.product_id != id);
        state.products.retain(|p| p.id != id);
        Ok(())
    }

    async fn update_snapshot(
        &self,
        id: ProductId,
        snapshot: &ProductSnapshot,
    ) -> Result<Product, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let product = state
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepositoryError::NotFound)?;
        product.name = snapshot.name.clone();
        product.description = snapshot.description.clone();
        product.price = snapshot.price;
        product.rating = snapshot.rating;
        Ok(product.clone())
    }
}

impl PriceHistoryRepository for InMemoryStore {
    async fn record(
        &self,
        product_id: ProductId,
        price: Decimal,
        recorded_at: DateTime<Utc>,
    ) -> Result<PriceRecord, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        if !state.products.iter().any(|p| p.id == product_id) {
            return Err(RepositoryError::NotFound);
        }
        state.next_record_id += 1;
        let record = PriceRecord {
            id: state.next_record_id,
            product_id,
            price,
            recorded_at,
        };
        state.history.push(record.clone());
        Ok(record)
    }

    async fn list_for_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<PriceRecord>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .history
            .iter()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect())
    }
}

/// Store whose every call fails as a broken database would.
#[derive(Clone, Copy, Default)]
pub struct FailingStore;

pub fn failing_service() -> ProductService<FailingStore, FailingStore> {
    ProductService::new(FailingStore, FailingStore)
}

fn broken() -> RepositoryError {
    RepositoryError::Query("database is locked".to_string())
}

impl ProductRepository for FailingStore {
    async fn create(&self, _url: &str, _owner: &OwnerId) -> Result<Product, RepositoryError> {
        Err(broken())
    }

    async fn get_by_id(&self, _id: ProductId) -> Result<Option<Product>, RepositoryError> {
        Err(broken())
    }

    async fn list_by_owner(&self, _owner: &OwnerId) -> Result<Vec<Product>, RepositoryError> {
        Err(broken())
    }

    async fn delete_with_history(&self, _id: ProductId) -> Result<(), RepositoryError> {
        Err(broken())
    }

    async fn update_snapshot(
        &self,
        _id: ProductId,
        _snapshot: &ProductSnapshot,
    ) -> Result<Product, RepositoryError> {
        Err(broken())
    }
}

impl PriceHistoryRepository for FailingStore {
    async fn record(
        &self,
        _product_id: ProductId,
        _price: Decimal,
        _recorded_at: DateTime<Utc>,
    ) -> Result<PriceRecord, RepositoryError> {
        Err(broken())
    }

    async fn list_for_product(
        &self,
        _product_id: ProductId,
    ) -> Result<Vec<PriceRecord>, RepositoryError> {
        Err(broken())
    }
}
