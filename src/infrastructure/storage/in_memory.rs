//! In-memory product store

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::product::{
    NewProduct, Product, ProductFilter, ProductId, ProductRepository, ProductUpdate,
};
use crate::domain::DomainError;

#[derive(Debug)]
struct Table {
    rows: BTreeMap<ProductId, Product>,
    next_id: i64,
}

/// Thread-safe in-memory product store
///
/// Ids are assigned sequentially from 1 and rows iterate in id order.
/// Data is lost when the process terminates.
#[derive(Debug)]
pub struct InMemoryProductRepository {
    table: RwLock<Table>,
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryProductRepository {
    /// Creates a new empty store
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Table>, DomainError> {
        self.table
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Table>, DomainError> {
        self.table
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, product: NewProduct) -> Result<Product, DomainError> {
        let mut table = self.write()?;

        let id = ProductId::new(table.next_id);
        table.next_id += 1;

        let now = Utc::now();
        let record = Product {
            id,
            name: product.name,
            price: product.price,
            available: true,
            created_at: now,
            updated_at: now,
        };

        table.rows.insert(id, record.clone());
        Ok(record)
    }

    async fn count_where(&self, filter: &ProductFilter) -> Result<u64, DomainError> {
        let table = self.read()?;
        let count = table.rows.values().filter(|p| filter.matches(p)).count();

        Ok(count as u64)
    }

    async fn find_many_where(
        &self,
        filter: &ProductFilter,
        skip: u64,
        take: u64,
    ) -> Result<Vec<Product>, DomainError> {
        let table = self.read()?;
        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let take = usize::try_from(take).unwrap_or(usize::MAX);

        Ok(table
            .rows
            .values()
            .filter(|p| filter.matches(p))
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }

    async fn find_first_where(
        &self,
        filter: &ProductFilter,
    ) -> Result<Option<Product>, DomainError> {
        let table = self.read()?;

        if let Some(id) = filter.id {
            return Ok(table.rows.get(&id).filter(|p| filter.matches(p)).cloned());
        }

        Ok(table.rows.values().find(|p| filter.matches(p)).cloned())
    }

    async fn update_where(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, DomainError> {
        let mut table = self.write()?;

        let product = table
            .rows
            .get_mut(&id)
            .ok_or_else(|| DomainError::product_not_found(id))?;

        update.apply_to(product);
        product.updated_at = Utc::now();

        Ok(product.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(n: usize) -> NewProduct {
        NewProduct::new(format!("Widget {}", n), n as f64)
    }

    async fn seeded(count: usize) -> InMemoryProductRepository {
        let store = InMemoryProductRepository::new();

        for n in 1..=count {
            store.insert(widget(n)).await.unwrap();
        }

        store
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let store = InMemoryProductRepository::new();

        let first = store.insert(widget(1)).await.unwrap();
        let second = store.insert(widget(2)).await.unwrap();

        assert_eq!(first.id, ProductId::new(1));
        assert_eq!(second.id, ProductId::new(2));
        assert!(first.available);
        assert_eq!(first.created_at, first.updated_at);
    }

    #[tokio::test]
    async fn test_count_where_filters() {
        let store = seeded(3).await;
        store
            .update_where(ProductId::new(2), ProductUpdate::mark_unavailable())
            .await
            .unwrap();

        let all = store.count_where(&ProductFilter::new()).await.unwrap();
        let available = store
            .count_where(&ProductFilter::new().with_available(true))
            .await
            .unwrap();

        assert_eq!(all, 3);
        assert_eq!(available, 2);
    }

    #[tokio::test]
    async fn test_find_many_where_orders_by_id_and_windows() {
        let store = seeded(12).await;

        let page = store
            .find_many_where(&ProductFilter::new(), 5, 5)
            .await
            .unwrap();

        let ids: Vec<i64> = page.iter().map(|p| p.id.value()).collect();
        assert_eq!(ids, vec![6, 7, 8, 9, 10]);
    }

    #[tokio::test]
    async fn test_find_many_where_skip_past_end() {
        let store = seeded(3).await;

        let page = store
            .find_many_where(&ProductFilter::new(), u64::MAX, 10)
            .await
            .unwrap();

        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn test_find_first_where_respects_availability() {
        let store = seeded(2).await;
        store
            .update_where(ProductId::new(1), ProductUpdate::mark_unavailable())
            .await
            .unwrap();

        let filter = ProductFilter::new()
            .with_id(ProductId::new(1))
            .with_available(true);
        assert!(store.find_first_where(&filter).await.unwrap().is_none());

        let filter = ProductFilter::new().with_available(true);
        let first = store.find_first_where(&filter).await.unwrap().unwrap();
        assert_eq!(first.id, ProductId::new(2));
    }

    #[tokio::test]
    async fn test_update_where_applies_partial_fields() {
        let store = seeded(1).await;
        let update = ProductUpdate {
            price: Some(42.0),
            ..Default::default()
        };

        let updated = store.update_where(ProductId::new(1), update).await.unwrap();

        assert_eq!(updated.name, "Widget 1");
        assert_eq!(updated.price, 42.0);
        assert!(updated.updated_at >= updated.created_at);
    }

    #[tokio::test]
    async fn test_update_where_missing_row() {
        let store = InMemoryProductRepository::new();

        let result = store
            .update_where(ProductId::new(9), ProductUpdate::mark_unavailable())
            .await;

        assert!(matches!(
            result,
            Err(DomainError::ProductNotFound { id }) if id == ProductId::new(9)
        ));
    }
}
