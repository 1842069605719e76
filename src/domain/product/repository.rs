//! Product repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{NewProduct, Product, ProductId, ProductUpdate};
use crate::domain::DomainError;

/// Row filter understood by every product store
///
/// Unset fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub id: Option<ProductId>,
    pub available: Option<bool>,
}

impl ProductFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: ProductId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_available(mut self, available: bool) -> Self {
        self.available = Some(available);
        self
    }

    /// Evaluates the filter against a record, for stores that filter in process
    pub fn matches(&self, product: &Product) -> bool {
        self.id.is_none_or(|id| product.id == id)
            && self.available.is_none_or(|available| product.available == available)
    }
}

/// Persistence capability the catalog is built on
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Inserts a new product; the store assigns the id and sets `available`
    async fn insert(&self, product: NewProduct) -> Result<Product, DomainError>;

    /// Counts products matching the filter
    async fn count_where(&self, filter: &ProductFilter) -> Result<u64, DomainError>;

    /// Returns up to `take` matching products after skipping `skip`, ordered by id
    async fn find_many_where(
        &self,
        filter: &ProductFilter,
        skip: u64,
        take: u64,
    ) -> Result<Vec<Product>, DomainError>;

    /// Returns the first matching product, if any
    async fn find_first_where(
        &self,
        filter: &ProductFilter,
    ) -> Result<Option<Product>, DomainError>;

    /// Applies a partial update to the product with the given id
    async fn update_where(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, DomainError>;

    /// Verifies the store is reachable
    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
