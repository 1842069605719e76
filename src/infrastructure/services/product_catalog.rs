//! Product catalog - paginated listing and soft-delete CRUD

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::pagination::{PageResult, PaginationRequest};
use crate::domain::product::{
    NewProduct, Product, ProductFilter, ProductId, ProductRepository, ProductUpdate, UpdateProduct,
};
use crate::domain::DomainError;

/// The five product operations over an injected store
///
/// Unavailable (soft-deleted) products are invisible to every read. Update
/// and remove check existence first and write second, without a transaction
/// around the pair.
#[derive(Clone)]
pub struct ProductCatalog {
    repository: Arc<dyn ProductRepository>,
}

impl ProductCatalog {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    /// Every read path starts from this filter
    fn available_filter() -> ProductFilter {
        ProductFilter::new().with_available(true)
    }

    /// Create a product; the store marks it available
    pub async fn create(&self, input: NewProduct) -> Result<Product, DomainError> {
        info!(name = %input.name, "Creating product");
        self.repository.insert(input).await
    }

    /// List one page of available products
    pub async fn find_all(
        &self,
        request: &PaginationRequest,
    ) -> Result<PageResult<Product>, DomainError> {
        let pagination = request.normalize();
        let filter = Self::available_filter();

        debug!(
            page = pagination.page(),
            limit = pagination.limit(),
            "Listing products"
        );

        let total = self.repository.count_where(&filter).await?;
        let data = self
            .repository
            .find_many_where(&filter, pagination.skip(), pagination.take())
            .await?;

        Ok(PageResult {
            data,
            meta: pagination.meta(total),
        })
    }

    /// Fetch an available product by id
    pub async fn find_one(&self, id: ProductId) -> Result<Product, DomainError> {
        let filter = Self::available_filter().with_id(id);

        self.repository
            .find_first_where(&filter)
            .await?
            .ok_or_else(|| DomainError::product_not_found(id))
    }

    /// Apply a partial update; an `id` in the patch is discarded
    pub async fn update(&self, id: ProductId, patch: UpdateProduct) -> Result<Product, DomainError> {
        info!(id = %id, "Updating product");

        let update = ProductUpdate::from(patch);
        self.find_one(id).await?;

        self.repository.update_where(id, update).await
    }

    /// Soft delete: mark the product unavailable and return it
    pub async fn remove(&self, id: ProductId) -> Result<Product, DomainError> {
        info!(id = %id, "Removing product");

        self.find_one(id).await?;

        self.repository
            .update_where(id, ProductUpdate::mark_unavailable())
            .await
    }

    /// Verify the backing store is reachable
    pub async fn ping(&self) -> Result<(), DomainError> {
        self.repository.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::MockProductRepository;
    use crate::domain::PageMeta;
    use crate::infrastructure::storage::InMemoryProductRepository;

    fn create_catalog() -> ProductCatalog {
        ProductCatalog::new(Arc::new(InMemoryProductRepository::new()))
    }

    async fn seeded_catalog(count: usize) -> ProductCatalog {
        let catalog = create_catalog();

        for n in 1..=count {
            catalog
                .create(NewProduct::new(format!("Product {}", n), n as f64))
                .await
                .unwrap();
        }

        catalog
    }

    #[tokio::test]
    async fn test_create_product() {
        let catalog = create_catalog();

        let product = catalog
            .create(NewProduct::new("Widget", 9.99))
            .await
            .unwrap();

        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.name, "Widget");
        assert_eq!(product.price, 9.99);
        assert!(product.available);
    }

    #[tokio::test]
    async fn test_create_ignores_caller_available_flag() {
        let catalog = create_catalog();
        let input: NewProduct =
            serde_json::from_str(r#"{"name": "Widget", "price": 1.0, "available": false}"#)
                .unwrap();

        let product = catalog.create(input).await.unwrap();
        assert!(product.available);
    }

    #[tokio::test]
    async fn test_find_all_second_page() {
        let catalog = seeded_catalog(12).await;
        let request = PaginationRequest::new().with_page(2).with_limit(5);

        let page = catalog.find_all(&request).await.unwrap();

        let names: Vec<&str> = page.data.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Product 6", "Product 7", "Product 8", "Product 9", "Product 10"]
        );
        assert_eq!(
            page.meta,
            PageMeta {
                total: 12,
                page: 2,
                last_page: 3,
            }
        );
    }

    #[tokio::test]
    async fn test_find_all_normalizes_garbage_input() {
        let catalog = seeded_catalog(12).await;
        let request = PaginationRequest::new().with_page("abc").with_limit(-5);

        let page = catalog.find_all(&request).await.unwrap();

        assert_eq!(page.data.len(), 10);
        assert_eq!(page.meta.page, 1);
        assert_eq!(page.meta.last_page, 2);
    }

    #[tokio::test]
    async fn test_find_all_past_last_page_is_empty() {
        let catalog = seeded_catalog(3).await;
        let request = PaginationRequest::new().with_page(4).with_limit(2);

        let page = catalog.find_all(&request).await.unwrap();

        assert!(page.data.is_empty());
        assert_eq!(page.meta.page, 4);
        assert_eq!(page.meta.last_page, 2);
        assert_eq!(page.meta.total, 3);
    }

    #[tokio::test]
    async fn test_find_all_on_empty_store() {
        let catalog = create_catalog();

        let page = catalog.find_all(&PaginationRequest::new()).await.unwrap();

        assert!(page.data.is_empty());
        assert_eq!(page.meta.total, 0);
        assert_eq!(page.meta.last_page, 0);
    }

    #[tokio::test]
    async fn test_find_one_missing() {
        let catalog = create_catalog();

        let err = catalog.find_one(ProductId::new(1)).await.unwrap_err();
        assert_eq!(err.to_string(), "Product with id #1 not found");
    }

    #[tokio::test]
    async fn test_remove_hides_product_from_reads() {
        let catalog = seeded_catalog(6).await;
        let id = ProductId::new(5);

        let removed = catalog.remove(id).await.unwrap();
        assert_eq!(removed.id, id);
        assert!(!removed.available);

        let err = catalog.find_one(id).await.unwrap_err();
        assert!(matches!(err, DomainError::ProductNotFound { id: missing } if missing == id));

        let page = catalog
            .find_all(&PaginationRequest::new().with_limit(100))
            .await
            .unwrap();
        assert_eq!(page.meta.total, 5);
        assert!(page.data.iter().all(|p| p.id != id));
    }

    #[tokio::test]
    async fn test_remove_twice_reports_not_found() {
        let catalog = seeded_catalog(1).await;
        let id = ProductId::new(1);

        catalog.remove(id).await.unwrap();
        let result = catalog.remove(id).await;

        assert!(matches!(result, Err(DomainError::ProductNotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_keeps_original_id() {
        let catalog = seeded_catalog(2).await;
        let id = ProductId::new(1);
        let patch = UpdateProduct::new().with_id(2).with_name("Renamed");

        let updated = catalog.update(id, patch).await.unwrap();
        assert_eq!(updated.id, id);
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.price, 1.0);

        let fetched = catalog.find_one(id).await.unwrap();
        assert_eq!(fetched.name, "Renamed");

        let other = catalog.find_one(ProductId::new(2)).await.unwrap();
        assert_eq!(other.name, "Product 2");
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let catalog = create_catalog();

        let err = catalog
            .update(ProductId::new(99), UpdateProduct::new().with_name("X"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::ProductNotFound { id } if id == ProductId::new(99)));
        assert!(err.to_string().contains("#99"));
    }

    #[tokio::test]
    async fn test_update_unavailable_product() {
        let catalog = seeded_catalog(1).await;
        let id = ProductId::new(1);
        catalog.remove(id).await.unwrap();

        let result = catalog
            .update(id, UpdateProduct::new().with_name("Back"))
            .await;

        assert!(matches!(result, Err(DomainError::ProductNotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_never_writes_when_missing() {
        let mut mock = MockProductRepository::new();
        mock.expect_find_first_where()
            .withf(|filter| filter.available == Some(true) && filter.id == Some(ProductId::new(7)))
            .times(1)
            .returning(|_| Ok(None));
        mock.expect_update_where().never();

        let catalog = ProductCatalog::new(Arc::new(mock));
        let result = catalog
            .update(ProductId::new(7), UpdateProduct::new().with_price(3.0))
            .await;

        assert!(matches!(result, Err(DomainError::ProductNotFound { .. })));
    }

    #[tokio::test]
    async fn test_remove_never_writes_when_missing() {
        let mut mock = MockProductRepository::new();
        mock.expect_find_first_where().times(1).returning(|_| Ok(None));
        mock.expect_update_where().never();

        let catalog = ProductCatalog::new(Arc::new(mock));
        let result = catalog.remove(ProductId::new(7)).await;

        assert!(matches!(result, Err(DomainError::ProductNotFound { .. })));
    }

    #[tokio::test]
    async fn test_find_all_reads_only_available_rows() {
        let mut mock = MockProductRepository::new();
        mock.expect_count_where()
            .withf(|filter| filter.available == Some(true) && filter.id.is_none())
            .returning(|_| Ok(0));
        mock.expect_find_many_where()
            .withf(|filter, skip, take| filter.available == Some(true) && *skip == 0 && *take == 10)
            .returning(|_, _, _| Ok(Vec::new()));

        let catalog = ProductCatalog::new(Arc::new(mock));
        let page = catalog.find_all(&PaginationRequest::new()).await.unwrap();

        assert!(page.data.is_empty());
    }

    #[tokio::test]
    async fn test_store_errors_propagate_unchanged() {
        let mut mock = MockProductRepository::new();
        mock.expect_count_where()
            .returning(|_| Err(DomainError::storage("connection reset")));

        let catalog = ProductCatalog::new(Arc::new(mock));
        let err = catalog
            .find_all(&PaginationRequest::new())
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Storage { ref message } if message == "connection reset"));
    }
}
