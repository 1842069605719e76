//! Application state shared by request handlers

use std::sync::Arc;

use crate::domain::ProductRepository;
use crate::infrastructure::services::ProductCatalog;

#[derive(Clone)]
pub struct AppState {
    pub catalog: ProductCatalog,
}

impl AppState {
    pub fn new(catalog: ProductCatalog) -> Self {
        Self { catalog }
    }

    /// State over a store handle
    pub fn from_repository(repository: Arc<dyn ProductRepository>) -> Self {
        Self::new(ProductCatalog::new(repository))
    }
}
