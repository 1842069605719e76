//! Product Catalog
//!
//! Paginated listing and soft-delete CRUD for a single product resource:
//! - Loose page/limit input normalized to positive integers
//! - Soft delete via the `available` flag, hidden from every read
//! - In-memory or PostgreSQL product store selected at startup

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use api::state::AppState;
use infrastructure::services::ProductCatalog;
use infrastructure::storage::ProductStore;

/// Open the configured product store
///
/// The caller owns the returned handle and must `close` it on shutdown.
pub async fn open_store(config: &AppConfig) -> anyhow::Result<ProductStore> {
    let storage = config.storage_config()?;
    Ok(ProductStore::open(&storage).await?)
}

/// Create the application state over an opened store
pub fn create_app_state(store: &ProductStore) -> AppState {
    AppState::new(ProductCatalog::new(store.repository()))
}
