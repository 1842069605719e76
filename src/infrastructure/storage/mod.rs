//! Storage infrastructure - Product store implementations

mod factory;
mod in_memory;
mod postgres;

pub use factory::{ProductStore, StorageConfig, StorageType};
pub use in_memory::InMemoryProductRepository;
pub use postgres::{PostgresConfig, PostgresProductRepository, DEFAULT_TABLE};
