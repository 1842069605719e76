//! Domain layer - Core business logic and entities

pub mod error;
pub mod pagination;
pub mod product;

pub use error::DomainError;
pub use pagination::{PageMeta, PageResult, Pagination, PaginationRequest, RawParam};
pub use product::{
    NewProduct, Product, ProductFilter, ProductId, ProductRepository, ProductUpdate, UpdateProduct,
};
