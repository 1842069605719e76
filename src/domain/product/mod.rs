//! Product domain module
//!
//! Products are soft-deleted: removal flips `available` to false and every
//! read treats unavailable rows as missing.

mod entity;
mod repository;

pub use entity::{NewProduct, Product, ProductId, ProductUpdate, UpdateProduct};
pub use repository::{ProductFilter, ProductRepository};

#[cfg(test)]
pub use repository::MockProductRepository;
