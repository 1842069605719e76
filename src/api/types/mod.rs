//! HTTP boundary types

pub mod error;
pub mod json;
pub mod query;

pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use json::Json;
pub use query::Query;
