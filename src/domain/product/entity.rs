//! Product entity and the field sets callers and stores exchange

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-generated product identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted product record
///
/// `available = false` marks a soft-deleted product. Rows are never erased.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating a product
///
/// There is no `available` field: the store always starts a product as
/// available, and unknown JSON fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// Partial update sent by callers
///
/// `id` is accepted in any JSON shape but never forwarded to the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateProduct {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl UpdateProduct {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<serde_json::Value>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }
}

/// Partial update applied by a store; `None` leaves the column untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub available: Option<bool>,
}

impl ProductUpdate {
    /// The soft-delete patch
    pub fn mark_unavailable() -> Self {
        Self {
            available: Some(false),
            ..Default::default()
        }
    }

    /// Applies the set fields onto a record
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }

        if let Some(price) = self.price {
            product.price = price;
        }

        if let Some(available) = self.available {
            product.available = available;
        }
    }
}

impl From<UpdateProduct> for ProductUpdate {
    fn from(patch: UpdateProduct) -> Self {
        let UpdateProduct { id: _, name, price } = patch;

        Self {
            name,
            price,
            available: None,
        }
    }
}
