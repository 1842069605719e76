//! PostgreSQL product store with connection pooling

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use crate::domain::product::{
    NewProduct, Product, ProductFilter, ProductId, ProductRepository, ProductUpdate,
};
use crate::domain::DomainError;

pub const DEFAULT_TABLE: &str = "products";

/// PostgreSQL connection configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// Idle timeout in seconds
    pub idle_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/products".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    pub fn with_idle_timeout(mut self, secs: u64) -> Self {
        self.idle_timeout_secs = secs;
        self
    }

    /// Opens a connection pool
    pub async fn connect(&self) -> Result<PgPool, DomainError> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(Duration::from_secs(self.connect_timeout_secs))
            .idle_timeout(Duration::from_secs(self.idle_timeout_secs))
            .connect(&self.url)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))
    }
}

/// Product store backed by a PostgreSQL table
#[derive(Debug, Clone)]
pub struct PostgresProductRepository {
    pool: PgPool,
    table_name: String,
}

/// Table names are spliced into SQL text, so only plain identifiers are allowed
pub fn validate_table_name(name: &str) -> Result<(), DomainError> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(DomainError::configuration(format!(
            "invalid table name '{}'",
            name
        )))
    }
}

impl PostgresProductRepository {
    /// Creates a store over an existing pool
    pub fn new(pool: PgPool, table_name: impl Into<String>) -> Result<Self, DomainError> {
        let table_name = table_name.into();
        validate_table_name(&table_name)?;

        Ok(Self { pool, table_name })
    }

    /// Ensures the product table and its availability index exist
    pub async fn ensure_table(&self) -> Result<(), DomainError> {
        let create_table = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                price DOUBLE PRECISION NOT NULL,
                available BOOLEAN NOT NULL DEFAULT TRUE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            table = self.table_name
        );

        sqlx::query(&create_table)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to create table: {}", e)))?;

        let create_index = format!(
            "CREATE INDEX IF NOT EXISTS {table}_available_idx ON {table} (available)",
            table = self.table_name
        );

        sqlx::query(&create_index)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to create index: {}", e)))?;

        Ok(())
    }
}

const COLUMNS: &str = "id, name, price, available, created_at, updated_at";

/// Optional filter fields bound as nullable parameters ($1 id, $2 available); NULL matches every row
const FILTER_CLAUSE: &str =
    "($1::BIGINT IS NULL OR id = $1) AND ($2::BOOLEAN IS NULL OR available = $2)";

/// Binds: name, price
fn insert_sql(table: &str) -> String {
    format!(
        "INSERT INTO {} (name, price) VALUES ($1, $2) RETURNING {}",
        table, COLUMNS
    )
}

/// Binds: filter
fn count_sql(table: &str) -> String {
    format!("SELECT COUNT(*) FROM {} WHERE {}", table, FILTER_CLAUSE)
}

/// Binds: filter, offset, limit
fn select_page_sql(table: &str) -> String {
    format!(
        "SELECT {} FROM {} WHERE {} ORDER BY id OFFSET $3 LIMIT $4",
        COLUMNS, table, FILTER_CLAUSE
    )
}

/// Binds: filter
fn select_first_sql(table: &str) -> String {
    format!(
        "SELECT {} FROM {} WHERE {} ORDER BY id LIMIT 1",
        COLUMNS, table, FILTER_CLAUSE
    )
}

/// Binds: id, name, price, available; NULL keeps the stored value
fn update_sql(table: &str) -> String {
    format!(
        "UPDATE {} SET name = COALESCE($2, name), price = COALESCE($3, price), \
         available = COALESCE($4, available), updated_at = NOW() \
         WHERE id = $1 RETURNING {}",
        table, COLUMNS
    )
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn insert(&self, product: NewProduct) -> Result<Product, DomainError> {
        let row = sqlx::query(&insert_sql(&self.table_name))
            .bind(&product.name)
            .bind(product.price)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to create product: {}", e)))?;

        row_to_product(&row)
    }

    async fn count_where(&self, filter: &ProductFilter) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar(&count_sql(&self.table_name))
            .bind(filter.id.map(|id| id.value()))
            .bind(filter.available)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count products: {}", e)))?;

        Ok(count.max(0) as u64)
    }

    async fn find_many_where(
        &self,
        filter: &ProductFilter,
        skip: u64,
        take: u64,
    ) -> Result<Vec<Product>, DomainError> {
        let rows = sqlx::query(&select_page_sql(&self.table_name))
            .bind(filter.id.map(|id| id.value()))
            .bind(filter.available)
            .bind(i64::try_from(skip).unwrap_or(i64::MAX))
            .bind(i64::try_from(take).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list products: {}", e)))?;

        rows.iter().map(row_to_product).collect()
    }

    async fn find_first_where(
        &self,
        filter: &ProductFilter,
    ) -> Result<Option<Product>, DomainError> {
        let row = sqlx::query(&select_first_sql(&self.table_name))
            .bind(filter.id.map(|id| id.value()))
            .bind(filter.available)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get product: {}", e)))?;

        row.as_ref().map(row_to_product).transpose()
    }

    async fn update_where(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, DomainError> {
        let row = sqlx::query(&update_sql(&self.table_name))
            .bind(id.value())
            .bind(update.name)
            .bind(update.price)
            .bind(update.available)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to update product: {}", e)))?;

        match row {
            Some(row) => row_to_product(&row),
            None => Err(DomainError::product_not_found(id)),
        }
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Database unreachable: {}", e)))?;

        Ok(())
    }
}

fn row_to_product(row: &PgRow) -> Result<Product, DomainError> {
    let read_error = |e: sqlx::Error| DomainError::storage(format!("Invalid product row: {}", e));

    Ok(Product {
        id: ProductId::new(row.try_get("id").map_err(read_error)?),
        name: row.try_get("name").map_err(read_error)?,
        price: row.try_get("price").map_err(read_error)?,
        available: row.try_get("available").map_err(read_error)?,
        created_at: row.try_get("created_at").map_err(read_error)?,
        updated_at: row.try_get("updated_at").map_err(read_error)?,
    })
}
