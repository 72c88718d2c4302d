//! The catalog store boundary.
//!
//! [`ProductStore`] is the persistence contract the service layer depends on.
//! [`PgProductStore`] backs it with PostgreSQL via [`ProductRepo`];
//! [`InMemoryProductStore`] keeps records in process memory for local runs
//! and tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use ecom_core::types::DbId;
use tokio::sync::RwLock;

use crate::models::product::Product;
use crate::repositories::ProductRepo;
use crate::DbPool;

/// Durable storage for [`Product`] records.
///
/// Errors are reported as [`sqlx::Error`] regardless of backend so callers
/// classify them in one place.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Every stored product, ordered by ID.
    async fn find_all(&self) -> Result<Vec<Product>, sqlx::Error>;

    /// The product with `id`, or `None` if absent.
    async fn find_by_id(&self, id: DbId) -> Result<Option<Product>, sqlx::Error>;

    /// Persist `product`.
    ///
    /// Inserts when `product_id` is `None` and returns the record with its
    /// assigned ID. Otherwise overwrites the existing record, failing with
    /// [`sqlx::Error::RowNotFound`] if there is none.
    async fn save(&self, product: Product) -> Result<Product, sqlx::Error>;
}

// ---------------------------------------------------------------------------
// PostgreSQL
// ---------------------------------------------------------------------------

/// [`ProductStore`] backed by the `products` table.
#[derive(Debug, Clone)]
pub struct PgProductStore {
    pool: DbPool,
}

impl PgProductStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn find_all(&self) -> Result<Vec<Product>, sqlx::Error> {
        ProductRepo::list(&self.pool).await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        ProductRepo::find_by_id(&self.pool, id).await
    }

    async fn save(&self, product: Product) -> Result<Product, sqlx::Error> {
        match product.product_id {
            None => ProductRepo::create(&self.pool, &product).await,
            Some(id) => ProductRepo::replace(&self.pool, id, &product)
                .await?
                .ok_or(sqlx::Error::RowNotFound),
        }
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// [`ProductStore`] holding records in a map. IDs start at 1 and are never
/// reused.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    inner: RwLock<MemoryTable>,
}

#[derive(Debug, Default)]
struct MemoryTable {
    rows: BTreeMap<DbId, Product>,
    last_id: DbId,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn find_all(&self) -> Result<Vec<Product>, sqlx::Error> {
        let table = self.inner.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let table = self.inner.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn save(&self, mut product: Product) -> Result<Product, sqlx::Error> {
        let mut table = self.inner.write().await;
        let id = match product.product_id {
            Some(id) if table.rows.contains_key(&id) => id,
            Some(_) => return Err(sqlx::Error::RowNotFound),
            None => {
                table.last_id += 1;
                table.last_id
            }
        };
        product.product_id = Some(id);
        table.rows.insert(id, product.clone());
        Ok(product)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
