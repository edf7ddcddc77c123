//! # The Key→JSON Document Store
//!
//! Connection pool management plus the collection read/write
//! primitives everything else builds on.
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     SQLite: store table                         │
//! │                                                                 │
//! │  key                        │ value                             │
//! │  ───────────────────────────┼─────────────────────────────────  │
//! │  kairo_products             │ [ {Product}, {Product}, … ]       │
//! │  kairo_sales                │ [ {DailySale}, … ]                │
//! │  kairo_invoices             │ [ {Invoice}, … ]                  │
//! │  kairo_deferred_payments    │ [ {Invoice snapshot}, … ]         │
//! │  …                          │ …                                 │
//! │  kairo_auth                 │ true                              │
//! │                                                                 │
//! │  A missing key reads as an empty collection. Writes replace     │
//! │  the whole value (single user, read-then-write).                │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The collection helpers are generic over the executor so the same
//! code path serves plain pool access and multi-collection SQL
//! transactions (invoice + deferred, return + linked record, …).

use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Executor, Sqlite, SqlitePool, Transaction};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::StoreResult;
use crate::migrations;

// =============================================================================
// Collection Keys
// =============================================================================

/// The persisted collection keys, carried over verbatim from the
/// legacy storage layout.
pub mod keys {
    pub const PRODUCTS: &str = "kairo_products";
    pub const SALES: &str = "kairo_sales";
    pub const INVOICES: &str = "kairo_invoices";
    pub const INVOICE_ARCHIVE: &str = "kairo_invoice_archive";
    pub const DEFERRED_PAYMENTS: &str = "kairo_deferred_payments";
    pub const CREDIT_SALES: &str = "kairo_credit_sales";
    pub const FAWRY_SALES: &str = "kairo_fawry_sales";
    pub const SALES_RETURNS: &str = "kairo_sales_returns";
    pub const INVOICE_RETURNS: &str = "kairo_invoice_returns";
    pub const AUTH: &str = "kairo_auth";
}

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/path/to/kairo.db").max_connections(2);
/// let db = Database::new(config).await?;
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5 (sufficient for a local single-user app)
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection acquire timeout.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Whether to run migrations on connect.
    /// Default: true
    pub auto_migrate: bool,
}

impl DbConfig {
    /// Creates a configuration with defaults for the given path.
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: database_path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            auto_migrate: true,
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn auto_migrate(mut self, enabled: bool) -> Self {
        self.auto_migrate = enabled;
        self
    }
}

// =============================================================================
// Database
// =============================================================================

/// Handle to the persisted store. Cheap to clone (wraps a pool).
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens (creating if missing) the database and runs migrations.
    pub async fn new(config: DbConfig) -> StoreResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(&config.database_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .connect_with(options)
            .await?;

        if config.auto_migrate {
            migrations::run(&pool).await?;
        }

        info!(path = %config.database_path.display(), "database ready");
        Ok(Database { pool })
    }

    /// The underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Begins a transaction spanning any number of collections.
    pub async fn begin(&self) -> StoreResult<Transaction<'static, Sqlite>> {
        Ok(self.pool.begin().await?)
    }

    /// Reads a typed collection. A missing key is an empty collection.
    pub async fn read<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Vec<T>> {
        read_collection(&self.pool, key).await
    }

    /// Replaces a typed collection.
    pub async fn write<T: Serialize>(&self, key: &str, rows: &[T]) -> StoreResult<()> {
        write_collection(&self.pool, key, rows).await
    }

    /// Reads a raw (non-collection) value, e.g. the auth flag.
    pub async fn get_raw(&self, key: &str) -> StoreResult<Option<String>> {
        fetch_value(&self.pool, key).await
    }

    /// Writes a raw value.
    pub async fn put_raw(&self, key: &str, value: &str) -> StoreResult<()> {
        store_value(&self.pool, key, value).await
    }

    /// Removes a key entirely. Missing keys are a no-op.
    pub async fn remove_raw(&self, key: &str) -> StoreResult<()> {
        sqlx::query("DELETE FROM store WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

// =============================================================================
// Collection Primitives (pool or transaction)
// =============================================================================

/// Reads a typed collection through any executor.
pub(crate) async fn read_collection<'e, E, T>(executor: E, key: &str) -> StoreResult<Vec<T>>
where
    E: Executor<'e, Database = Sqlite>,
    T: DeserializeOwned,
{
    match fetch_value(executor, key).await? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}

/// Replaces a typed collection through any executor.
pub(crate) async fn write_collection<'e, E, T>(executor: E, key: &str, rows: &[T]) -> StoreResult<()>
where
    E: Executor<'e, Database = Sqlite>,
    T: Serialize,
{
    let json = serde_json::to_string(rows)?;
    store_value(executor, key, &json).await?;
    debug!(key = %key, count = rows.len(), "collection written");
    Ok(())
}

async fn fetch_value<'e, E>(executor: E, key: &str) -> StoreResult<Option<String>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let value: Option<String> = sqlx::query_scalar("SELECT value FROM store WHERE key = ?1")
        .bind(key)
        .fetch_optional(executor)
        .await?;
    Ok(value)
}

async fn store_value<'e, E>(executor: E, key: &str, value: &str) -> StoreResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        "INSERT INTO store (key, value) VALUES (?1, ?2) \
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
    )
    .bind(key)
    .bind(value)
    .execute(executor)
    .await?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::open_database;
    use kairo_core::{Money, Product};

    fn product(name: &str, quantity: i64) -> Product {
        Product {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            quantity,
            price: Money::from_piasters(750),
            date: "01/08/2026".to_string(),
        }
    }

    #[tokio::test]
    async fn test_missing_key_reads_as_empty_collection() {
        let (_dir, db) = open_database().await;
        let products: Vec<Product> = db.read(keys::PRODUCTS).await.unwrap();
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_collection_round_trip_preserves_order() {
        let (_dir, db) = open_database().await;

        let original = vec![product("Pipe 2in", 10), product("Elbow 90", 4), product("Tee", 7)];
        db.write(keys::PRODUCTS, &original).await.unwrap();

        let reloaded: Vec<Product> = db.read(keys::PRODUCTS).await.unwrap();
        assert_eq!(reloaded.len(), 3);
        for (a, b) in original.iter().zip(&reloaded) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.name, b.name);
            assert_eq!(a.quantity, b.quantity);
            assert_eq!(a.price, b.price);
            assert_eq!(a.date, b.date);
        }
    }

    #[tokio::test]
    async fn test_write_replaces_whole_collection() {
        let (_dir, db) = open_database().await;

        db.write(keys::PRODUCTS, &[product("Pipe 2in", 10)])
            .await
            .unwrap();
        db.write(keys::PRODUCTS, &[product("Ball Valve", 2)])
            .await
            .unwrap();

        let reloaded: Vec<Product> = db.read(keys::PRODUCTS).await.unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded[0].name, "Ball Valve");
    }

    #[tokio::test]
    async fn test_raw_values() {
        let (_dir, db) = open_database().await;

        assert_eq!(db.get_raw(keys::AUTH).await.unwrap(), None);

        db.put_raw(keys::AUTH, "true").await.unwrap();
        assert_eq!(db.get_raw(keys::AUTH).await.unwrap().as_deref(), Some("true"));

        db.remove_raw(keys::AUTH).await.unwrap();
        assert_eq!(db.get_raw(keys::AUTH).await.unwrap(), None);

        // Removing again is a no-op.
        db.remove_raw(keys::AUTH).await.unwrap();
    }

    #[tokio::test]
    async fn test_transaction_spans_collections() {
        let (_dir, db) = open_database().await;

        let mut tx = db.begin().await.unwrap();
        write_collection(&mut *tx, keys::PRODUCTS, &[product("Pipe 2in", 10)])
            .await
            .unwrap();
        write_collection(&mut *tx, keys::SALES, &Vec::<Product>::new())
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let products: Vec<Product> = db.read(keys::PRODUCTS).await.unwrap();
        assert_eq!(products.len(), 1);
    }

    #[tokio::test]
    async fn test_dropped_transaction_rolls_back() {
        let (_dir, db) = open_database().await;

        {
            let mut tx = db.begin().await.unwrap();
            write_collection(&mut *tx, keys::PRODUCTS, &[product("Pipe 2in", 10)])
                .await
                .unwrap();
            // dropped without commit
        }

        let products: Vec<Product> = db.read(keys::PRODUCTS).await.unwrap();
        assert!(products.is_empty());
    }
}
