//! # Database Migrations
//!
//! Embedded SQL migrations for the key→JSON store.
//!
//! ## How Migrations Work
//! The `sqlx::migrate!()` macro embeds every SQL file from the
//! `migrations/` directory into the binary at compile time; on startup
//! pending migrations run in filename order and are recorded in the
//! `_sqlx_migrations` table. Safe to run repeatedly.
//!
//! ## Adding New Migrations
//! 1. Create a new file in `migrations/` with the next sequence number
//! 2. Name format: `NNNN_description.sql`
//! 3. Write idempotent SQL (`IF NOT EXISTS` where possible)
//! 4. **NEVER** modify existing migrations - always add new ones

use sqlx::SqlitePool;
use tracing::info;

use crate::error::StoreResult;

/// Embedded migrations from the `migrations/` directory.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Runs all pending database migrations.
pub async fn run(pool: &SqlitePool) -> StoreResult<()> {
    MIGRATOR.run(pool).await?;
    info!("migrations applied");
    Ok(())
}
