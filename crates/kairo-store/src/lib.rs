//! # kairo-store: Storage Layer for Kairo POS
//!
//! This crate provides persistence for the Kairo POS system: one
//! SQLite file holding a key→JSON `store` table, where each collection
//! (products, sales, invoices, returns, …) lives under its own string
//! key as a JSON array.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Kairo POS Data Flow                         │
//! │                                                                 │
//! │  caller (screen / seed binary / tests)                          │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │                 kairo-store (THIS CRATE)                  │  │
//! │  │                                                           │  │
//! │  │  ┌─────────┐ ┌──────────┐ ┌─────────┐ ┌─────────┐        │  │
//! │  │  │ ledger  │ │ deferred │ │ records │ │ reports │        │  │
//! │  │  │ saves + │ │ settle-  │ │ viewers │ │ filters │        │  │
//! │  │  │ stock   │ │ ments    │ │         │ │         │        │  │
//! │  │  └────┬────┘ └────┬─────┘ └────┬────┘ └────┬────┘        │  │
//! │  │       └───────────┴─────┬──────┴───────────┘             │  │
//! │  │                  ┌──────▼──────┐                         │  │
//! │  │                  │  store.rs   │  key→JSON collections   │  │
//! │  │                  │ (SqlitePool)│  + SQL transactions     │  │
//! │  │                  └─────────────┘                         │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  SQLite database (WAL): single file, single `store` table       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - Pool configuration and the key→JSON primitives
//! - [`migrations`] - Embedded database migrations
//! - [`repository`] - Inventory repository (explicit product CRUD)
//! - [`ledger`] - Transaction recording and stock side effects
//! - [`deferred`] - Deferred-payment settlement
//! - [`records`] - Record viewers (lists, searches, viewer mutations)
//! - [`reports`] - Report generation with date filtering
//! - [`session`] - The thin login gate
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kairo_store::{Database, DbConfig, Ledger};
//! use kairo_core::{Money, PaymentStatus, SaleDraft};
//!
//! let db = Database::new(DbConfig::new("kairo.db")).await?;
//! let ledger = Ledger::new(db.clone());
//!
//! let mut draft = SaleDraft::new();
//! draft.add_item("Pipe 2in", 3, Money::from_piasters(500))?;
//! let sale = ledger
//!     .save_daily_sale(&mut draft, "Ahmed", PaymentStatus::Paid, None)
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod deferred;
pub mod error;
pub mod ledger;
pub mod migrations;
pub mod records;
pub mod reports;
pub mod repository;
pub mod session;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use deferred::DeferredPayments;
pub use error::{StoreError, StoreResult};
pub use ledger::{next_invoice_number, CustomerFields, Ledger, StockAdvisory};
pub use records::Records;
pub use reports::{Report, ReportKind, ReportPeriod, Reports, ReturnEntry};
pub use repository::{InventoryRepository, ProductUpdate};
pub use session::Session;
pub use store::{keys, Database, DbConfig};

// =============================================================================
// Test Support
// =============================================================================

#[cfg(test)]
pub(crate) mod testutil {
    use crate::store::{Database, DbConfig};

    /// Opens a throwaway file-backed database. The TempDir must stay
    /// alive for the duration of the test.
    pub(crate) async fn open_database() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = DbConfig::new(dir.path().join("kairo-test.db")).max_connections(2);
        let db = Database::new(config).await.expect("open test database");
        (dir, db)
    }
}
