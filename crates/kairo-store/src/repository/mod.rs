//! # Repositories
//!
//! Typed access to individual collections. The inventory repository is
//! the write-side owner of `kairo_products` for explicit product
//! management; sale/return side effects on stock go through the
//! [`crate::ledger`] so they share one transaction with the
//! transaction logs.

pub mod inventory;

pub use inventory::{InventoryRepository, ProductUpdate};
