//! # kairo-core: Pure Business Logic for Kairo POS
//!
//! This crate is the **heart** of Kairo POS, a point-of-sale and
//! inventory tracker for a single small retail business. It contains
//! all business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Kairo POS Architecture                      │
//! │                                                                 │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │              ★ kairo-core (THIS CRATE) ★                  │  │
//! │  │                                                           │  │
//! │  │  ┌────────┐ ┌────────┐ ┌────────┐ ┌─────────┐ ┌────────┐  │  │
//! │  │  │ types  │ │ money  │ │ draft  │ │  stock  │ │payment │  │  │
//! │  │  │Product │ │ Money  │ │ Sale/  │ │ policy+ │ │settle- │  │  │
//! │  │  │Sale …  │ │piasters│ │ Credit │ │ mutate  │ │ ment   │  │  │
//! │  │  └────────┘ └────────┘ └────────┘ └─────────┘ └────────┘  │  │
//! │  │                                                           │  │
//! │  │  NO I/O • NO DATABASE • PURE FUNCTIONS                    │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │                                │                                │
//! │  ┌─────────────────────────────▼───────────────────────────┐    │
//! │  │              kairo-store (Storage Layer)                │    │
//! │  │   key→JSON document store, ledger, reports, session     │    │
//! │  └─────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, DailySale, Invoice, returns, …)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`draft`] - In-progress transaction state (line items before save)
//! - [`stock`] - The shared inventory ledger rules and channel policies
//! - [`payment`] - Settlement derivation and partial payments
//! - [`validation`] - Field validation
//! - [`dates`] - Business-date strings (DD/MM/YYYY)
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every function is deterministic given its
//!    inputs; the storage layer supplies "now" where needed
//! 2. **No I/O**: database and file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are piasters (i64)
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use kairo_core::draft::SaleDraft;
//! use kairo_core::money::Money;
//! use kairo_core::payment::derive_settlement;
//! use kairo_core::types::PaymentStatus;
//!
//! let mut draft = SaleDraft::new();
//! draft.add_item("Pipe 2in", 3, Money::from_piasters(500)).unwrap();
//!
//! let settlement = derive_settlement(draft.total(), PaymentStatus::Paid, None);
//! assert_eq!(settlement.paid_amount.piasters(), 1500);
//! assert_eq!(settlement.remaining_amount.piasters(), 0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod dates;
pub mod draft;
pub mod error;
pub mod money;
pub mod payment;
pub mod stock;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use kairo_core::Money` instead of
// `use kairo_core::money::Money`

pub use draft::{CreditDraft, SaleDraft};
pub use error::{CoreError, CoreResult, ValidationError, ValidationResult};
pub use money::Money;
pub use payment::{derive_settlement, Settlement};
pub use stock::ChannelPolicy;
pub use types::*;
