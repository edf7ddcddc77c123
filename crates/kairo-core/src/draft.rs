//! # Transaction Drafts
//!
//! In-progress (unsaved) transaction state: line items are collected
//! here, then handed to the storage layer's ledger in one save.
//!
//! ## Draft Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Draft State Operations                       │
//! │                                                                 │
//! │  add_item()    ──► validate fields ──► items.push(item)         │
//! │  remove_item() ──► items.retain(..)   (unsaved list only)       │
//! │  total()       ──► Σ quantity × price                           │
//! │  clear()       ──► items.clear()      (after a successful save) │
//! │                                                                 │
//! │  Items become immutable once the parent transaction is saved.   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Prices are frozen at entry time: a later product price change never
//! rewrites a draft line, let alone a saved one.

use uuid::Uuid;

use crate::error::CoreResult;
use crate::money::Money;
use crate::stock;
use crate::types::{CreditItem, LineItem, Product};
use crate::validation;

// =============================================================================
// Sale Draft
// =============================================================================

/// An in-progress sale, invoice, Fawry sale or return.
///
/// All of those channels collect the same line-item shape; the policy
/// differences only apply at save time.
#[derive(Debug, Clone, Default)]
pub struct SaleDraft {
    items: Vec<LineItem>,
}

impl SaleDraft {
    /// Creates a new empty draft.
    pub fn new() -> Self {
        SaleDraft { items: Vec::new() }
    }

    /// Adds a line item, capturing quantity and price as entered.
    ///
    /// ## Errors
    /// Blank product name, non-positive quantity or negative price.
    pub fn add_item(&mut self, product_name: &str, quantity: i64, price: Money) -> CoreResult<LineItem> {
        let product_name = validation::require_product_name(product_name)?;
        validation::validate_quantity(quantity)?;
        validation::validate_price(price)?;

        let item = LineItem {
            id: Uuid::new_v4().to_string(),
            product_name,
            quantity,
            price,
            total: price.multiply_quantity(quantity),
        };
        self.items.push(item.clone());
        Ok(item)
    }

    /// Removes an item from the in-progress list. Unknown ids are a
    /// no-op; saved transactions are never touched from here.
    pub fn remove_item(&mut self, id: &str) {
        self.items.retain(|item| item.id != id);
    }

    /// Sum of line totals.
    pub fn total(&self) -> Money {
        self.items.iter().map(|item| item.total).sum()
    }

    /// The collected line items, in entry order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Clears the draft (called after a successful save).
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

// =============================================================================
// Credit Draft
// =============================================================================

/// An in-progress credit sale.
///
/// Credit items differ from plain line items in two ways: the price is
/// copied from the product's current price rather than typed in, and
/// availability is enforced at entry: the only channel that blocks on
/// stock.
#[derive(Debug, Clone, Default)]
pub struct CreditDraft {
    items: Vec<CreditItem>,
}

impl CreditDraft {
    pub fn new() -> Self {
        CreditDraft { items: Vec::new() }
    }

    /// Adds a credit item for `quantity` units of `product`.
    ///
    /// ## Errors
    /// Non-positive quantity, negative paid amount, or quantity above
    /// the product's current stock (the error names requested vs
    /// available, e.g. "requested quantity (5) exceeds available
    /// stock (3)"). On error no item is added.
    pub fn add_item(
        &mut self,
        product: &Product,
        quantity: i64,
        amount_paid: Money,
    ) -> CoreResult<CreditItem> {
        validation::validate_quantity(quantity)?;
        validation::validate_paid_amount(amount_paid)?;
        stock::availability(std::slice::from_ref(product), &product.name, quantity)?;

        let total = product.price.multiply_quantity(quantity);
        let item = CreditItem {
            id: Uuid::new_v4().to_string(),
            product_name: product.name.clone(),
            quantity,
            price: product.price,
            amount_paid,
            remaining_amount: total - amount_paid,
        };
        self.items.push(item.clone());
        Ok(item)
    }

    pub fn remove_item(&mut self, id: &str) {
        self.items.retain(|item| item.id != id);
    }

    /// Sum of up-front paid amounts.
    pub fn total_paid(&self) -> Money {
        self.items.iter().map(|item| item.amount_paid).sum()
    }

    /// Sum of outstanding remainders.
    pub fn total_remaining(&self) -> Money {
        self.items.iter().map(|item| item.remaining_amount).sum()
    }

    pub fn items(&self) -> &[CreditItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn pipe(quantity: i64) -> Product {
        Product {
            id: Uuid::new_v4().to_string(),
            name: "Pipe 2in".to_string(),
            quantity,
            price: Money::from_piasters(500),
            date: "01/08/2026".to_string(),
        }
    }

    #[test]
    fn test_add_item_computes_line_total() {
        let mut draft = SaleDraft::new();
        let item = draft
            .add_item("Pipe 2in", 3, Money::from_piasters(500))
            .unwrap();
        assert_eq!(item.total, Money::from_piasters(1500));
        assert_eq!(draft.total(), Money::from_piasters(1500));
        assert_eq!(draft.item_count(), 1);
    }

    #[test]
    fn test_add_item_rejects_bad_fields() {
        let mut draft = SaleDraft::new();
        assert!(draft.add_item("", 3, Money::from_piasters(500)).is_err());
        assert!(draft.add_item("Pipe", 0, Money::from_piasters(500)).is_err());
        assert!(draft.add_item("Pipe", 3, Money::from_piasters(-1)).is_err());
        assert!(draft.is_empty());
    }

    #[test]
    fn test_remove_item() {
        let mut draft = SaleDraft::new();
        let kept = draft.add_item("Pipe", 1, Money::from_piasters(100)).unwrap();
        let removed = draft.add_item("Elbow", 2, Money::from_piasters(200)).unwrap();

        draft.remove_item(&removed.id);
        assert_eq!(draft.item_count(), 1);
        assert_eq!(draft.items()[0].id, kept.id);

        // Unknown id is a no-op.
        draft.remove_item("missing");
        assert_eq!(draft.item_count(), 1);
    }

    #[test]
    fn test_total_sums_all_items() {
        let mut draft = SaleDraft::new();
        draft.add_item("Pipe", 3, Money::from_piasters(500)).unwrap();
        draft.add_item("Elbow", 2, Money::from_piasters(250)).unwrap();
        assert_eq!(draft.total(), Money::from_piasters(2000));
    }

    #[test]
    fn test_credit_add_item_uses_current_product_price() {
        let mut draft = CreditDraft::new();
        let item = draft
            .add_item(&pipe(10), 3, Money::from_piasters(1000))
            .unwrap();
        assert_eq!(item.price, Money::from_piasters(500));
        assert_eq!(item.remaining_amount, Money::from_piasters(500));
        assert_eq!(draft.total_paid(), Money::from_piasters(1000));
        assert_eq!(draft.total_remaining(), Money::from_piasters(500));
    }

    #[test]
    fn test_credit_add_item_rejects_insufficient_stock() {
        let mut draft = CreditDraft::new();
        let err = draft
            .add_item(&pipe(3), 5, Money::from_piasters(500))
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 3,
                requested: 5,
                ..
            }
        ));
        // No line item was added.
        assert!(draft.is_empty());
    }

    #[test]
    fn test_credit_add_item_allows_exact_stock() {
        let mut draft = CreditDraft::new();
        assert!(draft.add_item(&pipe(5), 5, Money::zero()).is_ok());
    }
}
