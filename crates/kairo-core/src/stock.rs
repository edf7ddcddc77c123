//! # Stock Ledger Rules
//!
//! The shared inventory ledger: every sales channel and both return
//! flows mutate the same product list, differing only in a small policy.
//! This module holds that policy and the pure mutation functions, so the
//! arithmetic exists exactly once instead of once per screen.
//!
//! ## Channel Matrix
//! ```text
//! ┌─────────────────┬───────────┬──────────┬─────────┬──────────┐
//! │ channel         │ inventory │ clamp @0 │ enforce │ deferred │
//! ├─────────────────┼───────────┼──────────┼─────────┼──────────┤
//! │ daily sale      │    yes    │   yes    │   no    │    no    │
//! │ invoice         │    yes    │   yes    │   no    │   yes    │
//! │ invoice archive │    no     │    -     │   no    │    no    │
//! │ fawry sale      │    no     │    -     │   no    │    no    │
//! │ credit sale     │    yes    │   no     │  yes    │    no    │
//! └─────────────────┴───────────┴──────────┴─────────┴──────────┘
//! ```
//!
//! ## Name Matching
//! All functions here match products by exact name and stop at the
//! first match in insertion order. Duplicate names are a known hazard
//! of the persisted layout; id-based lookup lives on the inventory
//! repository for callers that can use it.

use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CreditItem, LineItem, Product};

// =============================================================================
// Stock Line
// =============================================================================

/// What the ledger needs to know about a line item.
///
/// Plain line items and credit items carry different settlement fields
/// but mutate stock the same way; this trait is the seam between them.
pub trait StockLine {
    fn product_name(&self) -> &str;
    fn quantity(&self) -> i64;
    /// Captured unit price, used when a return has to recreate a
    /// deleted product.
    fn price(&self) -> Money;
}

impl StockLine for LineItem {
    fn product_name(&self) -> &str {
        &self.product_name
    }

    fn quantity(&self) -> i64 {
        self.quantity
    }

    fn price(&self) -> Money {
        self.price
    }
}

impl StockLine for CreditItem {
    fn product_name(&self) -> &str {
        &self.product_name
    }

    fn quantity(&self) -> i64 {
        self.quantity
    }

    fn price(&self) -> Money {
        self.price
    }
}

// =============================================================================
// Channel Policy
// =============================================================================

/// Behavior switches for a transaction channel.
///
/// The recorder logic is identical across channels; only these switches
/// differ. Keeping the switches in data keeps the channels from
/// drifting apart as they evolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelPolicy {
    /// Whether saving deducts quantities from the inventory.
    pub affects_inventory: bool,
    /// Whether deduction floors the resulting quantity at zero.
    pub clamp_at_zero: bool,
    /// Whether line items are rejected when stock is insufficient.
    pub enforce_stock: bool,
    /// Whether unsettled saves are mirrored into the deferred log.
    pub mirrors_to_deferred: bool,
}

/// Daily sale: deducts stock, clamped at zero.
pub const DAILY_SALE: ChannelPolicy = ChannelPolicy {
    affects_inventory: true,
    clamp_at_zero: true,
    enforce_stock: false,
    mirrors_to_deferred: false,
};

/// Invoice: deducts stock clamped at zero, mirrors partial/pending
/// saves into the deferred-payment log.
pub const INVOICE: ChannelPolicy = ChannelPolicy {
    affects_inventory: true,
    clamp_at_zero: true,
    enforce_stock: false,
    mirrors_to_deferred: true,
};

/// Invoice archive: record-keeping only, never touches stock.
pub const INVOICE_ARCHIVE: ChannelPolicy = ChannelPolicy {
    affects_inventory: false,
    clamp_at_zero: false,
    enforce_stock: false,
    mirrors_to_deferred: false,
};

/// Fawry sale: a separate payment channel, never touches stock.
pub const FAWRY_SALE: ChannelPolicy = ChannelPolicy {
    affects_inventory: false,
    clamp_at_zero: false,
    enforce_stock: false,
    mirrors_to_deferred: false,
};

/// Credit sale: enforces availability up front, then deducts without
/// clamping.
pub const CREDIT_SALE: ChannelPolicy = ChannelPolicy {
    affects_inventory: true,
    clamp_at_zero: false,
    enforce_stock: true,
    mirrors_to_deferred: false,
};

// =============================================================================
// Stock Mutations
// =============================================================================

/// Deducts sold quantities from the inventory according to the channel
/// policy.
///
/// For each line item the first product with an exactly matching name
/// loses the item's quantity; clamped channels floor the result at
/// zero. Items whose name matches nothing are skipped; the sale still
/// records, the inventory just has nothing to deduct from.
pub fn deduct<L: StockLine>(products: &mut [Product], items: &[L], policy: &ChannelPolicy) {
    if !policy.affects_inventory {
        return;
    }

    for item in items {
        if let Some(product) = products.iter_mut().find(|p| p.name == item.product_name()) {
            let next = product.quantity - item.quantity();
            product.quantity = if policy.clamp_at_zero { next.max(0) } else { next };
        }
    }
}

/// Restores returned quantities to the inventory, creating products
/// that no longer exist.
///
/// A freshly created product takes the line item's captured price and
/// the supplied business date.
pub fn restock<L: StockLine>(products: &mut Vec<Product>, items: &[L], date: &str) {
    for item in items {
        match products.iter_mut().find(|p| p.name == item.product_name()) {
            Some(product) => product.quantity += item.quantity(),
            None => products.push(Product {
                id: Uuid::new_v4().to_string(),
                name: item.product_name().to_string(),
                quantity: item.quantity(),
                price: item.price(),
                date: date.to_string(),
            }),
        }
    }
}

/// Puts a deleted transaction's quantities back, without creating
/// missing products.
///
/// Used when a sale or invoice record is deleted from a viewer; unlike
/// [`restock`], names with no match are ignored.
pub fn restore<L: StockLine>(products: &mut [Product], items: &[L]) {
    for item in items {
        if let Some(product) = products.iter_mut().find(|p| p.name == item.product_name()) {
            product.quantity += item.quantity();
        }
    }
}

/// Checks whether `requested` units of the named product are available.
///
/// Only stock-enforcing channels call this; the error carries the
/// requested and available quantities for the user-facing message.
pub fn availability(products: &[Product], name: &str, requested: i64) -> CoreResult<()> {
    let product = products
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| CoreError::ProductNotFound(name.to_string()))?;

    if requested > product.quantity {
        return Err(CoreError::InsufficientStock {
            name: name.to_string(),
            available: product.quantity,
            requested,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn product(name: &str, quantity: i64) -> Product {
        Product {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            quantity,
            price: Money::from_piasters(500),
            date: "01/08/2026".to_string(),
        }
    }

    fn item(name: &str, quantity: i64) -> LineItem {
        LineItem {
            id: Uuid::new_v4().to_string(),
            product_name: name.to_string(),
            quantity,
            price: Money::from_piasters(500),
            total: Money::from_piasters(500 * quantity),
        }
    }

    #[test]
    fn test_deduct_clamped_floors_at_zero() {
        let mut products = vec![product("Pipe 2in", 3)];
        deduct(&mut products, &[item("Pipe 2in", 5)], &DAILY_SALE);
        assert_eq!(products[0].quantity, 0);
    }

    #[test]
    fn test_deduct_unclamped_goes_negative() {
        let mut products = vec![product("Pipe 2in", 3)];
        deduct(&mut products, &[item("Pipe 2in", 5)], &CREDIT_SALE);
        assert_eq!(products[0].quantity, -2);
    }

    #[test]
    fn test_deduct_skips_unknown_names() {
        let mut products = vec![product("Pipe 2in", 3)];
        deduct(&mut products, &[item("Elbow 90", 2)], &DAILY_SALE);
        assert_eq!(products[0].quantity, 3);
    }

    #[test]
    fn test_deduct_respects_non_inventory_channels() {
        let mut products = vec![product("Pipe 2in", 3)];
        deduct(&mut products, &[item("Pipe 2in", 2)], &FAWRY_SALE);
        deduct(&mut products, &[item("Pipe 2in", 2)], &INVOICE_ARCHIVE);
        assert_eq!(products[0].quantity, 3);
    }

    #[test]
    fn test_deduct_matches_first_duplicate_name() {
        let mut products = vec![product("Pipe 2in", 3), product("Pipe 2in", 10)];
        deduct(&mut products, &[item("Pipe 2in", 2)], &DAILY_SALE);
        assert_eq!(products[0].quantity, 1);
        assert_eq!(products[1].quantity, 10);
    }

    #[test]
    fn test_restock_increments_existing() {
        let mut products = vec![product("Pipe 2in", 3)];
        restock(&mut products, &[item("Pipe 2in", 2)], "04/08/2026");
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].quantity, 5);
    }

    #[test]
    fn test_restock_creates_missing_product() {
        let mut products = vec![product("Pipe 2in", 3)];
        restock(&mut products, &[item("Ball Valve", 4)], "04/08/2026");
        assert_eq!(products.len(), 2);

        let created = &products[1];
        assert_eq!(created.name, "Ball Valve");
        assert_eq!(created.quantity, 4);
        assert_eq!(created.price, Money::from_piasters(500));
        assert_eq!(created.date, "04/08/2026");
    }

    #[test]
    fn test_restore_never_creates() {
        let mut products = vec![product("Pipe 2in", 3)];
        restore(&mut products, &[item("Pipe 2in", 2), item("Ball Valve", 4)]);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].quantity, 5);
    }

    #[test]
    fn test_availability() {
        let products = vec![product("Pipe 2in", 3)];

        assert!(availability(&products, "Pipe 2in", 3).is_ok());

        let err = availability(&products, "Pipe 2in", 5).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 3,
                requested: 5,
                ..
            }
        ));

        let err = availability(&products, "Elbow 90", 1).unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound(_)));
    }
}
