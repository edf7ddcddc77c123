//! # Domain Types
//!
//! Core domain types used throughout Kairo POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Domain Types                             │
//! │                                                                 │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐          │
//! │  │   Product    │  │  DailySale   │  │   Invoice    │          │
//! │  │ ──────────── │  │ ──────────── │  │ ──────────── │          │
//! │  │ id (UUID)    │  │ id (UUID)    │  │ id (UUID)    │          │
//! │  │ name (key!)  │  │ items        │  │ invoiceNumber│          │
//! │  │ quantity     │  │ total/paid   │  │ items/paid   │          │
//! │  │ price        │  │ date         │  │ deferred?    │          │
//! │  └──────────────┘  └──────────────┘  └──────────────┘          │
//! │                                                                 │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐          │
//! │  │  CreditSale  │  │  FawrySale   │  │   Returns    │          │
//! │  │ per-item paid│  │ itemType     │  │ Sales/Invoice│          │
//! │  └──────────────┘  └──────────────┘  └──────────────┘          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Name-Keyed Relationships
//! Line items reference products by **name string**, not by id; the
//! legacy storage layout works that way and existing records keep it.
//! `Product.id` exists for direct lookups; name matching hits the first
//! product in insertion order when names collide.
//!
//! ## Serialized Layout
//! Every persisted record serializes with camelCase field names
//! (`customerName`, `paidAmount`, …) so collections round-trip against
//! records already on disk.

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Payment Status
// =============================================================================

/// Settlement state of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Fully settled at save time.
    Paid,
    /// Partially settled; the remainder is tracked for later payment.
    Partial,
    /// Nothing paid yet; the full amount is outstanding.
    Pending,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Paid
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Partial => "partial",
            PaymentStatus::Pending => "pending",
        };
        f.write_str(s)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A stock-keeping entry. The single source of truth for stock levels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name. Also the natural key line items match against.
    pub name: String,

    /// Current stock level. Intended invariant: ≥ 0; the credit channel
    /// deducts without clamping, so negatives are representable.
    pub quantity: i64,

    /// Unit price in piasters.
    pub price: Money,

    /// Creation date (business-date string, DD/MM/YYYY).
    pub date: String,
}

// =============================================================================
// Line Items
// =============================================================================

/// A single product entry within a transaction.
///
/// Uses the snapshot pattern: `product_name` and `price` are copied at
/// entry time and never re-resolved, so later product renames or price
/// changes do not rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: String,
    /// Product name at entry time (frozen; not a reference).
    pub product_name: String,
    pub quantity: i64,
    /// Unit price at entry time (frozen).
    pub price: Money,
    /// quantity × price, computed at entry time.
    pub total: Money,
}

/// A line item in a credit sale.
///
/// Differs from [`LineItem`]: the price is copied from the product's
/// *current* price, and settlement is tracked per item rather than per
/// transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditItem {
    pub id: String,
    pub product_name: String,
    pub quantity: i64,
    /// Unit price copied from the product at entry time.
    pub price: Money,
    /// Amount the customer paid for this item up front.
    pub amount_paid: Money,
    /// quantity × price − amount_paid (negative when overpaid).
    pub remaining_amount: Money,
}

// =============================================================================
// Transactions
// =============================================================================

/// A saved daily sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySale {
    pub id: String,
    pub customer_name: String,
    pub items: Vec<LineItem>,
    pub total: Money,
    pub payment_status: PaymentStatus,
    pub paid_amount: Money,
    pub remaining_amount: Money,
    pub date: String,

    /// Cumulative value returned against this sale.
    #[serde(default)]
    pub return_amount: Money,

    /// total − return_amount, recomputed whenever a linked return lands.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_total: Option<Money>,

    /// Set once any linked return exists.
    #[serde(default)]
    pub has_return: bool,
}

/// A saved invoice.
///
/// Invoices carry customer contact fields and an invoice number seeded
/// from the creation instant (`INV-<millis>`). The number is a display
/// identifier, not guaranteed unique under rapid successive saves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub invoice_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub items: Vec<LineItem>,
    pub total: Money,
    pub payment_status: PaymentStatus,
    pub paid_amount: Money,
    pub remaining_amount: Money,
    pub date: String,

    /// Cumulative value returned against this invoice. Unlike sales,
    /// invoices never carry a netTotal.
    #[serde(default)]
    pub return_amount: Money,

    #[serde(default)]
    pub has_return: bool,
}

/// A saved Fawry (electronic payment kiosk) sale.
///
/// Fawry sales never touch the inventory; the remainder may be entered
/// by hand rather than derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FawrySale {
    pub id: String,
    pub customer_name: String,
    /// Free-form service category ("recharge", "bill", …).
    pub item_type: String,
    pub payment_status: PaymentStatus,
    pub amount_paid: Money,
    pub remaining_amount: Money,
    pub items: Vec<LineItem>,
    pub total: Money,
    pub date: String,
}

/// A saved credit (deferred-payment) sale.
///
/// Totals are sums of the per-item settlement amounts, not quantity ×
/// price sums like the other channels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditSale {
    pub id: String,
    pub customer_name: String,
    pub items: Vec<CreditItem>,
    pub total_paid: Money,
    pub total_remaining: Money,
    pub date: String,
}

// =============================================================================
// Returns
// =============================================================================

/// A saved sales return. Restores stock and optionally annotates the
/// originating sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReturn {
    pub id: String,
    pub customer_name: String,
    /// Id of the originating sale, when one was selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_sale_id: Option<String>,
    pub items: Vec<LineItem>,
    pub total: Money,
    pub date: String,
}

/// A saved invoice return. Restores stock and optionally annotates the
/// originating invoice (matched by invoice number).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceReturn {
    pub id: String,
    pub customer_name: String,
    /// Number of the originating invoice, when one was selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    pub items: Vec<LineItem>,
    pub total: Money,
    pub date: String,
}

// =============================================================================
// Dated
// =============================================================================

/// Access to a record's stored business-date string.
///
/// Report filtering is generic over this trait: daily and custom
/// periods compare the stored string for equality, the monthly period
/// parses it.
pub trait Dated {
    fn date(&self) -> &str;
}

macro_rules! impl_dated {
    ($($ty:ty),* $(,)?) => {
        $(impl Dated for $ty {
            fn date(&self) -> &str {
                &self.date
            }
        })*
    };
}

impl_dated!(
    Product,
    DailySale,
    Invoice,
    FawrySale,
    CreditSale,
    SalesReturn,
    InvoiceReturn,
);

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Paid).unwrap(),
            "\"paid\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Partial).unwrap(),
            "\"partial\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Pending).unwrap(),
            "\"pending\""
        );
    }

    #[test]
    fn test_record_layout_is_camel_case() {
        let sale = DailySale {
            id: "1".into(),
            customer_name: "Ahmed".into(),
            items: vec![LineItem {
                id: "2".into(),
                product_name: "Pipe 2in".into(),
                quantity: 3,
                price: Money::from_piasters(500),
                total: Money::from_piasters(1500),
            }],
            total: Money::from_piasters(1500),
            payment_status: PaymentStatus::Paid,
            paid_amount: Money::from_piasters(1500),
            remaining_amount: Money::zero(),
            date: "01/08/2026".into(),
            return_amount: Money::zero(),
            net_total: None,
            has_return: false,
        };

        let json = serde_json::to_value(&sale).unwrap();
        assert_eq!(json["customerName"], "Ahmed");
        assert_eq!(json["paidAmount"], 1500);
        assert_eq!(json["remainingAmount"], 0);
        assert_eq!(json["items"][0]["productName"], "Pipe 2in");
        assert!(json.get("netTotal").is_none());
    }

    #[test]
    fn test_return_annotations_default_on_old_records() {
        // Records persisted before any return lack the annotation fields.
        let json = r#"{
            "id": "1",
            "customerName": "Ahmed",
            "items": [],
            "total": 1500,
            "paymentStatus": "paid",
            "paidAmount": 1500,
            "remainingAmount": 0,
            "date": "01/08/2026"
        }"#;

        let sale: DailySale = serde_json::from_str(json).unwrap();
        assert_eq!(sale.return_amount, Money::zero());
        assert_eq!(sale.net_total, None);
        assert!(!sale.has_return);
    }
}
