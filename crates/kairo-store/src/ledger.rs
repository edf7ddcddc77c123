//! # The Transaction Ledger
//!
//! Every flow that records a transaction or reverses one goes through
//! here: validate, compute, then write all affected collections in a
//! single SQL transaction.
//!
//! ## Save Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Recording a Transaction                     │
//! │                                                                 │
//! │  draft (line items) ──► validate ──► derive settlement          │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  BEGIN                                                          │
//! │    append record to its log        (kairo_sales / invoices / …) │
//! │    mutate inventory per policy     (kairo_products)             │
//! │    mirror unsettled invoices       (kairo_deferred_payments)    │
//! │  COMMIT ← all writes land together or not at all                │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  draft.clear()                                                  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The per-channel differences (clamping, stock enforcement, deferred
//! mirroring) come from `kairo_core::stock::ChannelPolicy`, so the
//! recording logic exists once instead of once per channel.

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use kairo_core::{
    dates, payment, stock, validation, CoreError, CreditDraft, CreditSale, DailySale, FawrySale,
    Invoice, InvoiceReturn, Money, PaymentStatus, Product, SaleDraft, SalesReturn,
};

use crate::error::StoreResult;
use crate::store::{keys, read_collection, write_collection, Database};

// =============================================================================
// Support Types
// =============================================================================

/// Customer contact fields captured on an invoice.
#[derive(Debug, Clone, Default)]
pub struct CustomerFields {
    pub name: String,
    pub phone: String,
    pub address: String,
}

/// Non-fatal stock warning for the invoice entry flow.
///
/// Invoices do not block on stock; they surface an advisory and record
/// anyway (deduction then clamps at zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockAdvisory {
    /// No inventory entry carries this name; nothing will be deducted.
    NotInInventory,
    /// Requested quantity is above what is on hand.
    Insufficient { available: i64 },
}

/// Allocates an invoice number seeded from the creation instant.
///
/// Kept format-compatible with existing records; uniqueness under
/// rapid successive saves is not guaranteed and deliberately not
/// "fixed" here, since renumbering would change user-visible invoices.
pub fn next_invoice_number() -> String {
    format!("INV-{}", Utc::now().timestamp_millis())
}

// =============================================================================
// Ledger
// =============================================================================

/// Records transactions and keeps the inventory consistent with them.
#[derive(Debug, Clone)]
pub struct Ledger {
    db: Database,
}

impl Ledger {
    /// Creates a new Ledger.
    pub fn new(db: Database) -> Self {
        Ledger { db }
    }

    // -------------------------------------------------------------------------
    // Advisories
    // -------------------------------------------------------------------------

    /// Checks a prospective invoice line against the inventory.
    ///
    /// Matches the product name case-insensitively (entry-form
    /// behavior; the deduction itself matches exactly).
    pub async fn stock_advisory(
        &self,
        product_name: &str,
        requested: i64,
    ) -> StoreResult<Option<StockAdvisory>> {
        let products: Vec<Product> = self.db.read(keys::PRODUCTS).await?;
        let lowered = product_name.to_lowercase();

        let advisory = match products.iter().find(|p| p.name.to_lowercase() == lowered) {
            None => {
                warn!(product = %product_name, "product not in inventory, will be recorded without deduction");
                Some(StockAdvisory::NotInInventory)
            }
            Some(product) if product.quantity < requested => {
                warn!(
                    product = %product_name,
                    available = product.quantity,
                    requested,
                    "requested quantity above stock"
                );
                Some(StockAdvisory::Insufficient {
                    available: product.quantity,
                })
            }
            Some(_) => None,
        };

        Ok(advisory)
    }

    // -------------------------------------------------------------------------
    // Daily Sales
    // -------------------------------------------------------------------------

    /// Records a daily sale: appends to the sales log and deducts
    /// stock (clamped at zero). Clears the draft on success.
    pub async fn save_daily_sale(
        &self,
        draft: &mut SaleDraft,
        customer_name: &str,
        status: PaymentStatus,
        entered_paid: Option<Money>,
    ) -> StoreResult<DailySale> {
        let customer_name = validation::require_customer_name(customer_name)?;
        if draft.is_empty() {
            return Err(CoreError::EmptyTransaction.into());
        }

        let total = draft.total();
        let settlement = payment::derive_settlement(total, status, entered_paid);

        let sale = DailySale {
            id: Uuid::new_v4().to_string(),
            customer_name,
            items: draft.items().to_vec(),
            total,
            payment_status: status,
            paid_amount: settlement.paid_amount,
            remaining_amount: settlement.remaining_amount,
            date: dates::today_string(),
            return_amount: Money::zero(),
            net_total: None,
            has_return: false,
        };

        let mut tx = self.db.begin().await?;

        let mut sales: Vec<DailySale> = read_collection(&mut *tx, keys::SALES).await?;
        sales.push(sale.clone());
        write_collection(&mut *tx, keys::SALES, &sales).await?;

        let mut products: Vec<Product> = read_collection(&mut *tx, keys::PRODUCTS).await?;
        stock::deduct(&mut products, sale.items.as_slice(), &stock::DAILY_SALE);
        write_collection(&mut *tx, keys::PRODUCTS, &products).await?;

        tx.commit().await?;
        draft.clear();

        info!(
            id = %sale.id,
            total = %sale.total,
            status = %sale.payment_status,
            items = sale.items.len(),
            "daily sale recorded"
        );
        Ok(sale)
    }

    /// Deletes a daily sale and puts its quantities back into stock.
    /// Unknown ids are a no-op.
    pub async fn delete_daily_sale(&self, id: &str) -> StoreResult<()> {
        let mut tx = self.db.begin().await?;

        let mut sales: Vec<DailySale> = read_collection(&mut *tx, keys::SALES).await?;
        let Some(index) = sales.iter().position(|s| s.id == id) else {
            debug!(id = %id, "delete of unknown sale ignored");
            return Ok(());
        };
        let sale = sales.remove(index);

        let mut products: Vec<Product> = read_collection(&mut *tx, keys::PRODUCTS).await?;
        stock::restore(&mut products, sale.items.as_slice());

        write_collection(&mut *tx, keys::SALES, &sales).await?;
        write_collection(&mut *tx, keys::PRODUCTS, &products).await?;
        tx.commit().await?;

        info!(id = %id, "daily sale deleted, stock restored");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Invoices
    // -------------------------------------------------------------------------

    /// Records an invoice: appends to the invoice log, deducts stock
    /// (clamped at zero), and mirrors partial/pending invoices into
    /// the deferred-payments log, all in one transaction.
    pub async fn save_invoice(
        &self,
        draft: &mut SaleDraft,
        invoice_number: &str,
        customer: &CustomerFields,
        status: PaymentStatus,
        entered_paid: Option<Money>,
    ) -> StoreResult<Invoice> {
        let invoice = self.build_invoice(draft, invoice_number, customer, status, entered_paid)?;

        let mut tx = self.db.begin().await?;

        let mut invoices: Vec<Invoice> = read_collection(&mut *tx, keys::INVOICES).await?;
        invoices.push(invoice.clone());
        write_collection(&mut *tx, keys::INVOICES, &invoices).await?;

        let mut products: Vec<Product> = read_collection(&mut *tx, keys::PRODUCTS).await?;
        stock::deduct(&mut products, invoice.items.as_slice(), &stock::INVOICE);
        write_collection(&mut *tx, keys::PRODUCTS, &products).await?;

        if stock::INVOICE.mirrors_to_deferred
            && matches!(invoice.payment_status, PaymentStatus::Partial | PaymentStatus::Pending)
        {
            let mut deferred: Vec<Invoice> =
                read_collection(&mut *tx, keys::DEFERRED_PAYMENTS).await?;
            deferred.push(invoice.clone());
            write_collection(&mut *tx, keys::DEFERRED_PAYMENTS, &deferred).await?;
        }

        tx.commit().await?;
        draft.clear();

        info!(
            id = %invoice.id,
            number = %invoice.invoice_number,
            total = %invoice.total,
            status = %invoice.payment_status,
            "invoice recorded"
        );
        Ok(invoice)
    }

    /// Archives an invoice for record-keeping: identical validation and
    /// computation, but the record lands in the archive log only: no
    /// stock deduction, no deferred mirror.
    pub async fn archive_invoice(
        &self,
        draft: &mut SaleDraft,
        invoice_number: &str,
        customer: &CustomerFields,
        status: PaymentStatus,
        entered_paid: Option<Money>,
    ) -> StoreResult<Invoice> {
        let invoice = self.build_invoice(draft, invoice_number, customer, status, entered_paid)?;

        let mut archive: Vec<Invoice> = self.db.read(keys::INVOICE_ARCHIVE).await?;
        archive.push(invoice.clone());
        self.db.write(keys::INVOICE_ARCHIVE, &archive).await?;

        draft.clear();

        info!(id = %invoice.id, number = %invoice.invoice_number, "invoice archived");
        Ok(invoice)
    }

    fn build_invoice(
        &self,
        draft: &SaleDraft,
        invoice_number: &str,
        customer: &CustomerFields,
        status: PaymentStatus,
        entered_paid: Option<Money>,
    ) -> StoreResult<Invoice> {
        let customer_name = validation::require_customer_name(&customer.name)?;
        if draft.is_empty() {
            return Err(CoreError::EmptyTransaction.into());
        }

        let total = draft.total();
        let settlement = payment::derive_settlement(total, status, entered_paid);

        Ok(Invoice {
            id: Uuid::new_v4().to_string(),
            invoice_number: invoice_number.trim().to_string(),
            customer_name,
            customer_phone: customer.phone.trim().to_string(),
            customer_address: customer.address.trim().to_string(),
            items: draft.items().to_vec(),
            total,
            payment_status: status,
            paid_amount: settlement.paid_amount,
            remaining_amount: settlement.remaining_amount,
            date: dates::today_string(),
            return_amount: Money::zero(),
            has_return: false,
        })
    }

    /// Deletes an invoice: puts its quantities back into stock, drops
    /// the record, and drops any deferred snapshot. Unknown ids are a
    /// no-op.
    pub async fn delete_invoice(&self, id: &str) -> StoreResult<()> {
        let mut tx = self.db.begin().await?;

        let mut invoices: Vec<Invoice> = read_collection(&mut *tx, keys::INVOICES).await?;
        let Some(index) = invoices.iter().position(|i| i.id == id) else {
            debug!(id = %id, "delete of unknown invoice ignored");
            return Ok(());
        };
        let invoice = invoices.remove(index);

        let mut products: Vec<Product> = read_collection(&mut *tx, keys::PRODUCTS).await?;
        stock::restore(&mut products, invoice.items.as_slice());

        let mut deferred: Vec<Invoice> = read_collection(&mut *tx, keys::DEFERRED_PAYMENTS).await?;
        deferred.retain(|i| i.id != id);

        write_collection(&mut *tx, keys::INVOICES, &invoices).await?;
        write_collection(&mut *tx, keys::PRODUCTS, &products).await?;
        write_collection(&mut *tx, keys::DEFERRED_PAYMENTS, &deferred).await?;
        tx.commit().await?;

        info!(id = %id, "invoice deleted, stock restored");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Fawry Sales
    // -------------------------------------------------------------------------

    /// Records a Fawry-channel sale. The inventory is never touched;
    /// the remainder is the entered override or total − paid.
    pub async fn save_fawry_sale(
        &self,
        draft: &mut SaleDraft,
        customer_name: &str,
        item_type: &str,
        status: PaymentStatus,
        amount_paid: Money,
        remaining_override: Option<Money>,
    ) -> StoreResult<FawrySale> {
        let customer_name = validation::require_customer_name(customer_name)?;
        let item_type = validation::require_item_type(item_type)?;
        if draft.is_empty() {
            return Err(CoreError::EmptyTransaction.into());
        }

        let total = draft.total();
        let sale = FawrySale {
            id: Uuid::new_v4().to_string(),
            customer_name,
            item_type,
            payment_status: status,
            amount_paid,
            remaining_amount: remaining_override.unwrap_or(total - amount_paid),
            items: draft.items().to_vec(),
            total,
            date: dates::today_string(),
        };

        let mut fawry: Vec<FawrySale> = self.db.read(keys::FAWRY_SALES).await?;
        fawry.push(sale.clone());
        self.db.write(keys::FAWRY_SALES, &fawry).await?;

        draft.clear();

        info!(id = %sale.id, total = %sale.total, kind = %sale.item_type, "fawry sale recorded");
        Ok(sale)
    }

    // -------------------------------------------------------------------------
    // Credit Sales
    // -------------------------------------------------------------------------

    /// Records a credit sale: appends to the credit log and deducts
    /// stock **without clamping**. Availability was enforced when each
    /// item entered the draft; stock movements in between can still
    /// take a quantity negative, which is recorded as-is.
    pub async fn save_credit_sale(
        &self,
        draft: &mut CreditDraft,
        customer_name: &str,
    ) -> StoreResult<CreditSale> {
        let customer_name = validation::require_customer_name(customer_name)?;
        if draft.is_empty() {
            return Err(CoreError::EmptyTransaction.into());
        }

        let sale = CreditSale {
            id: Uuid::new_v4().to_string(),
            customer_name,
            items: draft.items().to_vec(),
            total_paid: draft.total_paid(),
            total_remaining: draft.total_remaining(),
            date: dates::today_string(),
        };

        let mut tx = self.db.begin().await?;

        let mut credit_sales: Vec<CreditSale> = read_collection(&mut *tx, keys::CREDIT_SALES).await?;
        credit_sales.push(sale.clone());
        write_collection(&mut *tx, keys::CREDIT_SALES, &credit_sales).await?;

        let mut products: Vec<Product> = read_collection(&mut *tx, keys::PRODUCTS).await?;
        stock::deduct(&mut products, sale.items.as_slice(), &stock::CREDIT_SALE);
        write_collection(&mut *tx, keys::PRODUCTS, &products).await?;

        tx.commit().await?;
        draft.clear();

        info!(
            id = %sale.id,
            paid = %sale.total_paid,
            remaining = %sale.total_remaining,
            "credit sale recorded"
        );
        Ok(sale)
    }

    // -------------------------------------------------------------------------
    // Returns
    // -------------------------------------------------------------------------

    /// Records a sales return: restores stock (creating vanished
    /// products), appends to the returns log, and, when linked,
    /// annotates the originating sale with the cumulative return
    /// amount, a recomputed net total and the hasReturn flag.
    pub async fn save_sales_return(
        &self,
        draft: &mut SaleDraft,
        customer_name: &str,
        linked_sale_id: Option<&str>,
    ) -> StoreResult<SalesReturn> {
        let customer_name = validation::require_customer_name(customer_name)?;
        if draft.is_empty() {
            return Err(CoreError::EmptyTransaction.into());
        }

        let ret = SalesReturn {
            id: Uuid::new_v4().to_string(),
            customer_name,
            linked_sale_id: linked_sale_id.map(str::to_string),
            items: draft.items().to_vec(),
            total: draft.total(),
            date: dates::today_string(),
        };

        let mut tx = self.db.begin().await?;

        let mut returns: Vec<SalesReturn> = read_collection(&mut *tx, keys::SALES_RETURNS).await?;
        returns.push(ret.clone());
        write_collection(&mut *tx, keys::SALES_RETURNS, &returns).await?;

        let mut products: Vec<Product> = read_collection(&mut *tx, keys::PRODUCTS).await?;
        stock::restock(&mut products, ret.items.as_slice(), &ret.date);
        write_collection(&mut *tx, keys::PRODUCTS, &products).await?;

        if let Some(sale_id) = linked_sale_id {
            let mut sales: Vec<DailySale> = read_collection(&mut *tx, keys::SALES).await?;
            if let Some(sale) = sales.iter_mut().find(|s| s.id == sale_id) {
                sale.return_amount += ret.total;
                sale.net_total = Some(sale.total - sale.return_amount);
                sale.has_return = true;
                write_collection(&mut *tx, keys::SALES, &sales).await?;
            }
        }

        tx.commit().await?;
        draft.clear();

        info!(id = %ret.id, total = %ret.total, linked = ret.linked_sale_id.is_some(), "sales return recorded");
        Ok(ret)
    }

    /// Records an invoice return: restores stock and, when linked by
    /// invoice number, bumps the invoice's cumulative returnAmount and
    /// hasReturn flag. Unlike sales returns, no netTotal is
    /// recomputed for invoices.
    pub async fn save_invoice_return(
        &self,
        draft: &mut SaleDraft,
        customer_name: &str,
        invoice_number: Option<&str>,
    ) -> StoreResult<InvoiceReturn> {
        let customer_name = validation::require_customer_name(customer_name)?;
        if draft.is_empty() {
            return Err(CoreError::EmptyTransaction.into());
        }

        let ret = InvoiceReturn {
            id: Uuid::new_v4().to_string(),
            customer_name,
            invoice_number: invoice_number.map(str::to_string),
            items: draft.items().to_vec(),
            total: draft.total(),
            date: dates::today_string(),
        };

        let mut tx = self.db.begin().await?;

        let mut returns: Vec<InvoiceReturn> =
            read_collection(&mut *tx, keys::INVOICE_RETURNS).await?;
        returns.push(ret.clone());
        write_collection(&mut *tx, keys::INVOICE_RETURNS, &returns).await?;

        let mut products: Vec<Product> = read_collection(&mut *tx, keys::PRODUCTS).await?;
        stock::restock(&mut products, ret.items.as_slice(), &ret.date);
        write_collection(&mut *tx, keys::PRODUCTS, &products).await?;

        if let Some(number) = invoice_number {
            let mut invoices: Vec<Invoice> = read_collection(&mut *tx, keys::INVOICES).await?;
            if let Some(invoice) = invoices.iter_mut().find(|i| i.invoice_number == number) {
                invoice.return_amount += ret.total;
                invoice.has_return = true;
                write_collection(&mut *tx, keys::INVOICES, &invoices).await?;
            }
        }

        tx.commit().await?;
        draft.clear();

        info!(id = %ret.id, total = %ret.total, linked = ret.invoice_number.is_some(), "invoice return recorded");
        Ok(ret)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
