//! # Deferred Payments
//!
//! Settlement of invoices that were saved partial or pending. The
//! deferred log holds a snapshot of each outstanding invoice for quick
//! access; every mutation here updates both the snapshot and the
//! master invoice record in one transaction, so the two copies cannot
//! diverge.
//!
//! ## Settlement Lifecycle
//! ```text
//! invoice saved partial/pending ──► snapshot enters deferred log
//!        │
//!        ├── settle_partial(amount) ──► paid += amount
//!        │        │                     remaining = total − paid
//!        │        └── remaining > 0 → snapshot updated in place
//!        │            remaining = 0 → status paid, snapshot removed
//!        │
//!        └── settle_full() ──► paid = total, remaining = 0,
//!                              status paid, snapshot removed
//!
//! (the master record in kairo_invoices mirrors every step)
//! ```

use tracing::{debug, info};

use kairo_core::{payment, validation, Invoice, Money, PaymentStatus};

use crate::error::{StoreError, StoreResult};
use crate::ledger::CustomerFields;
use crate::store::{keys, read_collection, write_collection, Database};

/// Tracker over the deferred-payments log and its master records.
#[derive(Debug, Clone)]
pub struct DeferredPayments {
    db: Database,
}

impl DeferredPayments {
    /// Creates a new DeferredPayments tracker.
    pub fn new(db: Database) -> Self {
        DeferredPayments { db }
    }

    /// Outstanding invoice snapshots, in entry order.
    pub async fn list(&self) -> StoreResult<Vec<Invoice>> {
        self.db.read(keys::DEFERRED_PAYMENTS).await
    }

    /// Case-insensitive substring search on customer name or invoice
    /// number.
    pub async fn search(&self, term: &str) -> StoreResult<Vec<Invoice>> {
        let term = validation::normalize_search_query(term)?;
        let deferred = self.list().await?;
        if term.is_empty() {
            return Ok(deferred);
        }
        Ok(deferred
            .into_iter()
            .filter(|inv| {
                inv.customer_name.to_lowercase().contains(&term)
                    || inv.invoice_number.to_lowercase().contains(&term)
            })
            .collect())
    }

    /// Settles the full outstanding balance of an invoice.
    ///
    /// Sets paid = total, remaining = 0, status = paid; removes the
    /// snapshot from the deferred log and patches the master record to
    /// match.
    pub async fn settle_full(&self, invoice_id: &str) -> StoreResult<Invoice> {
        let mut tx = self.db.begin().await?;

        let mut deferred: Vec<Invoice> = read_collection(&mut *tx, keys::DEFERRED_PAYMENTS).await?;
        let index = deferred
            .iter()
            .position(|inv| inv.id == invoice_id)
            .ok_or_else(|| StoreError::not_found("deferred invoice", invoice_id))?;

        let mut invoice = deferred.remove(index);
        invoice.paid_amount = invoice.total;
        invoice.remaining_amount = Money::zero();
        invoice.payment_status = PaymentStatus::Paid;

        write_collection(&mut *tx, keys::DEFERRED_PAYMENTS, &deferred).await?;
        mirror_to_master(&mut tx, &invoice).await?;
        tx.commit().await?;

        info!(id = %invoice.id, number = %invoice.invoice_number, "invoice settled in full");
        Ok(invoice)
    }

    /// Applies a partial payment to an outstanding invoice.
    ///
    /// ## Boundaries
    /// Rejected when amount ≤ 0 or amount > the current remainder;
    /// accepted at exactly the remainder, which settles the invoice
    /// and removes it from the deferred log.
    pub async fn settle_partial(&self, invoice_id: &str, amount: Money) -> StoreResult<Invoice> {
        let mut tx = self.db.begin().await?;

        let mut deferred: Vec<Invoice> = read_collection(&mut *tx, keys::DEFERRED_PAYMENTS).await?;
        let index = deferred
            .iter()
            .position(|inv| inv.id == invoice_id)
            .ok_or_else(|| StoreError::not_found("deferred invoice", invoice_id))?;

        let snapshot = &deferred[index];
        let applied = payment::apply_partial_payment(
            snapshot.total,
            snapshot.paid_amount,
            snapshot.remaining_amount,
            amount,
        )?;

        let mut invoice = deferred[index].clone();
        invoice.paid_amount = applied.paid_amount;
        invoice.remaining_amount = applied.remaining_amount;
        invoice.payment_status = applied.status;

        if applied.status == PaymentStatus::Paid {
            deferred.remove(index);
        } else {
            deferred[index] = invoice.clone();
        }

        write_collection(&mut *tx, keys::DEFERRED_PAYMENTS, &deferred).await?;
        mirror_to_master(&mut tx, &invoice).await?;
        tx.commit().await?;

        info!(
            id = %invoice.id,
            amount = %amount,
            remaining = %invoice.remaining_amount,
            status = %invoice.payment_status,
            "partial payment applied"
        );
        Ok(invoice)
    }

    /// Patches customer contact fields in both the deferred snapshot
    /// and the master record. Money fields are not recomputed.
    pub async fn edit_customer(
        &self,
        invoice_id: &str,
        fields: &CustomerFields,
    ) -> StoreResult<Invoice> {
        let name = validation::require_customer_name(&fields.name)?;

        let mut tx = self.db.begin().await?;

        let mut deferred: Vec<Invoice> = read_collection(&mut *tx, keys::DEFERRED_PAYMENTS).await?;
        let invoice = deferred
            .iter_mut()
            .find(|inv| inv.id == invoice_id)
            .ok_or_else(|| StoreError::not_found("deferred invoice", invoice_id))?;

        invoice.customer_name = name;
        invoice.customer_phone = fields.phone.trim().to_string();
        invoice.customer_address = fields.address.trim().to_string();
        let updated = invoice.clone();

        write_collection(&mut *tx, keys::DEFERRED_PAYMENTS, &deferred).await?;
        mirror_to_master(&mut tx, &updated).await?;
        tx.commit().await?;

        debug!(id = %invoice_id, "deferred invoice customer fields updated");
        Ok(updated)
    }
}

/// Replaces the matching master invoice record with the given state.
/// A missing master record is tolerated (the snapshot is authoritative
/// for the deferred view).
async fn mirror_to_master(
    tx: &mut sqlx::Transaction<'static, sqlx::Sqlite>,
    invoice: &Invoice,
) -> StoreResult<()> {
    let mut invoices: Vec<Invoice> = read_collection(&mut **tx, keys::INVOICES).await?;
    if let Some(master) = invoices.iter_mut().find(|inv| inv.id == invoice.id) {
        *master = invoice.clone();
        write_collection(&mut **tx, keys::INVOICES, &invoices).await?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
