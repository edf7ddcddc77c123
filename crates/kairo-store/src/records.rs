//! # Record Viewers
//!
//! Read-side access to the saved transaction logs, plus the few
//! mutations the viewers support: whole-record customer edits on
//! invoices (mirrored into the deferred log) and plain deletes that
//! never touch the inventory. Deletes that *do* reverse stock (daily
//! sales, invoices) live on [`crate::ledger::Ledger`] so they share a
//! transaction with the product collection.

use tracing::{debug, info};

use kairo_core::{validation, CreditSale, DailySale, FawrySale, Invoice, InvoiceReturn, SalesReturn};

use crate::error::StoreResult;
use crate::store::{keys, read_collection, write_collection, Database};

/// Read-mostly access over the persisted transaction logs.
#[derive(Debug, Clone)]
pub struct Records {
    db: Database,
}

impl Records {
    /// Creates a new Records viewer.
    pub fn new(db: Database) -> Self {
        Records { db }
    }

    // -------------------------------------------------------------------------
    // Listings
    // -------------------------------------------------------------------------

    pub async fn daily_sales(&self) -> StoreResult<Vec<DailySale>> {
        self.db.read(keys::SALES).await
    }

    pub async fn invoices(&self) -> StoreResult<Vec<Invoice>> {
        self.db.read(keys::INVOICES).await
    }

    pub async fn archived_invoices(&self) -> StoreResult<Vec<Invoice>> {
        self.db.read(keys::INVOICE_ARCHIVE).await
    }

    pub async fn credit_sales(&self) -> StoreResult<Vec<CreditSale>> {
        self.db.read(keys::CREDIT_SALES).await
    }

    pub async fn fawry_sales(&self) -> StoreResult<Vec<FawrySale>> {
        self.db.read(keys::FAWRY_SALES).await
    }

    pub async fn sales_returns(&self) -> StoreResult<Vec<SalesReturn>> {
        self.db.read(keys::SALES_RETURNS).await
    }

    pub async fn invoice_returns(&self) -> StoreResult<Vec<InvoiceReturn>> {
        self.db.read(keys::INVOICE_RETURNS).await
    }

    // -------------------------------------------------------------------------
    // Searches (case-insensitive substring, viewer behavior)
    // -------------------------------------------------------------------------

    /// Daily sales by customer name.
    pub async fn search_daily_sales(&self, term: &str) -> StoreResult<Vec<DailySale>> {
        let term = validation::normalize_search_query(term)?;
        Ok(self
            .daily_sales()
            .await?
            .into_iter()
            .filter(|s| term.is_empty() || s.customer_name.to_lowercase().contains(&term))
            .collect())
    }

    /// Invoices by customer name or invoice number.
    pub async fn search_invoices(&self, term: &str) -> StoreResult<Vec<Invoice>> {
        let term = validation::normalize_search_query(term)?;
        Ok(self
            .invoices()
            .await?
            .into_iter()
            .filter(|inv| {
                term.is_empty()
                    || inv.customer_name.to_lowercase().contains(&term)
                    || inv.invoice_number.to_lowercase().contains(&term)
            })
            .collect())
    }

    /// Credit sales by customer name or any line item's product name.
    pub async fn search_credit_sales(&self, term: &str) -> StoreResult<Vec<CreditSale>> {
        let term = validation::normalize_search_query(term)?;
        Ok(self
            .credit_sales()
            .await?
            .into_iter()
            .filter(|sale| {
                term.is_empty()
                    || sale.customer_name.to_lowercase().contains(&term)
                    || sale
                        .items
                        .iter()
                        .any(|item| item.product_name.to_lowercase().contains(&term))
            })
            .collect())
    }

    /// Fawry sales by customer name.
    pub async fn search_fawry_sales(&self, term: &str) -> StoreResult<Vec<FawrySale>> {
        let term = validation::normalize_search_query(term)?;
        Ok(self
            .fawry_sales()
            .await?
            .into_iter()
            .filter(|s| term.is_empty() || s.customer_name.to_lowercase().contains(&term))
            .collect())
    }

    /// Archived invoices by customer name.
    pub async fn search_archived_invoices(&self, term: &str) -> StoreResult<Vec<Invoice>> {
        let term = validation::normalize_search_query(term)?;
        Ok(self
            .archived_invoices()
            .await?
            .into_iter()
            .filter(|inv| term.is_empty() || inv.customer_name.to_lowercase().contains(&term))
            .collect())
    }

    /// Invoice returns by customer name.
    pub async fn search_invoice_returns(&self, term: &str) -> StoreResult<Vec<InvoiceReturn>> {
        let term = validation::normalize_search_query(term)?;
        Ok(self
            .invoice_returns()
            .await?
            .into_iter()
            .filter(|ret| term.is_empty() || ret.customer_name.to_lowercase().contains(&term))
            .collect())
    }

    // -------------------------------------------------------------------------
    // Viewer Mutations
    // -------------------------------------------------------------------------

    /// Replaces an invoice record (viewer edit of customer fields) and
    /// mirrors the new state into the deferred log when a snapshot
    /// exists there. Money fields are stored as given; the viewers
    /// never recompute totals.
    pub async fn update_invoice(&self, invoice: &Invoice) -> StoreResult<()> {
        let mut tx = self.db.begin().await?;

        let mut invoices: Vec<Invoice> = read_collection(&mut *tx, keys::INVOICES).await?;
        if let Some(master) = invoices.iter_mut().find(|inv| inv.id == invoice.id) {
            *master = invoice.clone();
            write_collection(&mut *tx, keys::INVOICES, &invoices).await?;
        }

        let mut deferred: Vec<Invoice> = read_collection(&mut *tx, keys::DEFERRED_PAYMENTS).await?;
        if let Some(snapshot) = deferred.iter_mut().find(|inv| inv.id == invoice.id) {
            *snapshot = invoice.clone();
            write_collection(&mut *tx, keys::DEFERRED_PAYMENTS, &deferred).await?;
        }

        tx.commit().await?;
        debug!(id = %invoice.id, "invoice record updated");
        Ok(())
    }

    /// Deletes a credit sale record. Stock is untouched; the viewer
    /// offers no reversal for credit deductions.
    pub async fn delete_credit_sale(&self, id: &str) -> StoreResult<()> {
        self.delete_by_id::<CreditSale>(keys::CREDIT_SALES, id).await
    }

    /// Deletes a Fawry sale record.
    pub async fn delete_fawry_sale(&self, id: &str) -> StoreResult<()> {
        self.delete_by_id::<FawrySale>(keys::FAWRY_SALES, id).await
    }

    /// Deletes an archived invoice (archives never affected stock).
    pub async fn delete_archived_invoice(&self, id: &str) -> StoreResult<()> {
        self.delete_by_id::<Invoice>(keys::INVOICE_ARCHIVE, id).await
    }

    /// Deletes a sales return record. The restocked quantities stay.
    pub async fn delete_sales_return(&self, id: &str) -> StoreResult<()> {
        self.delete_by_id::<SalesReturn>(keys::SALES_RETURNS, id).await
    }

    /// Deletes an invoice return record. The restocked quantities stay.
    pub async fn delete_invoice_return(&self, id: &str) -> StoreResult<()> {
        self.delete_by_id::<InvoiceReturn>(keys::INVOICE_RETURNS, id).await
    }

    async fn delete_by_id<T>(&self, key: &str, id: &str) -> StoreResult<()>
    where
        T: HasId + serde::de::DeserializeOwned + serde::Serialize,
    {
        let mut rows: Vec<T> = self.db.read(key).await?;
        let before = rows.len();
        rows.retain(|row| row.id() != id);

        if rows.len() != before {
            self.db.write(key, &rows).await?;
            info!(key = %key, id = %id, "record deleted");
        }
        Ok(())
    }
}

/// Record types the viewers can delete by id.
trait HasId {
    fn id(&self) -> &str;
}

macro_rules! impl_has_id {
    ($($ty:ty),* $(,)?) => {
        $(impl HasId for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        })*
    };
}

impl_has_id!(CreditSale, FawrySale, Invoice, SalesReturn, InvoiceReturn);

// =============================================================================
// Unit Tests
// =============================================================================
