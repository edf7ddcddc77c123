//! # Report Generation
//!
//! Tabular reports over the persisted logs with simple date filtering.
//!
//! ## Period Semantics
//! ```text
//! daily    → stored date string == today's formatted date
//! monthly  → parsed date falls in the current calendar month/year
//!            (records whose date string does not parse drop out)
//! custom   → stored date string == the formatted custom date
//! ```
//! The inventory report is never date-filtered; stock levels have no
//! date-range meaning. Every call re-reads the logs; nothing is cached.

use chrono::Datelike;
use tracing::debug;

use kairo_core::{dates, DailySale, Dated, FawrySale, Invoice, InvoiceReturn, Product, SalesReturn};

use crate::error::StoreResult;
use crate::store::{keys, Database};

// =============================================================================
// Report Types
// =============================================================================

/// Which log(s) a report reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Sales,
    Invoices,
    Inventory,
    /// Merges both return logs (sales returns first).
    Returns,
    Fawry,
}

/// The reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    /// Records dated today.
    Daily,
    /// Records in the current calendar month.
    Monthly,
    /// Records dated exactly on the given day.
    Custom(chrono::NaiveDate),
}

/// A return row from either return log.
#[derive(Debug, Clone)]
pub enum ReturnEntry {
    Sales(SalesReturn),
    Invoice(InvoiceReturn),
}

impl Dated for ReturnEntry {
    fn date(&self) -> &str {
        match self {
            ReturnEntry::Sales(ret) => &ret.date,
            ReturnEntry::Invoice(ret) => &ret.date,
        }
    }
}

/// Typed report rows, one variant per [`ReportKind`].
#[derive(Debug, Clone)]
pub enum Report {
    Sales(Vec<DailySale>),
    Invoices(Vec<Invoice>),
    Inventory(Vec<Product>),
    Returns(Vec<ReturnEntry>),
    Fawry(Vec<FawrySale>),
}

impl Report {
    /// Number of rows in the report.
    pub fn len(&self) -> usize {
        match self {
            Report::Sales(rows) => rows.len(),
            Report::Invoices(rows) => rows.len(),
            Report::Inventory(rows) => rows.len(),
            Report::Returns(rows) => rows.len(),
            Report::Fawry(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// Generator
// =============================================================================

/// Generates reports over the persisted logs.
#[derive(Debug, Clone)]
pub struct Reports {
    db: Database,
}

impl Reports {
    /// Creates a new report generator.
    pub fn new(db: Database) -> Self {
        Reports { db }
    }

    /// Reads the relevant log(s) and applies the period filter.
    /// Recomputed fresh on every call.
    pub async fn generate(&self, kind: ReportKind, period: ReportPeriod) -> StoreResult<Report> {
        let report = match kind {
            ReportKind::Sales => {
                let rows: Vec<DailySale> = self.db.read(keys::SALES).await?;
                Report::Sales(filter_by_period(rows, period))
            }
            ReportKind::Invoices => {
                let rows: Vec<Invoice> = self.db.read(keys::INVOICES).await?;
                Report::Invoices(filter_by_period(rows, period))
            }
            ReportKind::Inventory => {
                // Stock levels are a point-in-time view; no date filter.
                let rows: Vec<Product> = self.db.read(keys::PRODUCTS).await?;
                Report::Inventory(rows)
            }
            ReportKind::Returns => {
                let sales: Vec<SalesReturn> = self.db.read(keys::SALES_RETURNS).await?;
                let invoices: Vec<InvoiceReturn> = self.db.read(keys::INVOICE_RETURNS).await?;
                let merged: Vec<ReturnEntry> = sales
                    .into_iter()
                    .map(ReturnEntry::Sales)
                    .chain(invoices.into_iter().map(ReturnEntry::Invoice))
                    .collect();
                Report::Returns(filter_by_period(merged, period))
            }
            ReportKind::Fawry => {
                let rows: Vec<FawrySale> = self.db.read(keys::FAWRY_SALES).await?;
                Report::Fawry(filter_by_period(rows, period))
            }
        };

        debug!(kind = ?kind, period = ?period, rows = report.len(), "report generated");
        Ok(report)
    }
}

/// Applies the period filter to any dated record set.
fn filter_by_period<T: Dated>(rows: Vec<T>, period: ReportPeriod) -> Vec<T> {
    match period {
        ReportPeriod::Daily => {
            let today = dates::today_string();
            rows.into_iter().filter(|r| r.date() == today).collect()
        }
        ReportPeriod::Monthly => {
            let now = dates::today();
            rows.into_iter()
                .filter(|r| dates::in_month(r.date(), now.year(), now.month()))
                .collect()
        }
        ReportPeriod::Custom(date) => {
            let target = dates::format(date);
            rows.into_iter().filter(|r| r.date() == target).collect()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::open_database;
    use kairo_core::{Money, PaymentStatus};

    fn sale(date: &str) -> DailySale {
        DailySale {
            id: uuid::Uuid::new_v4().to_string(),
            customer_name: "Ahmed".into(),
            items: Vec::new(),
            total: Money::from_piasters(1000),
            payment_status: PaymentStatus::Paid,
            paid_amount: Money::from_piasters(1000),
            remaining_amount: Money::zero(),
            date: date.to_string(),
            return_amount: Money::zero(),
            net_total: None,
            has_return: false,
        }
    }

    fn sales_return(date: &str) -> SalesReturn {
        SalesReturn {
            id: uuid::Uuid::new_v4().to_string(),
            customer_name: "Ahmed".into(),
            linked_sale_id: None,
            items: Vec::new(),
            total: Money::from_piasters(500),
            date: date.to_string(),
        }
    }

    fn invoice_return(date: &str) -> InvoiceReturn {
        InvoiceReturn {
            id: uuid::Uuid::new_v4().to_string(),
            customer_name: "Mona".into(),
            invoice_number: None,
            items: Vec::new(),
            total: Money::from_piasters(300),
            date: date.to_string(),
        }
    }

    #[tokio::test]
    async fn test_daily_filter_matches_today_only() {
        let (_dir, db) = open_database().await;
        db.write(keys::SALES, &[sale(&dates::today_string()), sale("01/01/2020")])
            .await
            .unwrap();

        let report = Reports::new(db)
            .generate(ReportKind::Sales, ReportPeriod::Daily)
            .await
            .unwrap();
        assert_eq!(report.len(), 1);
    }

    #[tokio::test]
    async fn test_monthly_filter_parses_dates() {
        let (_dir, db) = open_database().await;
        let today = dates::today();
        let this_month = dates::format(today);

        db.write(
            keys::SALES,
            &[sale(&this_month), sale("01/01/2020"), sale("not a date")],
        )
        .await
        .unwrap();

        let report = Reports::new(db)
            .generate(ReportKind::Sales, ReportPeriod::Monthly)
            .await
            .unwrap();
        // The unparseable date drops out rather than matching.
        assert_eq!(report.len(), 1);
    }

    #[tokio::test]
    async fn test_custom_filter_compares_formatted_date() {
        let (_dir, db) = open_database().await;
        db.write(keys::SALES, &[sale("15/06/2026"), sale("16/06/2026")])
            .await
            .unwrap();

        let target = chrono::NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();
        let report = Reports::new(db)
            .generate(ReportKind::Sales, ReportPeriod::Custom(target))
            .await
            .unwrap();
        assert_eq!(report.len(), 1);
    }

    #[tokio::test]
    async fn test_returns_report_merges_both_logs() {
        let (_dir, db) = open_database().await;
        let today = dates::today_string();
        db.write(keys::SALES_RETURNS, &[sales_return(&today)])
            .await
            .unwrap();
        db.write(
            keys::INVOICE_RETURNS,
            &[invoice_return(&today), invoice_return("01/01/2020")],
        )
        .await
        .unwrap();

        let report = Reports::new(db)
            .generate(ReportKind::Returns, ReportPeriod::Daily)
            .await
            .unwrap();
        assert_eq!(report.len(), 2);

        // Sales returns come first in the merged sequence.
        match report {
            Report::Returns(rows) => {
                assert!(matches!(rows[0], ReturnEntry::Sales(_)));
                assert!(matches!(rows[1], ReturnEntry::Invoice(_)));
            }
            other => panic!("unexpected report variant: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_inventory_report_ignores_period() {
        let (_dir, db) = open_database().await;
        let products = vec![kairo_core::Product {
            id: "1".into(),
            name: "Pipe".into(),
            quantity: 10,
            price: Money::from_piasters(500),
            date: "01/01/2020".into(),
        }];
        db.write(keys::PRODUCTS, &products).await.unwrap();

        let report = Reports::new(db)
            .generate(ReportKind::Inventory, ReportPeriod::Daily)
            .await
            .unwrap();
        assert_eq!(report.len(), 1);
    }
}
