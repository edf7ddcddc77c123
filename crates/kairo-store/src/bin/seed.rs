//! # Seed Data Generator
//!
//! Populates the database with demo inventory and a few transactions
//! for development.
//!
//! ## Usage
//! ```bash
//! # Seed into the default path (./data/kairo.db)
//! cargo run -p kairo-store --bin seed
//!
//! # Specify database path
//! cargo run -p kairo-store --bin seed -- --db ./data/kairo.db
//! ```

use std::env;

use tracing::info;
use tracing_subscriber::EnvFilter;

use kairo_core::{Money, PaymentStatus, SaleDraft};
use kairo_store::{
    CustomerFields, Database, DbConfig, InventoryRepository, Ledger, StoreResult,
};

/// Demo inventory: sanitary-tools stock with prices in piasters.
const PRODUCTS: &[(&str, i64, i64)] = &[
    ("PVC Pipe 2in", 120, 3500),
    ("PVC Pipe 4in", 80, 6200),
    ("Elbow 90 2in", 200, 750),
    ("PVC Tee 2in", 150, 900),
    ("Ball Valve 1in", 60, 4500),
    ("Gate Valve 2in", 35, 9800),
    ("Basin Mixer", 25, 32000),
    ("Shower Head", 40, 15500),
    ("Flexible Hose 60cm", 90, 2500),
    ("Teflon Tape", 300, 350),
    ("Drain Cover 10cm", 110, 1200),
    ("Water Tank Float", 45, 5500),
];

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = run().await {
        eprintln!("seed failed: {err}");
        std::process::exit(1);
    }
}

async fn run() -> StoreResult<()> {
    let db_path = parse_db_path().unwrap_or_else(|| "./data/kairo.db".to_string());
    if let Some(parent) = std::path::Path::new(&db_path).parent() {
        // DbConfig creates the file, not the directory.
        let _ = std::fs::create_dir_all(parent);
    }

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let inventory = InventoryRepository::new(db.clone());
    let ledger = Ledger::new(db.clone());

    for (name, quantity, price) in PRODUCTS {
        inventory
            .create(name, *quantity, Money::from_piasters(*price))
            .await?;
    }
    info!(count = PRODUCTS.len(), "inventory seeded");

    // One settled daily sale.
    let mut draft = SaleDraft::new();
    draft.add_item("PVC Pipe 2in", 4, Money::from_piasters(3500))?;
    draft.add_item("Elbow 90 2in", 8, Money::from_piasters(750))?;
    ledger
        .save_daily_sale(&mut draft, "Walk-in Customer", PaymentStatus::Paid, None)
        .await?;

    // One partially paid invoice, which also lands in the deferred log.
    let mut draft = SaleDraft::new();
    draft.add_item("Basin Mixer", 1, Money::from_piasters(32000))?;
    draft.add_item("Flexible Hose 60cm", 2, Money::from_piasters(2500))?;
    let customer = CustomerFields {
        name: "Ahmed Samir".into(),
        phone: "01001234567".into(),
        address: "Dar El Salam".into(),
    };
    let invoice = ledger
        .save_invoice(
            &mut draft,
            &kairo_store::next_invoice_number(),
            &customer,
            PaymentStatus::Partial,
            Some(Money::from_piasters(20000)),
        )
        .await?;

    info!(
        db = %db_path,
        invoice = %invoice.invoice_number,
        "seed complete"
    );
    Ok(())
}

/// Reads `--db <path>` from the command line, if given.
fn parse_db_path() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    args.iter()
        .position(|a| a == "--db")
        .and_then(|i| args.get(i + 1))
        .cloned()
}
