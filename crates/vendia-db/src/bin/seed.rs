//! # Seed Data Generator
//!
//! Populates the database with example products and sales for
//! development.
//!
//! ## Usage
//! ```bash
//! cargo run -p vendia-db --bin seed
//! cargo run -p vendia-db --bin seed -- --db ./data/vendia.db
//! ```

use std::env;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use vendia_db::{Database, DbConfig};

/// (name, quantity, price) starter stock.
const PRODUCTS: &[(&str, i64, f64)] = &[
    ("Mechanical Keyboard", 5, 150.00),
    ("Gaming Mouse", 12, 80.00),
    ("Ultra-Wide Monitor", 3, 1200.00),
];

/// (product index, quantity, payment method) example sales.
const SALES: &[(usize, i64, &str)] = &[
    (0, 2, "Cash"),
    (1, 3, "Credit Card"),
    (1, 1, "Pix"),
    (2, 1, "Debit Card"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut db_path = String::from("./vendia_dev.db");

    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Vendia Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./vendia_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    info!(path = %db_path, "Connecting to database");

    let db = Database::new(DbConfig::new(&db_path)).await?;

    let existing = db.products().count().await?;
    if existing > 0 {
        warn!(
            existing = existing,
            "Database already has products; skipping seed. Delete the file to regenerate."
        );
        return Ok(());
    }

    info!("Seeding example products");

    let mut ids = Vec::with_capacity(PRODUCTS.len());
    for &(name, quantity, price) in PRODUCTS {
        let product = db.products().create(name, quantity, price).await?;
        info!(id = %product.id, name = %product.name, quantity = %product.quantity, "Product created");
        ids.push(product.id);
    }

    info!("Registering example sales");

    for &(product_idx, quantity, method) in SALES {
        let sale = db.sales().register(ids[product_idx], quantity, method).await?;
        info!(id = %sale.id, total = %sale.total_price, method = %sale.payment_method, "Sale registered");
    }

    let stock = db.reports().stock_summary().await?;
    info!(
        products = stock.product_count,
        stock_value = stock.stock_value,
        "Seed complete"
    );

    db.close().await;
    Ok(())
}
