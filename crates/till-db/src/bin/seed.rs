//! # Seed Data Generator
//!
//! Populates the database with sample products (and optionally a few
//! checkouts) for development.
//!
//! ## Usage
//! ```bash
//! # Generate 50 products (default)
//! cargo run -p till-db --bin seed
//!
//! # Generate custom amount plus 20 sample checkouts
//! cargo run -p till-db --bin seed -- --count 200 --sales 20
//!
//! # Specify database path
//! cargo run -p till-db --bin seed -- --db ./data/till.db
//! ```
//!
//! ## Generated Products
//! Names are `{item} {size}` from a small catalogue of cafe items.
//! - Price: 1.50 - 9.49 plus a size addon
//! - Stock: 20 - 119

use std::env;
use till_core::{CheckoutItem, NewProduct, StockPolicy};
use till_db::{Database, DbConfig};
use tracing_subscriber::EnvFilter;

/// Catalogue of base items
const ITEMS: &[&str] = &[
    "Espresso",
    "Americano",
    "Cappuccino",
    "Latte",
    "Flat White",
    "Mocha",
    "Hot Chocolate",
    "Chai Latte",
    "Green Tea",
    "Iced Tea",
    "Orange Juice",
    "Lemonade",
    "Croissant",
    "Muffin",
    "Bagel",
    "Cookie",
    "Brownie",
    "Sandwich",
    "Salad",
    "Soup",
];

/// Sizes with price addon in minor units
const SIZES: &[(&str, i64)] = &[("Small", 0), ("Medium", 50), ("Large", 100)];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 50;
    let mut sales: usize = 0;
    let mut db_path = String::from("./till_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(50);
                    i += 1;
                }
            }
            "--sales" | "-s" => {
                if i + 1 < args.len() {
                    sales = args[i + 1].parse().unwrap_or(0);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Till POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 50)");
                println!("  -s, --sales <N>    Number of sample checkouts to run (default: 0)");
                println!("  -d, --db <PATH>    Database file path (default: ./till_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Till POS Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    println!("Sales:    {}", sales);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating products...");

    let start = std::time::Instant::now();
    let mut ids = Vec::with_capacity(count);

    let catalogue = ITEMS
        .iter()
        .flat_map(|item| SIZES.iter().map(move |size| (*item, *size)))
        .cycle()
        .take(count);

    for (seed, (item, (size, price_addon))) in catalogue.enumerate() {
        let product = generate_product(item, size, price_addon, seed);

        match db.products().insert(&product).await {
            Ok(inserted) => ids.push(inserted.id),
            Err(e) => eprintln!("Failed to insert {}: {}", product.name, e),
        }
    }

    println!("✓ Generated {} products in {:?}", ids.len(), start.elapsed());

    if sales > 0 && !ids.is_empty() {
        println!();
        println!("Running sample checkouts...");

        for n in 0..sales {
            let items: Vec<CheckoutItem> = (0..1 + n % 3)
                .map(|k| CheckoutItem {
                    product_id: ids[(n * 7 + k * 3) % ids.len()],
                    quantity: 1 + ((n + k) % 4) as i64,
                })
                .collect();

            if let Err(e) = db.transactions().checkout(&items, StockPolicy::Enforce).await {
                eprintln!("Checkout {} failed: {}", n + 1, e);
            }
        }

        let report = db.transactions().today_report().await?;
        println!("  Revenue today:      {}", report.total_revenue);
        println!("  Transactions today: {}", report.total_transaction_count);
        if let Some(top) = report.top_product {
            println!("  Top product:        {} ({} sold)", top.name, top.quantity_sold);
        }
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates a single product with deterministic pseudo-random data.
fn generate_product(item: &str, size: &str, price_addon: i64, seed: usize) -> NewProduct {
    // 1.50 - 9.49
    let base_price = 150 + ((seed * 37) % 800) as i64;

    NewProduct {
        name: format!("{} {}", item, size),
        price: base_price + price_addon,
        stock: 20 + (seed % 100) as i64,
    }
}
