//! Database initialization binary.
//!
//! Generates synthetic sales data, cleans it, and loads it into the SQLite
//! store. Safe to re-run: the store is truncated and regenerated.
//!
//! Configuration via environment variables:
//!   DATABASE_PATH  - store location (default: dashboard.db)
//!   RECORD_COUNT   - records to generate (default: 5000)
//!   SEED           - RNG seed (default: 42)
//!   WINDOW_START   - first transaction date, YYYY-MM-DD (default: 2024-01-01)
//!   WINDOW_END     - last transaction date, YYYY-MM-DD (default: 2025-12-31)
//!   SEASONAL       - set to any value to enable the holiday-peak profile

use chrono::NaiveDate;
use dashboard::{
    bootstrap, DateWindow, GeneratorConfig, SalesStore, Seasonality,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .init();

    let database_path =
        std::env::var("DATABASE_PATH").unwrap_or_else(|_| "dashboard.db".to_string());
    let record_count = std::env::var("RECORD_COUNT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(5000);
    let seed = std::env::var("SEED")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(42);
    let start = parse_date_var("WINDOW_START", "2024-01-01")?;
    let end = parse_date_var("WINDOW_END", "2025-12-31")?;

    let mut config = GeneratorConfig::new(seed, record_count, DateWindow::new(start, end));
    if std::env::var("SEASONAL").is_ok() {
        config.seasonality = Seasonality::holiday_peak();
    }

    println!("📊 Dashboard - Database Initialization");
    println!();
    println!("   Database: {}", database_path);
    println!("   Records:  {}", config.record_count);
    println!("   Window:   {} .. {}", config.window.start, config.window.end);
    println!("   Seed:     {}", config.seed);
    println!();

    let mut store = SalesStore::open(&database_path)?;
    let report = bootstrap::initialize_store(&mut store, &config)?;

    println!("✓ Generated {} records", report.generated);
    println!(
        "✓ Cleaned: {} duplicates removed, {} substitutions, {} dropped",
        report.cleaning.duplicates_removed,
        report.cleaning.total_substitutions(),
        report.cleaning.total_dropped(),
    );
    println!("✓ Persisted {} records to {}", report.persisted, database_path);
    println!();
    println!("✨ Initialization completed successfully!");

    Ok(())
}

fn parse_date_var(name: &str, default: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    let value = std::env::var(name).unwrap_or_else(|_| default.to_string());
    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .map_err(|err| format!("{} must be YYYY-MM-DD: {}", name, err).into())
}
