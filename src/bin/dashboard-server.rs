//! Dashboard API Server Binary
//!
//! Run with: `cargo run --bin dashboard-server`

use dashboard::{ServerConfig, run_server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Note: Tracing is initialized in run_server()
    // Set RUST_LOG environment variable to control log level:
    //   RUST_LOG=debug cargo run --bin dashboard-server

    // Create configuration from environment variables or defaults
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse::<u16>()
        .unwrap_or(3000);
    let database_path =
        std::env::var("DATABASE_PATH").unwrap_or_else(|_| "dashboard.db".to_string());

    let config = ServerConfig::new(host, port, database_path);

    println!("🚀 Starting Dashboard API Server...");
    println!("   Host: {}", config.host);
    println!("   Port: {}", config.port);
    println!("   Database: {}", config.database_path);
    println!();
    println!(
        "Server will be available at: http://{}:{}",
        config.host, config.port
    );
    println!();
    println!("Available endpoints:");
    println!("  GET  /health                      - Health check");
    println!("  GET  /catalog/regions             - Region reference rows");
    println!("  GET  /catalog/categories          - Category reference rows");
    println!("  POST /query/records               - Filtered raw records");
    println!("  POST /query/summary               - Summary totals");
    println!("  POST /query/breakdown/:dimension  - Breakdown by category/region/segment");
    println!("  POST /query/timeseries/daily      - Revenue by day");
    println!("  POST /query/timeseries/monthly    - Revenue by month");
    println!("  POST /query/dashboard             - Full dashboard payload");
    println!("  POST /init                        - Regenerate the store");
    println!("  POST /export/records              - CSV export of filtered records");
    println!("  POST /export/report               - Multi-sheet summary report");
    println!();

    // Run server
    run_server(config).await?;

    Ok(())
}
