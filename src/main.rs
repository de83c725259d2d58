//! Stockroom - inventory tracker web app
//!
//! Loads the inventory snapshot once at startup and serves the web UI until
//! interrupted. Every change made through the UI is written back immediately.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use stockroom::{InventoryService, SnapshotStore, DEFAULT_LOW_STOCK_THRESHOLD};

/// Minimal inventory tracker with a web UI
#[derive(Parser, Debug)]
#[command(name = "stockroom")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the JSON inventory snapshot
    #[arg(short, long, default_value_t = default_data_file())]
    data_file: String,

    /// Address to bind the web server to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port for the web server
    #[arg(short, long, default_value_t = 5000)]
    port: u16,

    /// Products with stock below this count are flagged as low
    #[arg(long, default_value_t = DEFAULT_LOW_STOCK_THRESHOLD)]
    low_stock_threshold: u32,
}

fn default_data_file() -> String {
    SnapshotStore::default_path().to_string_lossy().to_string()
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let data_file = PathBuf::from(&args.data_file);

    log::info!("Starting stockroom...");
    log::info!("Inventory file: {}", data_file.display());

    let service = InventoryService::open(SnapshotStore::new(data_file))
        .with_low_stock_threshold(args.low_stock_threshold);

    if let Err(e) = stockroom::web::serve(Arc::new(service), &args.host, args.port).await {
        log::error!("Web server error: {}", e);
        std::process::exit(1);
    }
}
