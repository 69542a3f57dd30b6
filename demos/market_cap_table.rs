//! Builds the market-capitalization table for every common stock and writes it as CSV.
//!
//! Run with: cargo run --example market_cap_table --features tracing-subscriber -- out.csv

use std::fs::File;

use iex_rs::{IexClient, MarketTableBuilder};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing-subscriber")]
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== iex-rs market table ===");

    let out = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "market_table.csv".to_string());

    let client = IexClient::default();
    let table = MarketTableBuilder::new(&client)
        .combine_debt(true)
        .build()
        .await?
        .drop_null_rows();

    let (rows, cols) = table.shape();
    println!("   {rows} tickers x {cols} columns");

    table.write_csv(File::create(&out)?, false)?;
    println!("   wrote {out}");
    Ok(())
}
