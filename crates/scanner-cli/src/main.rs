//! scanner-cli: run a pre-market scan over a ticker snapshot file.
//!
//! Usage:
//!   cargo run -p scanner-cli -- --input data/sample-tickers.csv
//!   cargo run -p scanner-cli -- --input tickers.json --config config/default-config.yaml
//!   cargo run -p scanner-cli -- --input tickers.csv --output reports/

mod input;
mod report;

use anyhow::{bail, Result};
use mock_providers::{MockEarningsProvider, MockMarketDataProvider, MockNewsProvider};
use scanner_engine::ScanEngine;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const DEFAULT_CONFIG: &str = "config/default-config.yaml";
const DEFAULT_OUTPUT: &str = "output";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scanner_cli=info,scanner_engine=info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    let Some(input_path) = flag_value(&args, "--input") else {
        bail!("--input <tickers.csv|tickers.json> is required");
    };
    let config_path = flag_value(&args, "--config").unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let output_dir = flag_value(&args, "--output").unwrap_or_else(|| DEFAULT_OUTPUT.to_string());

    let config = input::load_config(Path::new(&config_path))?;
    let tickers = input::load_tickers(Path::new(&input_path))?;

    tracing::info!("Scanning {} tickers from {}", tickers.len(), input_path);

    let engine = ScanEngine::new(
        Arc::new(MockNewsProvider),
        Arc::new(MockEarningsProvider),
        Arc::new(MockMarketDataProvider),
    );
    let report = engine.run(&tickers, &config).await?;

    write_outputs(&report, Path::new(&output_dir))?;

    tracing::info!(
        "{} passed gate / {} scanned",
        report.session_info.tickers_passing,
        report.session_info.tickers_scanned
    );
    for (name, entries) in [
        ("Tier 1", &report.priority.tier1),
        ("Tier 2", &report.priority.tier2),
        ("Tier 3", &report.priority.tier3),
    ] {
        let names: Vec<&str> = entries.iter().map(|e| e.ticker.as_str()).collect();
        tracing::info!(
            "{}: {}",
            name,
            if names.is_empty() {
                "none".to_string()
            } else {
                names.join(", ")
            }
        );
    }

    Ok(())
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn write_outputs(report: &scanner_core::ScanReport, output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir)?;

    let md_path: PathBuf = output_dir.join("report.md");
    let json_path: PathBuf = output_dir.join("report.json");

    fs::write(&md_path, report::build_report_md(report))?;
    fs::write(&json_path, serde_json::to_string_pretty(report)?)?;

    tracing::info!("Reports written to {}", output_dir.display());
    Ok(())
}
