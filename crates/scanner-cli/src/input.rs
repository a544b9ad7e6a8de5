//! Ticker and config file loading.

use anyhow::{bail, Context, Result};
use scanner_core::{ScanConfig, TickerInput};
use std::fs;
use std::path::Path;

/// Load the ticker universe from a `.json` or `.csv` file.
pub fn load_tickers(path: &Path) -> Result<Vec<TickerInput>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading input file {}", path.display()))?;

    match extension(path) {
        Some("json") => parse_json_tickers(&raw),
        Some("csv") => parse_csv_tickers(&raw),
        _ => bail!("Unsupported input format - use .json or .csv"),
    }
}

/// Load the scan configuration from a `.yaml`/`.yml` or `.json` file.
pub fn load_config(path: &Path) -> Result<ScanConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;

    let config = match extension(path) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&raw)?,
        _ => serde_json::from_str(&raw)?,
    };
    Ok(config)
}

pub fn parse_json_tickers(raw: &str) -> Result<Vec<TickerInput>> {
    serde_json::from_str(raw).context("parsing JSON ticker list")
}

pub fn parse_csv_tickers(raw: &str) -> Result<Vec<TickerInput>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(raw.as_bytes());

    let mut tickers = Vec::new();
    for record in reader.deserialize() {
        let ticker: TickerInput = record.context("parsing CSV ticker row")?;
        tickers.push(ticker);
    }
    Ok(tickers)
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}
