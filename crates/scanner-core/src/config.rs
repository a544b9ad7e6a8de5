use serde::{Deserialize, Serialize};

/// Hard-gate admission thresholds. Supplied wholesale by the caller; the
/// engine carries no built-in defaults for these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdConfig {
    pub min_price: f64,
    pub max_price: f64,
    pub min_avg_volume: f64,
    pub min_pm_volume: f64,
    pub min_gap_pct: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_float: Option<f64>,
}

/// Session metadata passed through into the report header.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    pub market_open_uk: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macro_notes: Option<String>,
}

/// Caller-defined discipline rules; the engine passes these through to the
/// report untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopConditions {
    pub daily_loss_limit: f64,
    pub max_losing_trades: u32,
    pub emotional_check_time: String,
    pub hard_close_uk: String,
}

/// Full scan configuration as loaded from a config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanConfig {
    pub thresholds: ThresholdConfig,
    pub session: SessionConfig,
    pub stop_conditions: StopConditions,
    pub scanner_sources: Vec<String>,
}
