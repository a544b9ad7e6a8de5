use serde::{Deserialize, Serialize};

/// Raw pre-market facts observed for one ticker. No decision logic lives here.
///
/// Every numeric field is optional: scanner exports routinely omit columns,
/// and a missing value must stay distinguishable from zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerInput {
    #[serde(rename = "ticker", alias = "Ticker")]
    pub symbol: String,
    #[serde(default, alias = "Last", skip_serializing_if = "Option::is_none")]
    pub last: Option<f64>,
    #[serde(default, alias = "PMPrice", skip_serializing_if = "Option::is_none")]
    pub pm_price: Option<f64>,
    #[serde(default, alias = "PMChangePct", skip_serializing_if = "Option::is_none")]
    pub pm_change_pct: Option<f64>,
    #[serde(default, alias = "PMVolume", skip_serializing_if = "Option::is_none")]
    pub pm_volume: Option<f64>,
    #[serde(default, alias = "AvgVolume", skip_serializing_if = "Option::is_none")]
    pub avg_volume: Option<f64>,
    #[serde(default, alias = "Float", skip_serializing_if = "Option::is_none")]
    pub float: Option<f64>,
    #[serde(default, alias = "Sector", skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(default, alias = "PMHigh", skip_serializing_if = "Option::is_none")]
    pub pm_high: Option<f64>,
    #[serde(default, alias = "PMLow", skip_serializing_if = "Option::is_none")]
    pub pm_low: Option<f64>,
}

impl TickerInput {
    /// Best available price: pre-market quote, falling back to last close.
    pub fn price(&self) -> Option<f64> {
        self.pm_price.or(self.last)
    }
}

/// Catalyst category attached to a ticker by the news/earnings providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalystType {
    Earnings,
    Fda,
    Product,
    Merger,
    Contract,
    Upgrade,
    Offering,
    Guidance,
    Technical,
    Sector,
    General,
    None,
}

impl CatalystType {
    /// Major catalysts carry enough weight to support momentum continuation.
    pub fn is_major(&self) -> bool {
        matches!(
            self,
            CatalystType::Earnings
                | CatalystType::Fda
                | CatalystType::Product
                | CatalystType::Merger
                | CatalystType::Contract
                | CatalystType::Upgrade
        )
    }

    /// Valid catalysts qualify a ticker for day-1 volatility setups.
    pub fn is_valid(&self) -> bool {
        self.is_major() || matches!(self, CatalystType::Guidance | CatalystType::Sector)
    }

    pub fn name(&self) -> &'static str {
        match self {
            CatalystType::Earnings => "earnings",
            CatalystType::Fda => "fda",
            CatalystType::Product => "product",
            CatalystType::Merger => "merger",
            CatalystType::Contract => "contract",
            CatalystType::Upgrade => "upgrade",
            CatalystType::Offering => "offering",
            CatalystType::Guidance => "guidance",
            CatalystType::Technical => "technical",
            CatalystType::Sector => "sector",
            CatalystType::General => "general",
            CatalystType::None => "none",
        }
    }
}

/// One catalyst per ticker; news-derived catalysts take precedence over
/// earnings-derived ones when both exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalystInfo {
    #[serde(rename = "type")]
    pub catalyst_type: CatalystType,
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earnings_timing: Option<String>,
}

/// Reference price levels. Any field may be unknown; consumers degrade
/// gracefully rather than defaulting to zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketLevels {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev_high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev_low: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev_close: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pm_high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pm_low: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week52_high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week52_low: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub htf_resistance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub htf_support: Option<f64>,
}

/// Trading posture assigned to every gate-admitted ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    A,
    B,
    C,
}

impl Classification {
    pub fn name(&self) -> &'static str {
        match self {
            Classification::A => "A",
            Classification::B => "B",
            Classification::C => "C",
        }
    }

    /// Fixed strategy permissions per class.
    pub fn permitted_strategies(&self) -> &'static [Strategy] {
        match self {
            Classification::A => &[Strategy::OpeningRangeBreakout, Strategy::MomentumExtension],
            Classification::B => &[
                Strategy::OpeningRangeBreakout,
                Strategy::SupportBounce,
                Strategy::VwapReclaim,
            ],
            Classification::C => &[Strategy::VwapReclaim, Strategy::PostFlushReclaim],
        }
    }

    /// Conviction is a pure function of class.
    pub fn conviction(&self) -> Conviction {
        match self {
            Classification::A => Conviction::High,
            Classification::B => Conviction::Medium,
            Classification::C => Conviction::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Conviction {
    High,
    Medium,
    Low,
}

impl Conviction {
    pub fn name(&self) -> &'static str {
        match self {
            Conviction::High => "HIGH",
            Conviction::Medium => "MEDIUM",
            Conviction::Low => "LOW",
        }
    }
}

/// Playbook strategies referenced by the classifier and the action plan.
/// Serialized labels match the playbook numbering used in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    #[serde(rename = "Strategy 1 (ORB)")]
    OpeningRangeBreakout,
    #[serde(rename = "Strategy 2 (Support Bounce)")]
    SupportBounce,
    #[serde(rename = "Strategy 3 (VWAP Reclaim)")]
    VwapReclaim,
    #[serde(rename = "Strategy 4 (Momentum Extension)")]
    MomentumExtension,
    #[serde(rename = "Strategy 5 (Post-Flush Reclaim)")]
    PostFlushReclaim,
}

impl Strategy {
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::OpeningRangeBreakout => "Strategy 1 (ORB)",
            Strategy::SupportBounce => "Strategy 2 (Support Bounce)",
            Strategy::VwapReclaim => "Strategy 3 (VWAP Reclaim)",
            Strategy::MomentumExtension => "Strategy 4 (Momentum Extension)",
            Strategy::PostFlushReclaim => "Strategy 5 (Post-Flush Reclaim)",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Watchlist bucket. Serialized as the bare tier number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Tier {
    Primary = 1,
    Secondary = 2,
    DoNotTrade = 3,
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> Self {
        tier as u8
    }
}

impl TryFrom<u8> for Tier {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Tier::Primary),
            2 => Ok(Tier::Secondary),
            3 => Ok(Tier::DoNotTrade),
            other => Err(format!("invalid tier: {}", other)),
        }
    }
}

/// The single accumulator record flowing through every pipeline stage.
///
/// Stages only ever append fields: enrichment fills catalyst/levels/rel_volume,
/// the classifier fills the classification block, and the tier ranker fills
/// tier/tier_reason. Nothing is overwritten downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedTicker {
    #[serde(flatten)]
    pub input: TickerInput,
    pub catalyst: Option<CatalystInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rel_volume: Option<f64>,
    #[serde(default)]
    pub levels: MarketLevels,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permitted_strategies: Option<Vec<Strategy>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_strategy: Option<Strategy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_strategy: Option<Strategy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_risk: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalidation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conviction: Option<Conviction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier_reason: Option<String>,
}

impl EnrichedTicker {
    /// Wrap a raw input with its enrichment results. Classifier and tier
    /// fields start unset.
    pub fn new(
        input: TickerInput,
        catalyst: Option<CatalystInfo>,
        levels: MarketLevels,
        rel_volume: Option<f64>,
    ) -> Self {
        Self {
            input,
            catalyst,
            rel_volume,
            levels,
            classification: None,
            classification_reason: None,
            permitted_strategies: None,
            primary_strategy: None,
            secondary_strategy: None,
            conditional_note: None,
            primary_risk: None,
            invalidation: None,
            conviction: None,
            tier: None,
            tier_reason: None,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.input.symbol
    }

    pub fn catalyst_type(&self) -> CatalystType {
        self.catalyst
            .as_ref()
            .map(|c| c.catalyst_type)
            .unwrap_or(CatalystType::None)
    }
}

/// One row of the ranked watchlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    pub ticker: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_strategy: Option<Strategy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conviction: Option<Conviction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_level: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why_secondary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Capacity-limited watchlist buckets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriorityTiers {
    pub tier1: Vec<PriorityEntry>,
    pub tier2: Vec<PriorityEntry>,
    pub tier3: Vec<PriorityEntry>,
}

/// One execution window of the session plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionWindow {
    pub title: String,
    pub items: Vec<String>,
}

/// Three-window intraday execution narrative, derived purely from
/// already-computed classifications and tiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPlan {
    pub opening_phase: ActionWindow,
    pub mid_session: ActionWindow,
    pub late_session: ActionWindow,
}

/// Run-level metadata surfaced at the top of every report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub date: String,
    pub day_of_week: String,
    pub market_open_uk: String,
    pub scanner_sources: Vec<String>,
    pub tickers_scanned: usize,
    pub tickers_passing: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macro_notes: Option<String>,
}

/// Full artifact produced by one scan, consumed by the report renderers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub session_info: SessionInfo,
    pub tickers: Vec<EnrichedTicker>,
    pub priority: PriorityTiers,
    pub action_plan: ActionPlan,
    pub stop_conditions: crate::config::StopConditions,
}
