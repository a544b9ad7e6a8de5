//! Pre-market scan engine.
//!
//! One invocation is one synchronous pass over a static snapshot of tickers:
//! enrichment (catalyst + levels + relative volume) fans out concurrently,
//! then the pure decision stages run over the collected set in input order:
//! hard gate, classifier, tier ranker, action plan.

pub mod action_plan;
pub mod classification;
pub mod gating;
pub mod tiering;
pub mod volume;

pub use action_plan::build_action_plan;
pub use classification::classify;
pub use gating::{hard_gate, GateDecision};
pub use tiering::{rank_tiers, score_ticker, TIER1_CAPACITY};
pub use volume::{relative_volume, PM_SESSION_FRACTION};

use chrono::Utc;
use scanner_core::{
    CatalystInfo, EarningsProvider, EnrichedTicker, MarketDataProvider, MarketLevels,
    NewsProvider, ScanConfig, ScanError, ScanReport, SessionInfo, TickerInput, Tier,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinSet;

/// The scan pipeline with its injected data providers.
///
/// Providers are trait objects so production and mock implementations are
/// interchangeable at construction time.
pub struct ScanEngine {
    news: Arc<dyn NewsProvider>,
    earnings: Arc<dyn EarningsProvider>,
    market: Arc<dyn MarketDataProvider>,
}

impl ScanEngine {
    pub fn new(
        news: Arc<dyn NewsProvider>,
        earnings: Arc<dyn EarningsProvider>,
        market: Arc<dyn MarketDataProvider>,
    ) -> Self {
        Self {
            news,
            earnings,
            market,
        }
    }

    /// Run one scan over the full input snapshot.
    ///
    /// Completes for every input ticker or returns the first provider/join
    /// failure; there is no partial-result contract. A record that fails
    /// validation (no symbol) is rejected on its own without touching the
    /// rest of the batch.
    pub async fn run(
        &self,
        inputs: &[TickerInput],
        config: &ScanConfig,
    ) -> Result<ScanReport, ScanError> {
        let today = Utc::now();
        let mut session_info = SessionInfo {
            date: today.format("%Y-%m-%d").to_string(),
            day_of_week: today.format("%A").to_string(),
            market_open_uk: config.session.market_open_uk.clone(),
            scanner_sources: config.scanner_sources.clone(),
            tickers_scanned: inputs.len(),
            tickers_passing: 0,
            macro_notes: config.session.macro_notes.clone(),
        };

        tracing::info!("Scanning {} tickers", inputs.len());

        let mut enrichments = self.enrich_all(inputs).await?;

        let mut admitted: Vec<EnrichedTicker> = Vec::new();
        let mut rejections: Vec<EnrichedTicker> = Vec::new();

        for (idx, input) in inputs.iter().enumerate() {
            let Some((catalyst, levels)) = enrichments.remove(&idx) else {
                // Never enriched: the record failed up-front validation.
                tracing::warn!("Skipping record {} with no ticker symbol", idx);
                let record =
                    EnrichedTicker::new(input.clone(), None, MarketLevels::default(), None);
                rejections.push(rejected(record, "Missing ticker symbol"));
                continue;
            };

            let rel_volume = relative_volume(input.pm_volume, input.avg_volume);
            let record = EnrichedTicker::new(input.clone(), catalyst, levels, rel_volume);

            let gate = hard_gate(input, record.catalyst.as_ref(), &config.thresholds);
            if !gate.pass {
                let reason = gate.reason.unwrap_or_else(|| "Failed gate".to_string());
                tracing::debug!("Gate rejected {}: {}", input.symbol, reason);
                rejections.push(rejected(record, reason));
                continue;
            }

            admitted.push(classify(record));
        }

        session_info.tickers_passing = admitted.len();

        let priority = rank_tiers(&admitted);

        // Write tier assignments back onto the enriched records.
        for ticker in &mut admitted {
            if priority.tier1.iter().any(|p| p.ticker == ticker.symbol()) {
                ticker.tier = Some(Tier::Primary);
                ticker.tier_reason = Some("Primary focus".to_string());
            } else if let Some(entry) = priority
                .tier2
                .iter()
                .find(|p| p.ticker == ticker.symbol())
            {
                ticker.tier = Some(Tier::Secondary);
                ticker.tier_reason = Some(
                    entry
                        .why_secondary
                        .clone()
                        .unwrap_or_else(|| "Secondary focus".to_string()),
                );
            } else {
                ticker.tier = Some(Tier::DoNotTrade);
                ticker.tier_reason = Some("Did not rank into Tier 1 or 2".to_string());
            }
        }

        let action_plan = build_action_plan(&admitted, &priority);

        tracing::info!(
            "Scan complete: {}/{} passed gate, Tier 1: [{}]",
            session_info.tickers_passing,
            session_info.tickers_scanned,
            priority
                .tier1
                .iter()
                .map(|p| p.ticker.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        let mut tickers = admitted;
        tickers.append(&mut rejections);

        Ok(ScanReport {
            session_info,
            tickers,
            priority,
            action_plan,
            stop_conditions: config.stop_conditions.clone(),
        })
    }

    /// Fan enrichment out across tickers, one task per valid record, and
    /// collect everything back keyed by input index. Records with no symbol
    /// are skipped here and rejected by the caller.
    async fn enrich_all(
        &self,
        inputs: &[TickerInput],
    ) -> Result<HashMap<usize, (Option<CatalystInfo>, MarketLevels)>, ScanError> {
        let mut tasks = JoinSet::new();

        for (idx, input) in inputs.iter().enumerate() {
            if input.symbol.trim().is_empty() {
                continue;
            }
            let news = Arc::clone(&self.news);
            let earnings = Arc::clone(&self.earnings);
            let market = Arc::clone(&self.market);
            let input = input.clone();

            tasks.spawn(async move {
                let (news_catalyst, earnings_catalyst, levels) = tokio::join!(
                    news.catalyst(&input),
                    earnings.earnings_context(&input),
                    market.levels(&input),
                );
                // News wins; earnings context fills in only when news is silent.
                let catalyst = news_catalyst?.or(earnings_catalyst?);
                Ok::<_, ScanError>((idx, catalyst, levels?))
            });
        }

        let mut enrichments = HashMap::new();
        while let Some(joined) = tasks.join_next().await {
            let (idx, catalyst, levels) =
                joined.map_err(|e| ScanError::Task(e.to_string()))??;
            enrichments.insert(idx, (catalyst, levels));
        }
        Ok(enrichments)
    }
}

fn rejected(mut record: EnrichedTicker, reason: impl Into<String>) -> EnrichedTicker {
    record.tier = Some(Tier::DoNotTrade);
    record.tier_reason = Some(reason.into());
    record
}
