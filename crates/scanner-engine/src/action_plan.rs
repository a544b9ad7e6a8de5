//! Action-plan synthesizer: derives the three-window session narrative from
//! classifications and tiers already computed upstream. No new judgement is
//! made here.

use scanner_core::{
    ActionPlan, ActionWindow, Classification, EnrichedTicker, PriorityEntry, PriorityTiers,
    Strategy,
};

/// Build the session plan. Window membership follows the watchlist: the
/// opening window draws on Tier 1 only; mid and late session draw on
/// Tier 1 and Tier 2. Class C names appear only in the standing
/// confirmation instruction.
pub fn build_action_plan(enriched: &[EnrichedTicker], priority: &PriorityTiers) -> ActionPlan {
    let orb_candidates =
        strategy_candidates(enriched, priority.tier1.iter(), Strategy::OpeningRangeBreakout);
    let bounce_candidates = strategy_candidates(
        enriched,
        priority.tier1.iter().chain(priority.tier2.iter()),
        Strategy::SupportBounce,
    );
    let vwap_candidates = strategy_candidates(
        enriched,
        priority.tier1.iter().chain(priority.tier2.iter()),
        Strategy::VwapReclaim,
    );

    let class_c_names: Vec<String> = enriched
        .iter()
        .filter(|t| t.classification == Some(Classification::C))
        .map(|t| t.symbol().to_string())
        .collect();

    let pullback_levels: Vec<String> = priority
        .tier1
        .iter()
        .filter_map(|entry| {
            let ticker = find_ticker(enriched, &entry.ticker)?;
            let level = ticker.levels.pm_low.or(ticker.levels.prev_close)?;
            Some(format!("{} @ {:.2}", ticker.symbol(), level))
        })
        .collect();

    let orb_fallback = if bounce_candidates.is_empty() {
        "VWAP Reclaim setups if structure holds".to_string()
    } else {
        format!(
            "Support Bounce on {}",
            bounce_candidates
                .iter()
                .take(2)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        )
    };

    ActionPlan {
        opening_phase: ActionWindow {
            title: "Opening Phase (14:30-15:30 UK)".to_string(),
            items: vec![
                format!(
                    "Primary ORB Candidates: {}",
                    join_or(&orb_candidates, "None identified")
                ),
                "What Needs to Happen for Entry: Hold PM highs into open, break ORB range with volume confirmation".to_string(),
                format!("If ORB Fails, Switch To: {}", orb_fallback),
                "Maximum Trades This Window: 2".to_string(),
            ],
        },
        mid_session: ActionWindow {
            title: "Mid-Session (15:30-18:30 UK)".to_string(),
            items: vec![
                format!(
                    "Support Bounce Candidates: {}",
                    join_or(&bounce_candidates, "Re-evaluate Tier 1/2 names at HTF support")
                ),
                format!(
                    "Levels I Am Watching for Pullbacks: {}",
                    if pullback_levels.is_empty() {
                        "PM lows and HTF support on Tier 1 names".to_string()
                    } else {
                        pullback_levels.join("; ")
                    }
                ),
                format!(
                    "Class C Names to Check for Confirmation: {} - ONLY after confirmed VWAP reclaim",
                    join_or(&class_c_names, "None")
                ),
            ],
        },
        late_session: ActionWindow {
            title: "Late Session (18:30-20:45 UK)".to_string(),
            items: vec![
                format!(
                    "VWAP Reclaim Candidates: {}",
                    join_or(&vwap_candidates, "Re-evaluate any name that flushed but reclaimed")
                ),
                "Position Size Adjustment: Half size unless A-class setup with fresh catalyst".to_string(),
                "Conditions That Cancel This Window: Daily loss limit hit, 3+ losing trades, or all invalidation levels breached".to_string(),
            ],
        },
    }
}

fn find_ticker<'a>(enriched: &'a [EnrichedTicker], symbol: &str) -> Option<&'a EnrichedTicker> {
    enriched.iter().find(|t| t.symbol() == symbol)
}

fn permits(ticker: &EnrichedTicker, strategy: Strategy) -> bool {
    ticker
        .permitted_strategies
        .as_ref()
        .is_some_and(|strategies| strategies.contains(&strategy))
}

fn strategy_candidates<'a>(
    enriched: &[EnrichedTicker],
    entries: impl Iterator<Item = &'a PriorityEntry>,
    strategy: Strategy,
) -> Vec<String> {
    entries
        .filter(|entry| {
            find_ticker(enriched, &entry.ticker).is_some_and(|t| permits(t, strategy))
        })
        .map(|entry| entry.ticker.clone())
        .collect()
}

fn join_or(names: &[String], fallback: &str) -> String {
    if names.is_empty() {
        fallback.to_string()
    } else {
        names.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::classify;
    use crate::tiering::rank_tiers;
    use scanner_core::{CatalystInfo, CatalystType, MarketLevels, TickerInput};

    fn enriched(symbol: &str, catalyst_type: CatalystType, gap: f64, rel_vol: f64) -> EnrichedTicker {
        classify(EnrichedTicker::new(
            TickerInput {
                symbol: symbol.to_string(),
                pm_price: Some(10.1),
                pm_change_pct: Some(gap),
                pm_volume: Some(400_000.0),
                avg_volume: Some(1_000_000.0),
                ..Default::default()
            },
            Some(CatalystInfo {
                catalyst_type,
                detail: "Catalyst".to_string(),
                earnings_timing: None,
            }),
            MarketLevels {
                pm_high: Some(10.2),
                pm_low: Some(9.5),
                prev_close: Some(9.4),
                ..Default::default()
            },
            Some(rel_vol),
        ))
    }

    #[test]
    fn opening_window_lists_tier1_orb_names() {
        let tickers = vec![
            enriched("AAA", CatalystType::Earnings, 8.0, 2.0), // A: ORB permitted
            enriched("BBB", CatalystType::Sector, 4.0, 1.2),   // B: ORB permitted
        ];
        let priority = rank_tiers(&tickers);
        let plan = build_action_plan(&tickers, &priority);
        assert!(plan.opening_phase.items[0].contains("AAA"));
        assert!(plan.opening_phase.items[0].contains("BBB"));
    }

    #[test]
    fn class_c_appears_only_in_confirmation_line() {
        let tickers = vec![
            enriched("AAA", CatalystType::Earnings, 8.0, 2.0),
            enriched("CCC", CatalystType::Offering, -9.0, 1.5), // C: VWAP permitted
        ];
        let priority = rank_tiers(&tickers);
        let plan = build_action_plan(&tickers, &priority);

        // C sits in Tier 3, so it is not a late-session VWAP candidate...
        assert!(!plan.late_session.items[0].contains("CCC"));
        // ...but it is flagged for reclaim confirmation.
        assert!(plan.mid_session.items[2].contains("CCC"));
        assert!(plan.mid_session.items[2].contains("ONLY after confirmed VWAP reclaim"));
    }

    #[test]
    fn empty_buckets_render_placeholders() {
        let plan = build_action_plan(&[], &PriorityTiers::default());
        assert!(plan.opening_phase.items[0].contains("None identified"));
        assert!(plan.mid_session.items[0].contains("Re-evaluate Tier 1/2 names"));
        assert!(plan.mid_session.items[2].contains("None"));
        assert!(plan.late_session.items[0].contains("Re-evaluate any name"));
    }

    #[test]
    fn bounce_candidates_include_tier2() {
        // Five class B names: four fill Tier 1, the fifth lands in Tier 2 and
        // must still show up for the mid-session bounce window.
        let tickers: Vec<_> = (0..5)
            .map(|i| enriched(&format!("B{}", i), CatalystType::Sector, 4.0, 1.2))
            .collect();
        let priority = rank_tiers(&tickers);
        let plan = build_action_plan(&tickers, &priority);
        assert!(plan.mid_session.items[0].contains("B4"));
    }

    #[test]
    fn pullback_levels_use_pm_low() {
        let tickers = vec![enriched("AAA", CatalystType::Earnings, 8.0, 2.0)];
        let priority = rank_tiers(&tickers);
        let plan = build_action_plan(&tickers, &priority);
        assert!(plan.mid_session.items[1].contains("AAA @ 9.50"));
    }

    #[test]
    fn orb_fallback_names_bounce_candidates() {
        let tickers = vec![
            enriched("AAA", CatalystType::Earnings, 8.0, 2.0),
            enriched("BBB", CatalystType::Sector, 4.0, 1.2),
        ];
        let priority = rank_tiers(&tickers);
        let plan = build_action_plan(&tickers, &priority);
        assert!(plan.opening_phase.items[2].contains("Support Bounce on BBB"));
    }
}
