//! Tier ranker: scores the admitted set and buckets it into the
//! capacity-limited watchlist tiers.

use scanner_core::{Classification, Conviction, EnrichedTicker, PriorityEntry, PriorityTiers};

/// Tier 1 holds at most this many names. A focus list longer than four is
/// not a focus list.
pub const TIER1_CAPACITY: usize = 4;

/// Ranking score for one admitted ticker.
///
/// Components: catalyst strength (0-3, major types score full weight),
/// relative volume (0-2, capped), gap magnitude (0-2, capped),
/// classification bonus (A=3/B=2/C=1), conviction bonus (HIGH=2/MEDIUM=1).
pub fn score_ticker(ticker: &EnrichedTicker) -> f64 {
    let catalyst_score = match &ticker.catalyst {
        Some(c) if c.catalyst_type.is_major() => 3.0,
        Some(_) => 1.5,
        None => 0.0,
    };

    let rel_vol_score = (ticker.rel_volume.unwrap_or(0.0) / 2.0).min(2.0);
    let gap_score = (ticker.input.pm_change_pct.unwrap_or(0.0).abs() / 5.0).min(2.0);

    let class_score = match ticker.classification {
        Some(Classification::A) => 3.0,
        Some(Classification::B) => 2.0,
        _ => 1.0,
    };
    let conviction_score = match ticker.conviction {
        Some(Conviction::High) => 2.0,
        Some(Conviction::Medium) => 1.0,
        _ => 0.0,
    };

    catalyst_score + rel_vol_score + gap_score + class_score + conviction_score
}

/// Sort the admitted set by score (descending, stable; input order breaks
/// ties) and assign tiers. Class C is pinned to Tier 3 no matter how it
/// scores; the first `TIER1_CAPACITY` non-C names take Tier 1 and the rest
/// spill into Tier 2.
pub fn rank_tiers(tickers: &[EnrichedTicker]) -> PriorityTiers {
    let mut scored: Vec<(f64, &EnrichedTicker)> =
        tickers.iter().map(|t| (score_ticker(t), t)).collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    let mut tiers = PriorityTiers::default();
    let mut rank = 0u32;
    // Score of the last name admitted to Tier 1; used to tell capacity
    // displacement apart from a genuinely weaker signal.
    let mut tier1_cutoff = f64::NEG_INFINITY;

    for (score, ticker) in &scored {
        rank += 1;

        if ticker.classification == Some(Classification::C) {
            tiers.tier3.push(PriorityEntry {
                rank: None,
                ticker: ticker.symbol().to_string(),
                classification: ticker.classification,
                primary_strategy: ticker.primary_strategy,
                conviction: ticker.conviction,
                key_level: None,
                why_secondary: None,
                reason: Some(
                    "Class C - observe only; no clean strategy mapping for active trading"
                        .to_string(),
                ),
            });
            continue;
        }

        let entry = PriorityEntry {
            rank: Some(rank),
            ticker: ticker.symbol().to_string(),
            classification: ticker.classification,
            primary_strategy: ticker.primary_strategy,
            conviction: ticker.conviction,
            key_level: ticker.levels.pm_high.or(ticker.levels.prev_high),
            why_secondary: None,
            reason: None,
        };

        if tiers.tier1.len() < TIER1_CAPACITY {
            tier1_cutoff = *score;
            tiers.tier1.push(entry);
        } else {
            let why_secondary = if (score - tier1_cutoff).abs() < 1e-9 {
                "Tier 1 full - displaced by higher-scoring names"
            } else {
                "Lower catalyst strength or liquidity"
            };
            tiers.tier2.push(PriorityEntry {
                why_secondary: Some(why_secondary.to_string()),
                ..entry
            });
        }
    }

    tiers
}
