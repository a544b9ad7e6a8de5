//! Classifier: assigns a trading posture (A/B/C) to every gate-admitted
//! ticker, plus the strategy/risk/conviction fields derived from it.

use scanner_core::{CatalystType, Classification, EnrichedTicker};

/// Classify an admitted ticker. Decision rules run in order; the first match
/// wins. Always produces exactly one class; weak or absent signals fall
/// through to C, never to an error.
pub fn classify(mut ticker: EnrichedTicker) -> EnrichedTicker {
    let rel_vol = ticker.rel_volume.unwrap_or(0.0);
    let gap = ticker.input.pm_change_pct.unwrap_or(0.0);
    let abs_gap = gap.abs();
    let catalyst_type = ticker.catalyst_type();

    // PM structure: price holding within 3% of its pre-market high. False
    // when either side is unknown.
    let holding_highs = match (ticker.input.pm_price, ticker.levels.pm_high) {
        (Some(pm_price), Some(pm_high)) => pm_price >= 0.97 * pm_high,
        _ => false,
    };

    // Negative gap on a dilution/guidance catalyst reads as a selloff:
    // reversal watch only.
    let is_selloff =
        gap < -3.0 && matches!(catalyst_type, CatalystType::Offering | CatalystType::Guidance);

    let (classification, reason) = if catalyst_type.is_major()
        && rel_vol >= 1.5
        && gap >= 5.0
        && holding_highs
    {
        (
            Classification::A,
            "Major catalyst, strong gap, high relative volume, holding PM highs",
        )
    } else if catalyst_type.is_valid() && rel_vol >= 1.0 && abs_gap >= 3.0 && !is_selloff {
        // A valid catalyst qualifies B on a negative gap too (e.g. an
        // earnings miss): down moves with real catalysts stay tradeable.
        (
            Classification::B,
            "Fresh catalyst with adequate volume and gap",
        )
    } else if is_selloff || catalyst_type == CatalystType::Offering {
        (
            Classification::C,
            "Selloff / dilution catalyst - reversal watch only",
        )
    } else if catalyst_type.is_valid() && abs_gap >= 3.0 {
        // Catalyst and gap are there but relative volume is not.
        (
            Classification::C,
            "Catalyst present but relative volume insufficient; observe only",
        )
    } else {
        (
            Classification::C,
            "Insufficient clarity - lacking strong structure or catalyst strength",
        )
    };

    let strategies = classification.permitted_strategies();
    let primary = strategies[0];
    let secondary = strategies.get(1).copied().unwrap_or(primary);

    let primary_risk = if classification == Classification::C {
        "Knife risk / failed reclaim"
    } else if gap < 0.0 {
        "Continuation lower / failed bounce"
    } else {
        "Gap fill / loss of PM structure"
    };

    let invalidation = if let Some(pm_low) = ticker.levels.pm_low {
        format!("Loss of {:.2} (PM low)", pm_low)
    } else if let Some(prev_close) = ticker.levels.prev_close {
        format!("Loss of {:.2} (prev close)", prev_close)
    } else {
        "Loss of PM low / key support".to_string()
    };

    let conditional_note = if classification == Classification::C {
        "OBSERVE ONLY - trade only after confirmed reclaim with volume"
    } else {
        "Standard risk controls apply"
    };

    ticker.classification = Some(classification);
    ticker.classification_reason = Some(reason.to_string());
    ticker.permitted_strategies = Some(strategies.to_vec());
    ticker.primary_strategy = Some(primary);
    ticker.secondary_strategy = Some(secondary);
    ticker.conditional_note = Some(conditional_note.to_string());
    ticker.primary_risk = Some(primary_risk.to_string());
    ticker.invalidation = Some(invalidation);
    ticker.conviction = Some(classification.conviction());
    ticker
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanner_core::{
        CatalystInfo, CatalystType, Conviction, MarketLevels, Strategy, TickerInput,
    };

    fn catalyst(catalyst_type: CatalystType, detail: &str) -> Option<CatalystInfo> {
        Some(CatalystInfo {
            catalyst_type,
            detail: detail.to_string(),
            earnings_timing: None,
        })
    }

    fn make_ticker(
        catalyst_info: Option<CatalystInfo>,
        rel_volume: f64,
        pm_change_pct: f64,
        pm_price: f64,
        levels: MarketLevels,
    ) -> EnrichedTicker {
        EnrichedTicker::new(
            TickerInput {
                symbol: "TEST".to_string(),
                pm_price: Some(pm_price),
                pm_change_pct: Some(pm_change_pct),
                pm_volume: Some(200_000.0),
                avg_volume: Some(500_000.0),
                float: Some(10_000_000.0),
                ..Default::default()
            },
            catalyst_info,
            levels,
            Some(rel_volume),
        )
    }

    fn default_levels() -> MarketLevels {
        MarketLevels {
            pm_high: Some(10.2),
            pm_low: Some(9.5),
            ..Default::default()
        }
    }

    #[test]
    fn class_a_momentum_continuation() {
        let out = classify(make_ticker(
            catalyst(CatalystType::Earnings, "Big beat"),
            2.0,
            8.0,
            10.1,
            default_levels(),
        ));
        assert_eq!(out.classification, Some(Classification::A));
        let strategies = out.permitted_strategies.unwrap();
        assert!(strategies.contains(&Strategy::OpeningRangeBreakout));
        assert!(strategies.contains(&Strategy::MomentumExtension));
        assert_eq!(out.conviction, Some(Conviction::High));
    }

    #[test]
    fn not_a_when_off_pm_highs() {
        // pm price well below the 10.2 PM high
        let out = classify(make_ticker(
            catalyst(CatalystType::Earnings, "Big beat"),
            2.0,
            8.0,
            9.0,
            default_levels(),
        ));
        assert_ne!(out.classification, Some(Classification::A));
    }

    #[test]
    fn not_a_when_rel_vol_below_threshold() {
        let out = classify(make_ticker(
            catalyst(CatalystType::Product, "Launch"),
            1.2,
            8.0,
            10.1,
            default_levels(),
        ));
        assert_ne!(out.classification, Some(Classification::A));
    }

    #[test]
    fn not_a_when_gap_below_five_pct() {
        let out = classify(make_ticker(
            catalyst(CatalystType::Product, "Launch"),
            2.0,
            4.0,
            10.1,
            default_levels(),
        ));
        assert_ne!(out.classification, Some(Classification::A));
    }

    #[test]
    fn class_b_fresh_news() {
        let out = classify(make_ticker(
            catalyst(CatalystType::Sector, "Sector rotation"),
            1.2,
            4.0,
            9.0,
            default_levels(),
        ));
        assert_eq!(out.classification, Some(Classification::B));
        let strategies = out.permitted_strategies.unwrap();
        assert_eq!(
            strategies,
            vec![
                Strategy::OpeningRangeBreakout,
                Strategy::SupportBounce,
                Strategy::VwapReclaim,
            ]
        );
        assert_eq!(out.conviction, Some(Conviction::Medium));
    }

    #[test]
    fn class_b_accepts_negative_gap_with_real_catalyst() {
        let out = classify(make_ticker(
            catalyst(CatalystType::Fda, "Phase 2 miss"),
            1.5,
            -6.0,
            10.0,
            default_levels(),
        ));
        assert_eq!(out.classification, Some(Classification::B));
    }

    #[test]
    fn class_c_offering_selloff() {
        let out = classify(make_ticker(
            catalyst(CatalystType::Offering, "$1B offering"),
            2.0,
            -10.0,
            10.0,
            default_levels(),
        ));
        assert_eq!(out.classification, Some(Classification::C));
        let strategies = out.permitted_strategies.unwrap();
        assert_eq!(
            strategies,
            vec![Strategy::VwapReclaim, Strategy::PostFlushReclaim]
        );
        assert_eq!(out.conviction, Some(Conviction::Low));
    }

    #[test]
    fn guidance_selloff_is_class_c() {
        let out = classify(make_ticker(
            catalyst(CatalystType::Guidance, "FY guidance cut"),
            1.8,
            -7.0,
            10.0,
            default_levels(),
        ));
        assert_eq!(out.classification, Some(Classification::C));
    }

    #[test]
    fn class_c_when_rel_vol_insufficient_despite_catalyst() {
        let out = classify(make_ticker(
            catalyst(CatalystType::Upgrade, "PT raised"),
            0.5,
            4.0,
            10.0,
            default_levels(),
        ));
        assert_eq!(out.classification, Some(Classification::C));
        assert!(out
            .classification_reason
            .unwrap()
            .contains("relative volume insufficient"));
    }

    #[test]
    fn class_c_when_catalyst_weak() {
        let out = classify(make_ticker(
            catalyst(CatalystType::General, "Nothing notable"),
            0.3,
            1.0,
            10.0,
            default_levels(),
        ));
        assert_eq!(out.classification, Some(Classification::C));
        assert!(out.classification_reason.unwrap().contains("Insufficient clarity"));
    }

    #[test]
    fn observe_only_note_for_class_c() {
        let out = classify(make_ticker(
            catalyst(CatalystType::General, "Nothing"),
            0.3,
            1.0,
            10.0,
            default_levels(),
        ));
        assert!(out.conditional_note.unwrap().contains("OBSERVE ONLY"));
    }

    #[test]
    fn class_a_strategy_list_is_exact() {
        let out = classify(make_ticker(
            catalyst(CatalystType::Fda, "Approval"),
            3.0,
            15.0,
            10.2,
            default_levels(),
        ));
        assert_eq!(
            out.permitted_strategies.unwrap(),
            vec![Strategy::OpeningRangeBreakout, Strategy::MomentumExtension]
        );
    }

    #[test]
    fn invalidation_prefers_pm_low() {
        let out = classify(make_ticker(
            catalyst(CatalystType::Product, "Launch"),
            2.0,
            6.0,
            10.0,
            default_levels(),
        ));
        assert!(out.invalidation.unwrap().contains("9.50"));
    }

    #[test]
    fn invalidation_falls_back_to_prev_close() {
        let levels = MarketLevels {
            prev_close: Some(9.0),
            ..Default::default()
        };
        let out = classify(make_ticker(
            catalyst(CatalystType::Product, "Launch"),
            2.0,
            6.0,
            10.0,
            levels,
        ));
        assert!(out.invalidation.unwrap().contains("9.00"));
    }

    #[test]
    fn invalidation_generic_when_no_levels() {
        let out = classify(make_ticker(
            catalyst(CatalystType::Product, "Launch"),
            2.0,
            6.0,
            10.0,
            MarketLevels::default(),
        ));
        assert_eq!(
            out.invalidation.unwrap(),
            "Loss of PM low / key support"
        );
    }

    #[test]
    fn class_c_gets_knife_risk() {
        let out = classify(make_ticker(
            catalyst(CatalystType::Offering, "Dilution"),
            1.0,
            -8.0,
            10.0,
            default_levels(),
        ));
        assert!(out.primary_risk.unwrap().contains("Knife"));
    }

    #[test]
    fn negative_gap_b_gets_continuation_risk() {
        let out = classify(make_ticker(
            catalyst(CatalystType::Fda, "Phase 2 miss"),
            1.5,
            -6.0,
            10.0,
            default_levels(),
        ));
        assert!(out.primary_risk.unwrap().contains("Continuation lower"));
    }

    #[test]
    fn missing_rel_volume_reads_as_zero() {
        let mut ticker = make_ticker(
            catalyst(CatalystType::Earnings, "Beat"),
            0.0,
            6.0,
            10.1,
            default_levels(),
        );
        ticker.rel_volume = None;
        let out = classify(ticker);
        // Without rel vol the B volume floor fails; gap + catalyst land in C.
        assert_eq!(out.classification, Some(Classification::C));
    }
}
