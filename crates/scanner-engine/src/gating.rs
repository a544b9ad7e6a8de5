//! Hard gate: all-or-nothing admission filter applied before classification.

use scanner_core::{CatalystInfo, CatalystType, ThresholdConfig, TickerInput};

/// Detail phrases that mark a catalyst record as empty noise. Matched
/// case-insensitively as substrings.
const NO_CATALYST_PHRASES: &[&str] = &[
    "no clear catalyst",
    "no identifiable catalyst",
    "no catalyst",
    "drifting",
];

/// Gate verdict for one ticker. The reason is set only on rejection.
#[derive(Debug, Clone)]
pub struct GateDecision {
    pub pass: bool,
    pub reason: Option<String>,
}

impl GateDecision {
    fn passed() -> Self {
        Self {
            pass: true,
            reason: None,
        }
    }

    fn rejected(reason: impl Into<String>) -> Self {
        Self {
            pass: false,
            reason: Some(reason.into()),
        }
    }
}

/// Binary admission test. Checks run in a fixed order so the reported reason
/// is deterministic; the order never changes the pass/fail outcome.
pub fn hard_gate(
    input: &TickerInput,
    catalyst: Option<&CatalystInfo>,
    thresholds: &ThresholdConfig,
) -> GateDecision {
    // 1. Catalyst gate: the only rule that can override otherwise-qualifying
    // quantitative signals.
    let catalyst = match catalyst {
        Some(c) if c.catalyst_type != CatalystType::None => c,
        _ => return GateDecision::rejected("No identifiable catalyst"),
    };
    let detail_lower = catalyst.detail.to_lowercase();
    if NO_CATALYST_PHRASES.iter().any(|p| detail_lower.contains(p)) {
        return GateDecision::rejected("No identifiable catalyst");
    }

    // 2. Price gate
    let price = match input.price() {
        Some(p) => p,
        None => return GateDecision::rejected("Missing price data"),
    };
    if price < thresholds.min_price || price > thresholds.max_price {
        return GateDecision::rejected(format!(
            "Price ${:.2} outside bounds (${}-${})",
            price, thresholds.min_price, thresholds.max_price
        ));
    }

    // 3. Average volume gate
    let avg_volume = input.avg_volume.unwrap_or(0.0);
    if avg_volume <= 0.0 || avg_volume < thresholds.min_avg_volume {
        return GateDecision::rejected(format!(
            "Average volume {} below minimum {}",
            avg_volume, thresholds.min_avg_volume
        ));
    }

    // 4. Pre-market volume gate
    let pm_volume = input.pm_volume.unwrap_or(0.0);
    if pm_volume <= 0.0 || pm_volume < thresholds.min_pm_volume {
        return GateDecision::rejected(format!(
            "PM volume {} below minimum {}",
            pm_volume, thresholds.min_pm_volume
        ));
    }

    // 5. Gap gate, absolute value. An unknown gap does NOT trigger this rule.
    if let Some(gap) = input.pm_change_pct {
        if gap.abs() < thresholds.min_gap_pct {
            return GateDecision::rejected(format!(
                "Gap {:.1}% below minimum +/-{}%",
                gap, thresholds.min_gap_pct
            ));
        }
    }

    // 6. Optional float cap
    if let (Some(max_float), Some(float)) = (thresholds.max_float, input.float) {
        if float > max_float {
            return GateDecision::rejected(format!(
                "Float {:.0}M exceeds max {:.0}M",
                float / 1e6,
                max_float / 1e6
            ));
        }
    }

    GateDecision::passed()
}
