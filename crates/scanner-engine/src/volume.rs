//! Relative volume derivation.

/// Expected fraction of a full day's volume that prints pre-market.
///
/// US pre-market runs 04:00-09:30 ET against a 6.5 h regular session, with
/// most PM volume clustering in the final hour or two before the open. PM
/// volume equal to 20% of the full-day average therefore reads as relVol 1.0
/// ("normal pace"); 1.5-2.0+ signals unusual activity.
pub const PM_SESSION_FRACTION: f64 = 0.20;

/// `pm_volume / (avg_volume * PM_SESSION_FRACTION)`.
///
/// Undefined when either input is missing or zero; unknown volume must not
/// masquerade as zero activity.
pub fn relative_volume(pm_volume: Option<f64>, avg_volume: Option<f64>) -> Option<f64> {
    match (pm_volume, avg_volume) {
        (Some(pm), Some(avg)) if pm > 0.0 && avg > 0.0 => Some(pm / (avg * PM_SESSION_FRACTION)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_pace_is_one() {
        // 20% of a 1M average day pre-market == tracking normal volume
        let rel = relative_volume(Some(200_000.0), Some(1_000_000.0)).unwrap();
        assert!((rel - 1.0).abs() < 1e-9);
    }

    #[test]
    fn doubled_pace() {
        let rel = relative_volume(Some(400_000.0), Some(1_000_000.0)).unwrap();
        assert!((rel - 2.0).abs() < 1e-9);
    }

    #[test]
    fn undefined_when_missing_or_zero() {
        assert_eq!(relative_volume(None, Some(1_000_000.0)), None);
        assert_eq!(relative_volume(Some(200_000.0), None), None);
        assert_eq!(relative_volume(Some(0.0), Some(1_000_000.0)), None);
        assert_eq!(relative_volume(Some(200_000.0), Some(0.0)), None);
    }
}
