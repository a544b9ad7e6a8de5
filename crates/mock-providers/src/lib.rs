//! Fixture-backed provider implementations.
//!
//! Interchangeable with any production provider behind the same traits;
//! used by the CLI for offline runs and by integration-style tests. The
//! fixture universe covers one symbol per catalyst category.

use async_trait::async_trait;
use scanner_core::{
    CatalystInfo, CatalystType, EarningsProvider, MarketDataProvider, MarketLevels, NewsProvider,
    ScanError, TickerInput,
};

fn catalyst(
    catalyst_type: CatalystType,
    detail: &str,
    earnings_timing: Option<&str>,
) -> CatalystInfo {
    CatalystInfo {
        catalyst_type,
        detail: detail.to_string(),
        earnings_timing: earnings_timing.map(str::to_string),
    }
}

fn fixture_catalyst(symbol: &str) -> Option<CatalystInfo> {
    match symbol {
        "NVDA" => Some(catalyst(
            CatalystType::Earnings,
            "Q4 beat: revenue $39.3B vs $38.1B est; data-centre up 93% YoY; raised FY guidance",
            Some("Reported last night (after close)"),
        )),
        "SMCI" => Some(catalyst(
            CatalystType::Product,
            "Announced new liquid-cooled AI server rack; major OEM partnership with NVDA",
            Some("N/A"),
        )),
        "MARA" => Some(catalyst(
            CatalystType::Sector,
            "BTC breaks $105k overnight; hashrate expansion announced",
            Some("Earnings next week"),
        )),
        "RIVN" => Some(catalyst(
            CatalystType::Contract,
            "Awarded $5B fleet contract with Amazon for next-gen delivery vans",
            Some("Reported 2 weeks ago"),
        )),
        "PLTR" => Some(catalyst(
            CatalystType::Upgrade,
            "Morgan Stanley upgrades to overweight; PT raised to $100",
            Some("Earnings in 3 weeks"),
        )),
        "BIOR" => Some(catalyst(
            CatalystType::Fda,
            "FDA grants Fast Track designation for lead compound BIO-101",
            Some("N/A"),
        )),
        "LCID" => Some(catalyst(
            CatalystType::Offering,
            "$1.5B secondary offering priced at $2.40; dilution concerns",
            Some("Reported last week"),
        )),
        "FLNC" => Some(catalyst(
            CatalystType::General,
            "No identifiable catalyst - drifting on low volume",
            None,
        )),
        "RXRX" => Some(catalyst(
            CatalystType::Merger,
            "Reports of acquisition talks with major pharma (unconfirmed)",
            Some("N/A"),
        )),
        "PRAX" => Some(catalyst(
            CatalystType::Fda,
            "Phase 3 data readout - primary endpoint met with p<0.001; NDA filing expected Q2",
            Some("N/A"),
        )),
        _ => None,
    }
}

fn levels(values: [f64; 9]) -> MarketLevels {
    let [prev_high, prev_low, prev_close, pm_high, pm_low, week52_high, week52_low, htf_resistance, htf_support] =
        values;
    MarketLevels {
        prev_high: Some(prev_high),
        prev_low: Some(prev_low),
        prev_close: Some(prev_close),
        pm_high: Some(pm_high),
        pm_low: Some(pm_low),
        week52_high: Some(week52_high),
        week52_low: Some(week52_low),
        htf_resistance: Some(htf_resistance),
        htf_support: Some(htf_support),
    }
}

fn fixture_levels(symbol: &str) -> Option<MarketLevels> {
    match symbol {
        "NVDA" => Some(levels([
            145.20, 140.10, 142.50, 153.80, 149.20, 153.80, 65.80, 155.00, 138.00,
        ])),
        "SMCI" => Some(levels([
            39.80, 36.50, 38.20, 45.20, 42.00, 122.90, 18.50, 48.00, 35.00,
        ])),
        "MARA" => Some(levels([
            19.80, 18.10, 18.90, 21.30, 19.90, 34.00, 11.20, 22.50, 17.50,
        ])),
        "RIVN" => Some(levels([
            14.10, 12.80, 13.40, 15.20, 14.40, 28.60, 8.40, 16.00, 12.50,
        ])),
        "PLTR" => Some(levels([
            83.50, 80.60, 82.30, 85.40, 83.90, 85.40, 21.00, 88.00, 78.00,
        ])),
        "BIOR" => Some(levels([
            2.30, 1.95, 2.10, 2.65, 2.35, 6.80, 1.40, 3.00, 1.80,
        ])),
        "LCID" => Some(levels([
            3.10, 2.70, 2.80, 2.60, 2.38, 7.20, 2.00, 3.20, 2.30,
        ])),
        "FLNC" => Some(levels([
            8.70, 8.20, 8.40, 8.65, 8.50, 24.30, 6.10, 9.50, 7.80,
        ])),
        "RXRX" => Some(levels([
            6.20, 5.60, 5.90, 6.90, 6.30, 12.40, 3.80, 7.50, 5.20,
        ])),
        "PRAX" => Some(levels([
            74.00, 69.50, 72.00, 92.00, 85.00, 92.00, 28.00, 95.00, 68.00,
        ])),
        _ => None,
    }
}

pub struct MockNewsProvider;

#[async_trait]
impl NewsProvider for MockNewsProvider {
    async fn catalyst(&self, ticker: &TickerInput) -> Result<Option<CatalystInfo>, ScanError> {
        Ok(fixture_catalyst(&ticker.symbol))
    }
}

pub struct MockEarningsProvider;

#[async_trait]
impl EarningsProvider for MockEarningsProvider {
    async fn earnings_context(
        &self,
        ticker: &TickerInput,
    ) -> Result<Option<CatalystInfo>, ScanError> {
        // Only earnings-type catalysts qualify as earnings context.
        Ok(fixture_catalyst(&ticker.symbol)
            .filter(|c| c.catalyst_type == CatalystType::Earnings))
    }
}

pub struct MockMarketDataProvider;

#[async_trait]
impl MarketDataProvider for MockMarketDataProvider {
    async fn levels(&self, ticker: &TickerInput) -> Result<MarketLevels, ScanError> {
        // Unknown symbols degrade to a level set seeded from the ticker's
        // own pre-market print rather than failing the scan.
        Ok(fixture_levels(&ticker.symbol).unwrap_or(MarketLevels {
            pm_high: ticker.pm_price,
            pm_low: ticker.pm_price,
            ..Default::default()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(symbol: &str) -> TickerInput {
        TickerInput {
            symbol: symbol.to_string(),
            pm_price: Some(12.5),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn news_provider_returns_fixture_catalyst() {
        let catalyst = MockNewsProvider
            .catalyst(&input("NVDA"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(catalyst.catalyst_type, CatalystType::Earnings);
        assert!(catalyst.detail.contains("Q4 beat"));
    }

    #[tokio::test]
    async fn news_provider_unknown_symbol_is_none() {
        assert!(MockNewsProvider
            .catalyst(&input("ZZZZ"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn earnings_provider_only_yields_earnings() {
        // SMCI's fixture catalyst is product news, not earnings context.
        assert!(MockEarningsProvider
            .earnings_context(&input("SMCI"))
            .await
            .unwrap()
            .is_none());
        let context = MockEarningsProvider
            .earnings_context(&input("NVDA"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(context.catalyst_type, CatalystType::Earnings);
    }

    #[tokio::test]
    async fn market_provider_degrades_for_unknown_symbol() {
        let levels = MockMarketDataProvider
            .levels(&input("ZZZZ"))
            .await
            .unwrap();
        assert_eq!(levels.pm_high, Some(12.5));
        assert_eq!(levels.prev_close, None);
    }

    #[tokio::test]
    async fn market_provider_returns_fixture_levels() {
        let levels = MockMarketDataProvider
            .levels(&input("NVDA"))
            .await
            .unwrap();
        assert_eq!(levels.pm_high, Some(153.80));
        assert_eq!(levels.htf_support, Some(138.00));
    }
}
