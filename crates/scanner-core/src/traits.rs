use crate::{CatalystInfo, MarketLevels, ScanError, TickerInput};
use async_trait::async_trait;

/// Trait for news-derived catalyst lookup.
///
/// Implementations decide their own failure policy; a provider that cannot
/// reach its backend should degrade to `Ok(None)` for that ticker rather
/// than failing the whole scan.
#[async_trait]
pub trait NewsProvider: Send + Sync {
    async fn catalyst(&self, ticker: &TickerInput) -> Result<Option<CatalystInfo>, ScanError>;
}

/// Trait for earnings-calendar context. Only ever yields a catalyst of type
/// earnings, or nothing. Consulted when the news provider finds no catalyst.
#[async_trait]
pub trait EarningsProvider: Send + Sync {
    async fn earnings_context(
        &self,
        ticker: &TickerInput,
    ) -> Result<Option<CatalystInfo>, ScanError>;
}

/// Trait for reference price levels. Always yields a `MarketLevels` value;
/// unknown fields are simply left unset.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn levels(&self, ticker: &TickerInput) -> Result<MarketLevels, ScanError>;
}
