pub mod binance;
pub mod synthetic;

pub use binance::BinanceFeed;
pub use synthetic::SyntheticFeed;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use common::{CandleSeries, Result};

/// Abstraction over the historical price source.
///
/// `BinanceFeed` implements this against the live klines endpoint.
/// `SyntheticFeed` implements this as the startup fallback when the live
/// fetch fails. The walker only ever sees the resulting `CandleSeries`.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch hourly candles for `pair` from `since` up to now.
    async fn fetch_hourly(&self, pair: &str, since: DateTime<Utc>) -> Result<CandleSeries>;
}
