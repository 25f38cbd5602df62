use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::info;

use common::{Candle, CandleSeries, Result};

use crate::PriceSource;

/// Seeded random-walk candle generator.
///
/// Used as the startup fallback when the live fetch fails, so the walker
/// always has a series to evaluate against. Deterministic for a given seed.
pub struct SyntheticFeed {
    seed: u64,
    start_price: f64,
}

impl SyntheticFeed {
    pub fn new(seed: u64, start_price: f64) -> Self {
        Self { seed, start_price }
    }

    /// Generate `hours` hourly candles starting at `since`.
    pub fn generate(&self, since: DateTime<Utc>, hours: usize) -> Result<CandleSeries> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut price = self.start_price;
        let mut candles = Vec::with_capacity(hours);

        for i in 0..hours {
            let drift: f64 = rng.random_range(-0.01..0.01);
            let open = price;
            let close = open * (1.0 + drift);
            let upper_wick: f64 = rng.random_range(0.0..0.005);
            let lower_wick: f64 = rng.random_range(0.0..0.005);

            candles.push(Candle {
                timestamp: since + Duration::hours(i as i64),
                open,
                high: open.max(close) * (1.0 + upper_wick),
                low: open.min(close) * (1.0 - lower_wick),
                close,
                volume: rng.random_range(50.0..500.0),
            });
            price = close;
        }

        CandleSeries::new(candles)
    }
}

#[async_trait]
impl PriceSource for SyntheticFeed {
    async fn fetch_hourly(&self, pair: &str, since: DateTime<Utc>) -> Result<CandleSeries> {
        let hours = (Utc::now() - since).num_hours().max(0) as usize;
        info!(pair = %pair, hours, seed = self.seed, "Generating synthetic candle series");
        self.generate(since, hours)
    }
}
