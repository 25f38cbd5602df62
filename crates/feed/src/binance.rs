use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use common::{Candle, CandleSeries, Error, Result};

use crate::PriceSource;

const BASE_URL: &str = "https://api.binance.com";
/// Binance caps klines responses at 1000 rows per request.
const PAGE_LIMIT: usize = 1000;
/// Pause between pages to stay inside the public rate limit.
const PAGE_PAUSE: Duration = Duration::from_millis(250);

/// REST client for the public Binance klines endpoint.
pub struct BinanceFeed {
    http: Client,
}

impl BinanceFeed {
    pub fn new() -> Self {
        Self {
            http: Client::builder()
                .use_rustls_tls()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
        }
    }

    async fn fetch_page(&self, pair: &str, since_ms: i64) -> Result<Vec<Vec<Value>>> {
        let url = format!(
            "{BASE_URL}/api/v3/klines?symbol={pair}&interval=1h&startTime={since_ms}&limit={PAGE_LIMIT}"
        );

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| Error::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(Error::Feed(format!("HTTP {status}: {body}")));
        }
        Ok(serde_json::from_str(&body)?)
    }
}

impl Default for BinanceFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceSource for BinanceFeed {
    async fn fetch_hourly(&self, pair: &str, since: DateTime<Utc>) -> Result<CandleSeries> {
        let mut since_ms = since.timestamp_millis();
        let mut candles = Vec::new();

        loop {
            let rows = self.fetch_page(pair, since_ms).await?;
            if rows.is_empty() {
                break;
            }

            for row in &rows {
                candles.push(kline_candle(row)?);
            }

            let last_open = rows
                .last()
                .and_then(|r| r.first())
                .and_then(Value::as_i64)
                .ok_or_else(|| Error::Feed("kline page missing open time".to_string()))?;
            since_ms = last_open + 1;

            debug!(pair = %pair, fetched = candles.len(), "Kline page received");
            tokio::time::sleep(PAGE_PAUSE).await;
        }

        CandleSeries::new(candles)
    }
}

/// Parse one klines row: `[openTime, open, high, low, close, volume, ...]`,
/// prices as decimal strings.
fn kline_candle(row: &[Value]) -> Result<Candle> {
    let open_time = row
        .first()
        .and_then(Value::as_i64)
        .ok_or_else(|| Error::Feed("kline row missing open time".to_string()))?;
    let timestamp = DateTime::from_timestamp_millis(open_time)
        .ok_or_else(|| Error::Feed(format!("kline open time {open_time} out of range")))?;

    let field = |i: usize| -> Result<f64> {
        row.get(i)
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<f64>().ok())
            .ok_or_else(|| Error::Feed(format!("kline row field {i} is not a numeric string")))
    };

    Ok(Candle {
        timestamp,
        open: field(1)?,
        high: field(2)?,
        low: field(3)?,
        close: field(4)?,
        volume: field(5)?,
    })
}
