use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use common::Config;
use engine::{Walker, WalkerFileConfig};
use feed::{BinanceFeed, PriceSource, SyntheticFeed};
use signal::{RemoteSignalSource, SignalSource};

/// Seed and anchor price for the synthetic fallback series.
const SYNTHETIC_SEED: u64 = 42;
const SYNTHETIC_START_PRICE: f64 = 30_000.0;

#[tokio::main]
async fn main() {
    // ── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env();
    info!(pair = %cfg.pair, history_days = cfg.history_days, "signalwalk starting");
    let walker_cfg = WalkerFileConfig::load(&cfg.walker_config_path).walker;

    // ── API server (up before the data load, like the reference behaviour:
    //    requests meanwhile answer 503 not-initialized) ──────────────────────
    let slot: api::WalkerSlot = Arc::new(RwLock::new(None));
    let state = api::AppState {
        walker: slot.clone(),
    };
    tokio::spawn(api::serve(state, cfg.server_port));

    // ── Signal source ─────────────────────────────────────────────────────────
    if cfg.signal_api_key.is_none() {
        warn!("SIGNAL_API_KEY not set — every decision will use the local heuristic");
    }
    let signal_source: Arc<dyn SignalSource> = Arc::new(RemoteSignalSource::new(
        cfg.signal_api_key.clone(),
        cfg.signal_api_url.clone(),
        cfg.signal_model.clone(),
    ));

    // ── Historical data, synthetic fallback ───────────────────────────────────
    let since = Utc::now() - Duration::days(cfg.history_days as i64);
    info!("Fetching historical candle data...");
    let series = match BinanceFeed::new().fetch_hourly(&cfg.pair, since).await {
        Ok(series) => {
            info!(candles = series.len(), "Historical data loaded");
            series
        }
        Err(e) => {
            warn!(error = %e, "Live fetch failed — generating synthetic series");
            SyntheticFeed::new(SYNTHETIC_SEED, SYNTHETIC_START_PRICE)
                .fetch_hourly(&cfg.pair, since)
                .await
                .unwrap_or_else(|e| panic!("Synthetic feed failed: {e}"))
        }
    };

    // ── Walker ────────────────────────────────────────────────────────────────
    let walker = Walker::new(Arc::new(series), signal_source, walker_cfg);
    *slot.write().await = Some(Arc::new(walker));
    info!("Walker initialized. Serving requests.");

    tokio::signal::ctrl_c().await.unwrap();
    info!("Shutdown signal received. Exiting.");
}
