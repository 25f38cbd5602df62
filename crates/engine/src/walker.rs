use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use common::{
    CandleSeries, Error, EvaluationReport, Result, StepResult, WalkerStatus,
};
use signal::SignalSource;

use crate::config::{EntryPolicy, WalkerConfig};

/// The walk-forward controller.
///
/// Owns the single cursor and drives extract → decide → simulate per step.
/// The cursor lives behind a `Mutex` held for the entire step transition,
/// including the suspension on the remote signal call, so concurrent steps
/// are serialized and never race on the read-modify-write of the position.
pub struct Walker {
    series: Arc<CandleSeries>,
    signal: Arc<dyn SignalSource>,
    cfg: WalkerConfig,
    cursor: Mutex<usize>,
}

impl Walker {
    pub fn new(series: Arc<CandleSeries>, signal: Arc<dyn SignalSource>, cfg: WalkerConfig) -> Self {
        assert!(cfg.trailing_size >= 2, "trailing window must hold at least 2 candles");
        assert!(cfg.horizon_hours >= 1, "horizon must be at least 1 hour");
        info!(
            source = signal.name(),
            trailing = cfg.trailing_size,
            horizon = cfg.horizon_hours,
            candles = series.len(),
            "Walker initialized"
        );
        Self {
            series,
            signal,
            cfg,
            cursor: Mutex::new(0),
        }
    }

    /// Perform one step: wraparound check, window extraction, signal
    /// decision, trade simulation, cursor advance.
    ///
    /// The wraparound reset is silent policy, not an error; only a series
    /// too short for the trailing window itself surfaces
    /// `InsufficientData`.
    pub async fn step(&self) -> Result<StepResult> {
        let mut cursor = self.cursor.lock().await;

        let len = self.series.len();
        let mut position = *cursor;
        if position + self.cfg.trailing_size + self.cfg.horizon_hours > len {
            debug!(position, "End of series reached — wrapping cursor to 0");
            position = 0;
        }

        let (window, future_path) =
            eval::extract(&self.series, position, self.cfg.trailing_size, self.cfg.horizon_hours)?;

        let entry_candle = window.last().ok_or_else(|| Error::InsufficientData {
            position,
            reason: "empty trailing window".to_string(),
        })?;
        let entry_price = match self.cfg.entry_policy {
            EntryPolicy::LastClose => entry_candle.close,
            EntryPolicy::LastOpen => entry_candle.open,
        };
        if entry_price <= 0.0 {
            return Err(Error::InsufficientData {
                position,
                reason: format!("non-positive entry price {entry_price}"),
            });
        }

        // The cursor lock is held across this suspension point on purpose:
        // no other step may move the position while the call is outstanding.
        let decision = self.signal.decide(window).await;

        let evaluation = eval::simulate(
            decision.action,
            entry_price,
            decision.stop_price,
            decision.target_price,
            &future_path,
            self.cfg.horizon_hours,
        );

        let result = StepResult {
            current_index: position,
            entry_timestamp: entry_candle.timestamp,
            entry_price,
            evaluation: EvaluationReport {
                profitable: evaluation.profitable,
                outcome: evaluation.outcome,
                pnl_percent: round2(evaluation.pnl_percent),
                evaluation_period_hours: self.cfg.horizon_hours.min(future_path.len()),
            },
            signal_data: decision,
            next_index: position + 1,
        };

        info!(
            position,
            action = %result.signal_data.action,
            outcome = %result.evaluation.outcome,
            pnl = result.evaluation.pnl_percent,
            "Step evaluated"
        );

        *cursor = position + 1;
        Ok(result)
    }

    /// Unconditionally rewind the cursor to the start of the series.
    pub async fn reset(&self) {
        let mut cursor = self.cursor.lock().await;
        *cursor = 0;
        info!("Cursor reset to 0");
    }

    /// Report cursor position and series bounds without mutating state.
    pub async fn status(&self) -> WalkerStatus {
        let position = *self.cursor.lock().await;
        let total = self.series.len();
        WalkerStatus {
            current_index: position,
            total_candles: total,
            remaining_candles: total.saturating_sub(position),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
