use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One hourly OHLCV bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    /// Checks `low <= min(open, close) <= max(open, close) <= high` and
    /// `volume >= 0`.
    pub fn is_well_formed(&self) -> bool {
        let body_low = self.open.min(self.close);
        let body_high = self.open.max(self.close);
        self.low <= body_low && body_high <= self.high && self.volume >= 0.0
    }
}

/// An ordered hourly candle series, validated at construction.
///
/// Timestamps must be strictly increasing and every candle must satisfy the
/// OHLC ordering invariant. Read-only after construction; the walker shares
/// it behind an `Arc` and never mutates it.
#[derive(Debug, Clone)]
pub struct CandleSeries {
    candles: Vec<Candle>,
}

impl CandleSeries {
    pub fn new(candles: Vec<Candle>) -> Result<Self> {
        for (i, candle) in candles.iter().enumerate() {
            if !candle.is_well_formed() {
                return Err(Error::Series(format!(
                    "candle {i} violates OHLC ordering or has negative volume"
                )));
            }
            if i > 0 && candles[i - 1].timestamp >= candle.timestamp {
                return Err(Error::Series(format!(
                    "timestamps not strictly increasing at index {i}"
                )));
            }
        }
        Ok(Self { candles })
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }
}

/// Direction of a trade recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalAction {
    Buy,
    Sell,
    Hold,
}

impl std::fmt::Display for SignalAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalAction::Buy => write!(f, "BUY"),
            SignalAction::Sell => write!(f, "SELL"),
            SignalAction::Hold => write!(f, "HOLD"),
        }
    }
}

/// A trade recommendation produced once per step, immutable once produced.
///
/// Serialized under the wire names the caller expects: the action field is
/// named `signal` in JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalDecision {
    #[serde(rename = "signal")]
    pub action: SignalAction,
    pub stop_price: Option<f64>,
    pub target_price: Option<f64>,
    /// Clamped to 0..=100 at every producer.
    pub confidence: u8,
    pub reason: String,
}

impl SignalDecision {
    /// Neutral decision with no stop/target attached.
    pub fn hold(confidence: u8, reason: impl Into<String>) -> Self {
        Self {
            action: SignalAction::Hold,
            stop_price: None,
            target_price: None,
            confidence,
            reason: reason.into(),
        }
    }
}

/// How a simulated trade resolved against the future price path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeOutcome {
    StopLoss,
    TakeProfit,
    ExitAtEnd,
    Hold,
}

impl std::fmt::Display for TradeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeOutcome::StopLoss => write!(f, "STOP_LOSS"),
            TradeOutcome::TakeProfit => write!(f, "TAKE_PROFIT"),
            TradeOutcome::ExitAtEnd => write!(f, "EXIT_AT_END"),
            TradeOutcome::Hold => write!(f, "HOLD"),
        }
    }
}

/// Result of simulating one decision against the future path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeEvaluation {
    pub profitable: bool,
    pub outcome: TradeOutcome,
    pub pnl_percent: f64,
}

impl TradeEvaluation {
    pub fn hold() -> Self {
        Self {
            profitable: false,
            outcome: TradeOutcome::Hold,
            pnl_percent: 0.0,
        }
    }
}

/// Evaluation block of the caller-facing step envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub profitable: bool,
    pub outcome: TradeOutcome,
    /// Rounded to 2 decimals.
    pub pnl_percent: f64,
    /// How many future hours were actually available for the scan.
    pub evaluation_period_hours: usize,
}

/// Envelope returned for every walk-forward step. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    pub current_index: usize,
    pub entry_timestamp: DateTime<Utc>,
    pub entry_price: f64,
    pub signal_data: SignalDecision,
    pub evaluation: EvaluationReport,
    pub next_index: usize,
}

/// Snapshot of the walker's cursor, reported without mutating state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WalkerStatus {
    pub current_index: usize,
    pub total_candles: usize,
    pub remaining_candles: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn candle(hour: u32, open: f64, high: f64, low: f64, close: f64) -> Candle {
        Candle {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap(),
            open,
            high,
            low,
            close,
            volume: 10.0,
        }
    }

    #[test]
    fn series_accepts_ordered_candles() {
        let series = CandleSeries::new(vec![
            candle(0, 100.0, 105.0, 99.0, 104.0),
            candle(1, 104.0, 106.0, 103.0, 105.0),
        ])
        .unwrap();
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn series_rejects_unsorted_timestamps() {
        let result = CandleSeries::new(vec![
            candle(1, 100.0, 105.0, 99.0, 104.0),
            candle(0, 104.0, 106.0, 103.0, 105.0),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn series_rejects_high_below_body() {
        // high below the close violates OHLC ordering
        let result = CandleSeries::new(vec![candle(0, 100.0, 101.0, 99.0, 103.0)]);
        assert!(result.is_err());
    }

    #[test]
    fn series_rejects_negative_volume() {
        let mut bad = candle(0, 100.0, 105.0, 99.0, 104.0);
        bad.volume = -1.0;
        assert!(CandleSeries::new(vec![bad]).is_err());
    }

    #[test]
    fn decision_serializes_action_as_signal() {
        let decision = SignalDecision::hold(50, "flat");
        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["signal"], "HOLD");
        assert!(json["stop_price"].is_null());
    }

    #[test]
    fn outcome_serializes_screaming_snake() {
        let json = serde_json::to_value(TradeOutcome::ExitAtEnd).unwrap();
        assert_eq!(json, "EXIT_AT_END");
    }
}
