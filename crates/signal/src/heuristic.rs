use async_trait::async_trait;

use common::{Candle, SignalAction, SignalDecision};

use crate::SignalSource;

const DIRECTIONAL_CONFIDENCE: u8 = 65;
const NEUTRAL_CONFIDENCE: u8 = 50;

/// Two-candle momentum heuristic.
///
/// Looks only at the two most recent candles of the window. A bullish latest
/// candle closing above the prior close is a BUY; a bearish one closing below
/// the prior close is a SELL; anything else is a HOLD. Confidence is a fixed
/// constant per branch, not computed from data. Stop/target for directional
/// signals come from a half-range volatility proxy on the latest candle.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicSignalSource;

impl HeuristicSignalSource {
    pub fn classify(window: &[Candle]) -> SignalDecision {
        let [prior, latest] = match window {
            [.., prior, latest] => [prior, latest],
            _ => {
                return SignalDecision::hold(
                    NEUTRAL_CONFIDENCE,
                    "fewer than two candles in window",
                )
            }
        };

        let half_range = (latest.high - latest.low) / 2.0;

        if latest.close > latest.open && latest.close > prior.close {
            SignalDecision {
                action: SignalAction::Buy,
                stop_price: Some(latest.low - half_range),
                target_price: Some(latest.close + 2.0 * half_range),
                confidence: DIRECTIONAL_CONFIDENCE,
                reason: "Latest candle is bullish and closed above the prior close".to_string(),
            }
        } else if latest.close < latest.open && latest.close < prior.close {
            SignalDecision {
                action: SignalAction::Sell,
                stop_price: Some(latest.high + half_range),
                target_price: Some(latest.close - 2.0 * half_range),
                confidence: DIRECTIONAL_CONFIDENCE,
                reason: "Latest candle is bearish and closed below the prior close".to_string(),
            }
        } else {
            SignalDecision::hold(NEUTRAL_CONFIDENCE, "No directional momentum in last two candles")
        }
    }
}

#[async_trait]
impl SignalSource for HeuristicSignalSource {
    fn name(&self) -> &str {
        "heuristic"
    }

    async fn decide(&self, window: &[Candle]) -> SignalDecision {
        Self::classify(window)
    }
}
