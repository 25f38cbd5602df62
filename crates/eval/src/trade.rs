use common::{SignalAction, TradeEvaluation, TradeOutcome};

// Fallback stop/target when the decision carries none. Never override an
// explicit value.
const DEFAULT_BUY_STOP: f64 = 0.98;
const DEFAULT_BUY_TARGET: f64 = 1.03;
const DEFAULT_SELL_STOP: f64 = 1.02;
const DEFAULT_SELL_TARGET: f64 = 0.97;

/// First-touch simulation of a trade over the future close-price path.
///
/// Scans `future_path` chronologically up to `horizon` entries. At each
/// price the stop is checked before the target, so on a candle where both
/// could trigger the stop wins. The first touch terminates the scan. If
/// nothing is touched the trade exits at the last available price of the
/// truncated path.
///
/// `profitable` is `pnl > 0` in every non-HOLD branch; a STOP_LOSS can
/// report `profitable = true` when an explicit stop sits on the winning
/// side of the entry.
pub fn simulate(
    action: SignalAction,
    entry_price: f64,
    stop_price: Option<f64>,
    target_price: Option<f64>,
    future_path: &[f64],
    horizon: usize,
) -> TradeEvaluation {
    let scan = &future_path[..horizon.min(future_path.len())];
    if action == SignalAction::Hold || scan.is_empty() {
        return TradeEvaluation::hold();
    }

    let (stop, target) = match action {
        SignalAction::Buy => (
            stop_price.unwrap_or(entry_price * DEFAULT_BUY_STOP),
            target_price.unwrap_or(entry_price * DEFAULT_BUY_TARGET),
        ),
        SignalAction::Sell => (
            stop_price.unwrap_or(entry_price * DEFAULT_SELL_STOP),
            target_price.unwrap_or(entry_price * DEFAULT_SELL_TARGET),
        ),
        SignalAction::Hold => unreachable!("handled above"),
    };

    for &price in scan {
        match action {
            SignalAction::Buy => {
                if price <= stop {
                    return evaluation(TradeOutcome::StopLoss, pnl_buy(entry_price, stop));
                }
                if price >= target {
                    return evaluation(TradeOutcome::TakeProfit, pnl_buy(entry_price, target));
                }
            }
            SignalAction::Sell => {
                if price >= stop {
                    return evaluation(TradeOutcome::StopLoss, pnl_sell(entry_price, stop));
                }
                if price <= target {
                    return evaluation(TradeOutcome::TakeProfit, pnl_sell(entry_price, target));
                }
            }
            SignalAction::Hold => unreachable!("handled above"),
        }
    }

    // Neither touched within the horizon: exit at the last available price.
    let final_price = scan[scan.len() - 1];
    let pnl = match action {
        SignalAction::Buy => pnl_buy(entry_price, final_price),
        SignalAction::Sell => pnl_sell(entry_price, final_price),
        SignalAction::Hold => unreachable!("handled above"),
    };
    evaluation(TradeOutcome::ExitAtEnd, pnl)
}

fn evaluation(outcome: TradeOutcome, pnl_percent: f64) -> TradeEvaluation {
    TradeEvaluation {
        profitable: pnl_percent > 0.0,
        outcome,
        pnl_percent,
    }
}

fn pnl_buy(entry: f64, exit: f64) -> f64 {
    (exit - entry) / entry * 100.0
}

fn pnl_sell(entry: f64, exit: f64) -> f64 {
    (entry - exit) / entry * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hold_ignores_prices_entirely() {
        let eval = simulate(SignalAction::Hold, 100.0, Some(1.0), Some(1e9), &[0.0, 1e9], 24);
        assert!(!eval.profitable);
        assert_eq!(eval.outcome, TradeOutcome::Hold);
        assert_eq!(eval.pnl_percent, 0.0);
    }

    #[test]
    fn empty_future_path_resolves_to_hold() {
        let eval = simulate(SignalAction::Buy, 100.0, Some(98.0), Some(103.0), &[], 24);
        assert_eq!(eval.outcome, TradeOutcome::Hold);
    }

    #[test]
    fn buy_take_profit_before_stop() {
        // 99 does not breach the 98 stop; 104 touches the 103 target first.
        let eval = simulate(
            SignalAction::Buy,
            100.0,
            Some(98.0),
            Some(103.0),
            &[99.0, 101.0, 104.0],
            24,
        );
        assert_eq!(eval.outcome, TradeOutcome::TakeProfit);
        assert!((eval.pnl_percent - 3.0).abs() < 1e-9);
        assert!(eval.profitable);
    }

    #[test]
    fn buy_stop_hit_first_chronologically() {
        let eval = simulate(
            SignalAction::Buy,
            100.0,
            Some(98.0),
            Some(103.0),
            &[97.0, 104.0],
            24,
        );
        assert_eq!(eval.outcome, TradeOutcome::StopLoss);
        assert!((eval.pnl_percent - -2.0).abs() < 1e-9);
        assert!(!eval.profitable);
    }

    #[test]
    fn stop_checked_before_target_on_same_candle() {
        // A single price that satisfies both conditions must resolve as stop.
        let eval = simulate(SignalAction::Buy, 100.0, Some(102.0), Some(101.0), &[103.0], 24);
        assert_eq!(eval.outcome, TradeOutcome::StopLoss);
    }

    #[test]
    fn sell_defaults_resolve_and_flat_path_exits_at_end() {
        // Defaults: stop = 102, target = 97; a flat path touches neither.
        let path = vec![100.0; 24];
        let eval = simulate(SignalAction::Sell, 100.0, None, None, &path, 24);
        assert_eq!(eval.outcome, TradeOutcome::ExitAtEnd);
        assert_eq!(eval.pnl_percent, 0.0);
        assert!(!eval.profitable);
    }

    #[test]
    fn explicit_values_never_overridden_by_defaults() {
        // Explicit stop of 99.5 triggers where the 98 default would not.
        let eval = simulate(
            SignalAction::Buy,
            100.0,
            Some(99.5),
            None,
            &[99.0, 110.0],
            24,
        );
        assert_eq!(eval.outcome, TradeOutcome::StopLoss);
    }

    #[test]
    fn sell_stop_above_entry_loses() {
        let eval = simulate(SignalAction::Sell, 100.0, Some(102.0), Some(97.0), &[103.0], 24);
        assert_eq!(eval.outcome, TradeOutcome::StopLoss);
        assert!((eval.pnl_percent - -2.0).abs() < 1e-9);
    }

    #[test]
    fn sell_stop_below_entry_reports_profitable_stop() {
        // Asymmetric configuration: the stop sits on the winning side of the
        // entry, so a STOP_LOSS outcome carries positive pnl by the formula.
        let eval = simulate(SignalAction::Sell, 100.0, Some(99.0), Some(90.0), &[99.5], 24);
        assert_eq!(eval.outcome, TradeOutcome::StopLoss);
        assert!(eval.profitable);
        assert!((eval.pnl_percent - 1.0).abs() < 1e-9);
    }

    #[test]
    fn horizon_caps_the_scan() {
        // Target only touched beyond the horizon; exit at hour 2's price.
        let eval = simulate(
            SignalAction::Buy,
            100.0,
            Some(90.0),
            Some(103.0),
            &[100.5, 101.0, 104.0],
            2,
        );
        assert_eq!(eval.outcome, TradeOutcome::ExitAtEnd);
        assert!((eval.pnl_percent - 1.0).abs() < 1e-9);
    }

    #[test]
    fn exit_at_end_uses_last_available_price_of_short_path() {
        // Path shorter than the horizon: final price is the truncated tail.
        let eval = simulate(SignalAction::Buy, 100.0, Some(90.0), Some(110.0), &[102.0], 24);
        assert_eq!(eval.outcome, TradeOutcome::ExitAtEnd);
        assert!((eval.pnl_percent - 2.0).abs() < 1e-9);
    }
}
