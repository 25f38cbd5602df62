use common::{SignalAction, TradeOutcome};
use proptest::prelude::*;

fn action_strategy() -> impl Strategy<Value = SignalAction> {
    prop_oneof![
        Just(SignalAction::Buy),
        Just(SignalAction::Sell),
        Just(SignalAction::Hold),
    ]
}

proptest! {
    /// The simulator must never panic and must return a finite pnl for any
    /// positive entry price and arbitrary finite price path.
    #[test]
    fn simulate_never_panics_and_pnl_is_finite(
        action in action_strategy(),
        entry in 0.0001f64..1_000_000.0f64,
        stop in proptest::option::of(0.0001f64..1_000_000.0f64),
        target in proptest::option::of(0.0001f64..1_000_000.0f64),
        path in proptest::collection::vec(0.0001f64..1_000_000.0f64, 0..64),
        horizon in 0usize..48,
    ) {
        let result = eval::simulate(action, entry, stop, target, &path, horizon);
        prop_assert!(result.pnl_percent.is_finite());
        prop_assert_eq!(result.profitable, result.pnl_percent > 0.0);
    }

    /// HOLD is invariant under every input combination.
    #[test]
    fn hold_is_always_flat(
        entry in 0.0001f64..1_000_000.0f64,
        path in proptest::collection::vec(0.0001f64..1_000_000.0f64, 0..64),
    ) {
        let result = eval::simulate(SignalAction::Hold, entry, None, None, &path, 24);
        prop_assert_eq!(result.outcome, TradeOutcome::Hold);
        prop_assert_eq!(result.pnl_percent, 0.0);
        prop_assert!(!result.profitable);
    }

    /// A BUY with no explicit levels over a path strictly inside the default
    /// band must exit at the end, with pnl determined by the last price.
    #[test]
    fn buy_inside_default_band_exits_at_end(
        entry in 1.0f64..100_000.0f64,
        steps in proptest::collection::vec(-0.015f64..0.025f64, 1..24),
    ) {
        // Default band for BUY is [0.98 * entry, 1.03 * entry).
        let path: Vec<f64> = steps
            .iter()
            .map(|frac| entry * (1.0 + frac))
            .collect();
        let result = eval::simulate(SignalAction::Buy, entry, None, None, &path, 24);
        prop_assert_eq!(result.outcome, TradeOutcome::ExitAtEnd);
    }
}
