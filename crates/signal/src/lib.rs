pub mod heuristic;
pub mod parse;
pub mod remote;

pub use heuristic::HeuristicSignalSource;
pub use remote::RemoteSignalSource;

use async_trait::async_trait;

use common::{Candle, SignalDecision};

/// Polymorphic boundary producing a decision from a trailing window.
///
/// `decide` is infallible by contract: the controller must always receive a
/// well-formed decision, so every variant absorbs its own failures. The
/// remote variant keeps the failure visible in logs before falling through
/// to the heuristic.
#[async_trait]
pub trait SignalSource: Send + Sync {
    /// Human-readable name of this source, for logging.
    fn name(&self) -> &str;

    /// Produce a decision for the trailing window.
    async fn decide(&self, window: &[Candle]) -> SignalDecision;
}
