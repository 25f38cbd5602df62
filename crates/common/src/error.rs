use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The window extractor cannot satisfy the trailing bound, or the entry
    /// price at the cursor is unusable. Fatal for the step, not the service.
    #[error("Insufficient data at position {position}: {reason}")]
    InsufficientData { position: usize, reason: String },

    /// The core was invoked before a candle series was loaded.
    #[error("Service not initialized: candle series not loaded yet")]
    NotInitialized,

    /// Remote signal source failure. Always absorbed by the adapter's
    /// heuristic fallback; never crosses the adapter boundary.
    #[error("Signal source error: {0}")]
    Signal(String),

    #[error("Feed error: {0}")]
    Feed(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Candle series error: {0}")]
    Series(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
