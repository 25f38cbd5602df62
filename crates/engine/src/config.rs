use serde::{Deserialize, Serialize};
use tracing::info;

/// Which price of the trailing window's last candle a trade enters at.
///
/// `last_close` enters at the close the signal was produced on; `last_open`
/// enters one tick earlier relative to the signal. The default is
/// `last_close`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EntryPolicy {
    #[default]
    LastClose,
    LastOpen,
}

/// Walker policy knobs.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WalkerConfig {
    /// Trailing window size fed to the signal source.
    #[serde(default = "default_trailing")]
    pub trailing_size: usize,
    /// Lookahead horizon the trade is simulated over.
    #[serde(default = "default_horizon")]
    pub horizon_hours: usize,
    #[serde(default)]
    pub entry_policy: EntryPolicy,
}

fn default_trailing() -> usize {
    50
}

fn default_horizon() -> usize {
    24
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            trailing_size: default_trailing(),
            horizon_hours: default_horizon(),
            entry_policy: EntryPolicy::default(),
        }
    }
}

/// Top-level walker config file (TOML).
///
/// Example `config/walker.toml`:
/// ```toml
/// [walker]
/// trailing_size = 50
/// horizon_hours = 24
/// entry_policy = "last_close"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WalkerFileConfig {
    pub walker: WalkerConfig,
}

impl WalkerFileConfig {
    /// Load from a TOML file. Falls back to defaults when the file is
    /// absent; exits the process on a parse error.
    pub fn load(path: &str) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => {
                info!(path, "No walker config file — using defaults");
                return Self {
                    walker: WalkerConfig::default(),
                };
            }
        };
        toml::from_str(&content)
            .unwrap_or_else(|e| panic!("Failed to parse walker config at '{path}': {e}"))
    }
}
