/// All configuration loaded from environment variables at startup.
///
/// Everything has a usable default so the service comes up without a `.env`;
/// without `SIGNAL_API_KEY` the adapter routes straight to the local
/// heuristic and never attempts a remote call.
#[derive(Debug, Clone)]
pub struct Config {
    /// Trading pair whose hourly candles are walked, e.g. "BTCUSDT".
    pub pair: String,
    /// How far back the historical fetch reaches.
    pub history_days: u32,

    // Remote signal source
    pub signal_api_key: Option<String>,
    pub signal_api_url: String,
    pub signal_model: String,

    // HTTP server
    pub server_port: u16,

    /// Walker policy file (trailing window, horizon, entry policy).
    pub walker_config_path: String,
}

impl Config {
    /// Load all configuration from environment variables.
    /// Loads `.env` if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // ignore error if .env not present

        Config {
            pair: optional_env("PAIR").unwrap_or_else(|| "BTCUSDT".to_string()),
            history_days: optional_env("HISTORY_DAYS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(365),
            signal_api_key: optional_env("SIGNAL_API_KEY").filter(|v| !v.is_empty()),
            signal_api_url: optional_env("SIGNAL_API_URL")
                .unwrap_or_else(|| "https://api.deepseek.com/v1/chat/completions".to_string()),
            signal_model: optional_env("SIGNAL_MODEL")
                .unwrap_or_else(|| "deepseek-chat".to_string()),
            server_port: optional_env("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
            walker_config_path: optional_env("WALKER_CONFIG_PATH")
                .unwrap_or_else(|| "config/walker.toml".to_string()),
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
