use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use common::{Candle, Error, Result, SignalDecision};

use crate::{parse, HeuristicSignalSource, SignalSource};

/// Candles serialized into the prompt are capped to this tail of the window
/// to respect the endpoint's payload limits.
const PROMPT_TAIL: usize = 10;
/// Bounds suspension on the remote call; the walker holds its cursor lock
/// while this is outstanding.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const SYSTEM_PROMPT: &str = "You are an expert cryptocurrency trading analyst. \
Analyze OHLC data and provide clear trading signals with proper risk management.";

/// Chat-completion backed signal source.
///
/// Serializes the tail of the trailing window into a prompt, posts it to the
/// configured endpoint and parses a decision out of the reply. Every failure
/// mode — missing credential, transport error, non-success status, malformed
/// reply — falls through to the local heuristic; the controller never sees
/// an error from this source.
pub struct RemoteSignalSource {
    http: Client,
    api_key: Option<String>,
    endpoint: String,
    model: String,
}

impl RemoteSignalSource {
    pub fn new(api_key: Option<String>, endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: Client::builder()
                .use_rustls_tls()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }

    async fn request_decision(&self, key: &str, window: &[Candle]) -> Result<SignalDecision> {
        let tail = &window[window.len().saturating_sub(PROMPT_TAIL)..];
        let ohlc = serde_json::to_string_pretty(tail)?;

        let prompt = format!(
            "Analyze the following hourly OHLC data and generate a trading signal.\n\
             Respond with a JSON object containing: signal (BUY|SELL|HOLD), stop_price, \
             target_price, confidence (0-100), and reason.\n\n\
             OHLC Data (most recent last):\n{ohlc}\n\n\
             Important: Consider technical analysis, price action, volume patterns, and \
             market structure. Provide realistic stop and target prices based on \
             support/resistance levels."
        );

        let payload = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt },
            ],
            "temperature": 0.1,
            "max_tokens": 500,
        });

        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| Error::Http(e.to_string()))?;
        if !status.is_success() {
            return Err(Error::Signal(format!("HTTP {status}: {body}")));
        }

        let chat: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| Error::Signal(format!("malformed completion body: {e}")))?;
        let content = chat
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| Error::Signal("completion has no choices".to_string()))?;

        parse::extract_decision(content)
    }
}

#[async_trait]
impl SignalSource for RemoteSignalSource {
    fn name(&self) -> &str {
        "remote"
    }

    async fn decide(&self, window: &[Candle]) -> SignalDecision {
        let Some(key) = self.api_key.as_deref() else {
            debug!("No signal API credential configured — using local heuristic");
            return HeuristicSignalSource::classify(window);
        };

        match self.request_decision(key, window).await {
            Ok(decision) => {
                debug!(action = %decision.action, confidence = decision.confidence,
                    "Remote signal received");
                decision
            }
            Err(e) => {
                warn!(error = %e, "Remote signal source failed — falling back to heuristic");
                HeuristicSignalSource::classify(window)
            }
        }
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}
