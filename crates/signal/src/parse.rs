use serde::Deserialize;
use serde_json::Value;

use common::{Error, Result, SignalAction, SignalDecision};

/// Pull a decision out of free-text model output.
///
/// The grammar expectation is a single JSON object, optionally wrapped in a
/// fenced code block. Anything else fails closed so the adapter can fall
/// back. Untrusted fields are not partially trusted: confidence is clamped
/// to 0..=100 and non-numeric stop/target values reject the whole payload.
pub fn extract_decision(content: &str) -> Result<SignalDecision> {
    let payload = fenced_block(content)
        .and_then(first_object)
        .or_else(|| first_object(content))
        .ok_or_else(|| Error::Signal("no JSON object in response body".to_string()))?;

    let raw: RawDecision = serde_json::from_str(payload)
        .map_err(|e| Error::Signal(format!("malformed decision JSON: {e}")))?;
    raw.validate()
}

#[derive(Deserialize)]
struct RawDecision {
    signal: String,
    #[serde(default)]
    stop_price: Option<Value>,
    #[serde(default)]
    target_price: Option<Value>,
    confidence: Value,
    #[serde(default)]
    reason: Option<String>,
}

impl RawDecision {
    fn validate(self) -> Result<SignalDecision> {
        let action = match self.signal.trim().to_ascii_uppercase().as_str() {
            "BUY" => SignalAction::Buy,
            "SELL" => SignalAction::Sell,
            "HOLD" => SignalAction::Hold,
            other => return Err(Error::Signal(format!("unknown signal '{other}'"))),
        };

        let confidence = self
            .confidence
            .as_f64()
            .ok_or_else(|| Error::Signal("confidence is not numeric".to_string()))?
            .clamp(0.0, 100.0) as u8;

        Ok(SignalDecision {
            action,
            stop_price: numeric_or_null(self.stop_price, "stop_price")?,
            target_price: numeric_or_null(self.target_price, "target_price")?,
            confidence,
            reason: self.reason.unwrap_or_default(),
        })
    }
}

fn numeric_or_null(value: Option<Value>, field: &str) -> Result<Option<f64>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => {
            let n = v
                .as_f64()
                .filter(|n| n.is_finite())
                .ok_or_else(|| Error::Signal(format!("{field} is not numeric")))?;
            Ok(Some(n))
        }
    }
}

/// Contents of the first fenced code block, with any language tag skipped.
fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```")? + 3;
    let rest = &text[start..];
    let body_start = rest.find('\n')? + 1;
    let body = &rest[body_start..];
    let end = body.find("```")?;
    Some(body[..end].trim())
}

/// The first top-level `{...}` span, tracking strings and escapes.
fn first_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, byte) in text.bytes().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=i]);
                }
            }
            _ => {}
        }
    }
    None
}
