//! Response normalization for unreliable model output.
//!
//! The upstream model is instructed to emit a small JSON object but routinely
//! fails to, so every consumer treats "malformed, but textually present" as
//! the expected case. Normalization is an ordered list of parser strategies,
//! each a pure function `&str -> Option<NormalizedResponse>`, tried in
//! sequence until one succeeds. The last strategy cannot fail, so
//! [`normalize`] never errors.
//!
//! | Strategy | Handles |
//! |----------|---------|
//! | [`parse_direct_json`] | well-behaved JSON replies |
//! | [`parse_fenced_json`] | JSON wrapped in markdown code fences |
//! | [`parse_embedded_json`] | JSON buried in surrounding prose |
//! | [`extract_number`] | free text containing at least one number |
//! | [`split_lines`] | anything else |

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+\.?\d*").expect("valid regex"));

static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:json)?\n?").expect("valid regex"));

/// Default result when nothing usable could be extracted
pub const DEFAULT_RESULT: &str = "Unknown";

/// Default explanation when the reply carried none
pub const DEFAULT_EXPLANATION: &str = "Calculation completed";

/// Structured record recovered from a raw model reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedResponse {
    pub result: String,
    pub explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
}

impl NormalizedResponse {
    fn new(result: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            result: result.into(),
            explanation: explanation.into(),
            confidence: None,
            agent_name: None,
        }
    }
}

/// Recover a structured record from raw model text.
///
/// Never fails: the final strategy always produces a non-empty
/// result/explanation pair, falling back to literal defaults.
pub fn normalize(raw: &str) -> NormalizedResponse {
    parse_direct_json(raw)
        .or_else(|| parse_fenced_json(raw))
        .or_else(|| parse_embedded_json(raw))
        .or_else(|| extract_number(raw))
        .unwrap_or_else(|| split_lines(raw))
}

/// Strategy 1: the trimmed reply is itself a JSON object
pub fn parse_direct_json(raw: &str) -> Option<NormalizedResponse> {
    let value: Value = serde_json::from_str(raw.trim()).ok()?;
    from_json_object(&value)
}

/// Strategy 2: strip markdown code fences, then parse
pub fn parse_fenced_json(raw: &str) -> Option<NormalizedResponse> {
    if !raw.contains("```") {
        return None;
    }
    let stripped = FENCE_RE.replace_all(raw, "");
    let value: Value = serde_json::from_str(stripped.trim()).ok()?;
    from_json_object(&value)
}

/// Strategy 3: parse the first `{...}` substring inside surrounding prose
pub fn parse_embedded_json(raw: &str) -> Option<NormalizedResponse> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    let value: Value = serde_json::from_str(&raw[start..=end]).ok()?;
    from_json_object(&value)
}

/// Strategy 4: take the first decimal number as the result and the remaining
/// text as the explanation
pub fn extract_number(raw: &str) -> Option<NormalizedResponse> {
    let m = NUMBER_RE.find(raw)?;
    let result = m.as_str().to_string();

    let mut explanation = String::with_capacity(raw.len());
    explanation.push_str(&raw[..m.start()]);
    explanation.push_str(&raw[m.end()..]);
    let explanation = explanation.trim().to_string();

    Some(NormalizedResponse::new(
        result,
        if explanation.is_empty() {
            DEFAULT_EXPLANATION.to_string()
        } else {
            explanation
        },
    ))
}

/// Strategy 5 (infallible): last non-empty line is the result, the joined
/// remainder is the explanation
pub fn split_lines(raw: &str) -> NormalizedResponse {
    let lines: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    match lines.split_last() {
        Some((last, rest)) => {
            let explanation = rest.join(" ");
            NormalizedResponse::new(
                *last,
                if explanation.is_empty() {
                    DEFAULT_EXPLANATION.to_string()
                } else {
                    explanation
                },
            )
        }
        None => NormalizedResponse::new(DEFAULT_RESULT, DEFAULT_EXPLANATION),
    }
}

/// Map a parsed JSON object onto the normalized record.
///
/// Accepts the field aliases the model actually produces: `result` /
/// `answer` / `finalAnswer`, `explanation` / `steps`.
fn from_json_object(value: &Value) -> Option<NormalizedResponse> {
    let object = value.as_object()?;

    let result = ["result", "answer", "finalAnswer"]
        .iter()
        .find_map(|k| object.get(*k))
        .map(value_to_string)?;

    let explanation = ["explanation", "steps"]
        .iter()
        .find_map(|k| object.get(*k))
        .map(value_to_string)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_EXPLANATION.to_string());

    Some(NormalizedResponse {
        result,
        explanation,
        confidence: object
            .get("confidence")
            .and_then(parse_confidence),
        agent_name: ["agentName", "agent_name"]
            .iter()
            .find_map(|k| object.get(*k))
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

/// Confidence arrives as a number, a numeric string, or "97%"
fn parse_confidence(value: &Value) -> Option<u8> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok()?,
        _ => return None,
    };
    Some(n.clamp(0.0, 100.0) as u8)
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
