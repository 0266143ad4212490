//! Verdict extraction from supervisor replies.
//!
//! A supervisor verdict without a final answer has no safe default, so this
//! is the one parsing path allowed to fail outward. JSON is tried first,
//! then labeled-section scraping of the free text; only when neither yields
//! a usable final answer does the caller see [`DomainError::MalformedReply`].

use crate::core::error::DomainError;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static AGENT_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:I am|This is|name is)\s+([^,.\n]+)").expect("valid regex")
});

static CONFIDENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)confidence[^0-9]*(\d+)").expect("valid regex"));

static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:json)?\n?").expect("valid regex"));

/// Fields recovered from a supervisor reply
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedVerdict {
    pub agent_name: Option<String>,
    pub explanation: String,
    pub final_answer: String,
    pub recommendation: String,
    pub confidence: Option<u8>,
    pub closing_statement: Option<String>,
}

/// Parse a supervisor reply into a verdict.
///
/// Fails only when no final answer can be extracted by either strategy.
pub fn parse_supervisor_reply(raw: &str) -> Result<ParsedVerdict, DomainError> {
    let cleaned = FENCE_RE.replace_all(raw.trim(), "");
    let cleaned = cleaned.trim();

    if let Some(verdict) = parse_json_verdict(cleaned) {
        return Ok(verdict);
    }

    scrape_verdict(cleaned).ok_or_else(|| {
        DomainError::MalformedReply("supervisor reply carried no final answer".to_string())
    })
}

fn parse_json_verdict(text: &str) -> Option<ParsedVerdict> {
    let value: Value = serde_json::from_str(text).ok()?;
    let object = value.as_object()?;

    let final_answer = non_empty(value_string(object.get("finalAnswer")?))?;

    Some(ParsedVerdict {
        agent_name: object
            .get("agentName")
            .and_then(Value::as_str)
            .map(str::to_string),
        explanation: value_string(object.get("explanation").unwrap_or(&Value::Null)),
        final_answer,
        // The level-3 persona occasionally relabels its recommendation
        recommendation: object
            .get("recommendation")
            .or_else(|| object.get("executiveDirective"))
            .map(value_string)
            .unwrap_or_default(),
        confidence: object.get("confidence").and_then(confidence_value),
        closing_statement: object
            .get("closingStatement")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

/// Hunt for "Final Answer:" / "Recommendation:" / "Confidence:" markers in
/// free text when the model ignored the JSON instruction
fn scrape_verdict(text: &str) -> Option<ParsedVerdict> {
    let final_answer = labeled_section(
        text,
        "Final Answer:",
        &["Recommendation:", "Confidence:", "Closing Statement:"],
    )
    .map(strip_corporate_prefix)
    .and_then(non_empty)?;

    let explanation = labeled_section(text, "Analysis:", &["Final Answer:"])
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| text.to_string());

    let recommendation = labeled_section(
        text,
        "Recommendation:",
        &["Confidence:", "Closing Statement:"],
    )
    .unwrap_or_default();

    let confidence = CONFIDENCE_RE
        .captures(text)
        .and_then(|c| c[1].parse::<u8>().ok())
        .map(|n| n.min(100))
        .or(Some(95));

    let closing_statement = Some(
        labeled_section(text, "Closing Statement:", &[])
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "This decision is FINAL.".to_string()),
    );

    Some(ParsedVerdict {
        agent_name: AGENT_NAME_RE
            .captures(text)
            .map(|c| c[1].trim().to_string()),
        explanation,
        final_answer,
        recommendation,
        confidence,
        closing_statement,
    })
}

/// Text between `label` and the nearest following terminator (or end)
fn labeled_section(text: &str, label: &str, terminators: &[&str]) -> Option<String> {
    let start = text.find(label)? + label.len();
    let rest = &text[start..];
    let end = terminators
        .iter()
        .filter_map(|t| rest.find(t))
        .min()
        .unwrap_or(rest.len());
    Some(rest[..end].trim().to_string())
}

fn strip_corporate_prefix(answer: String) -> String {
    let lowered = answer.to_lowercase();
    let prefix = "our strategic numerical outcome is";
    if let Some(pos) = lowered.find(prefix) {
        answer[pos + prefix.len()..]
            .trim()
            .split(',')
            .next()
            .unwrap_or("")
            .trim()
            .to_string()
    } else {
        answer
    }
}

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("unknown") {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn confidence_value(value: &Value) -> Option<u8> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok()?,
        _ => return None,
    };
    Some(n.clamp(0.0, 100.0) as u8)
}

fn value_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
