//! Safety verdict parsing.
//!
//! The guard model's two-line reply format is a contract it frequently bends,
//! so parsing mirrors the normalizer philosophy: layered fallbacks, and when
//! nothing can be recognized the verdict resolves to "safe". False negatives
//! are preferred over blocking the user on classifier noise; the verdict is
//! advisory and never drives control flow.

use super::taxonomy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static CATEGORY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"S\d+").expect("valid regex"));

static STRICT_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^S\d+$").expect("valid regex"));

/// The advisory outcome of one classification call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyVerdict {
    pub is_safe: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub violated_categories: Option<Vec<String>>,
    pub raw_response: String,
    pub classification: String,
}

impl SafetyVerdict {
    /// Verdict used when the classifier could not be reached at all
    pub fn unavailable() -> Self {
        Self {
            is_safe: true,
            violated_categories: None,
            raw_response: "Safety check unavailable".to_string(),
            classification: "N/A".to_string(),
        }
    }

    fn safe(raw: &str) -> Self {
        Self {
            is_safe: true,
            violated_categories: None,
            raw_response: raw.to_string(),
            classification: "safe".to_string(),
        }
    }

    fn unrecognized(raw: &str) -> Self {
        Self {
            is_safe: true,
            violated_categories: None,
            raw_response: raw.to_string(),
            classification: "safe (unrecognized response)".to_string(),
        }
    }

    /// The violated category codes, empty when none were recognized
    pub fn categories(&self) -> &[String] {
        self.violated_categories.as_deref().unwrap_or_default()
    }
}

/// Parse a raw guard reply into a verdict. Never fails.
///
/// The first non-empty line decides safe/unsafe; an ambiguous first line
/// falls back to scanning the whole reply, with `unsafe` taking precedence
/// over `safe` when both appear. Category codes are taken from the second
/// line when they match the taxonomy, then from a whole-text scan.
pub fn parse_guard_reply(raw: &str) -> SafetyVerdict {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return SafetyVerdict::safe("");
    }

    let lines: Vec<&str> = trimmed.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    let first_line = lines.first().map(|l| l.to_lowercase()).unwrap_or_default();

    let is_safe = match first_line.as_str() {
        "safe" => true,
        "unsafe" => false,
        _ => {
            let full_text = trimmed.to_lowercase();
            if full_text.contains("unsafe") {
                false
            } else if full_text.contains("safe") {
                true
            } else {
                return SafetyVerdict::unrecognized(trimmed);
            }
        }
    };

    if is_safe {
        return SafetyVerdict::safe(trimmed);
    }

    let mut categories = line_two_categories(&lines);
    if categories.is_empty() {
        categories = scan_categories(trimmed);
    }

    let classification = if categories.is_empty() {
        "unsafe (unknown category)".to_string()
    } else {
        categories
            .iter()
            .map(|c| taxonomy::description_for(c).unwrap_or(c.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    };

    SafetyVerdict {
        is_safe: false,
        violated_categories: if categories.is_empty() { None } else { Some(categories) },
        raw_response: trimmed.to_string(),
        classification,
    }
}

/// Codes from the second line, comma-split, kept only when they are both
/// well-formed and in the taxonomy
fn line_two_categories(lines: &[&str]) -> Vec<String> {
    let Some(line) = lines.get(1) else {
        return Vec::new();
    };

    dedup(
        line.split(',')
            .map(str::trim)
            .filter(|c| STRICT_CODE_RE.is_match(c) && taxonomy::is_known(c))
            .map(str::to_string),
    )
}

/// Fallback: any taxonomy code anywhere in the reply
fn scan_categories(text: &str) -> Vec<String> {
    dedup(
        CATEGORY_RE
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .filter(|c| taxonomy::is_known(c)),
    )
}

fn dedup(codes: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = Vec::new();
    for code in codes {
        if !seen.contains(&code) {
            seen.push(code);
        }
    }
    seen
}
