//! Vote and verdict extraction for council replies.
//!
//! Council parsing follows the normalizer philosophy, not the supervisor's:
//! every failure has a defined fallback, since no single agent reply may halt
//! a session that runs for over a minute. Callers decide between the parse
//! fallback and the call-failure fallback; the reasoning strings differ so
//! the transcript shows which path was taken.

use super::entities::{AgentVote, CouncilAgent, FinalVerdict};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:json)?\n?").expect("valid regex"));

/// Reasoning recorded when a vote reply could not be parsed
pub const UNPARSEABLE_VOTE_REASONING: &str = "Following the established consensus.";

/// Reasoning recorded when the vote call itself failed
pub const FAILED_VOTE_REASONING: &str = "Following mathematical tradition.";

/// Reasoning substituted when a parsed vote carried none
pub const DEFAULT_VOTE_REASONING: &str = "Based on my analysis.";

const FALLBACK_CHAIRPERSON: &str = "Grand Chancellor of Mathematical Truth";

/// Extract a `{vote, reasoning}` pair from an agent reply.
///
/// Returns `None` when no vote field can be found; the caller substitutes
/// the session's initial result.
pub fn parse_vote(raw: &str) -> Option<(String, String)> {
    let object = first_json_object(raw)?;

    let vote = object
        .get("vote")
        .map(value_string)
        .filter(|v| !v.trim().is_empty())?;

    let reasoning = object
        .get("reasoning")
        .map(value_string)
        .filter(|r| !r.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_VOTE_REASONING.to_string());

    Some((vote, reasoning))
}

/// The vote recorded for an agent whose reply was unusable
pub fn fallback_vote(agent: &CouncilAgent, initial_result: &str, reasoning: &str) -> AgentVote {
    AgentVote {
        agent_id: agent.id.clone(),
        agent_name: agent.name.clone(),
        vote: initial_result.to_string(),
        reasoning: reasoning.to_string(),
    }
}

/// Parse the chairperson reply into a verdict.
///
/// Only the official answer is mandatory; every other field has a canned
/// substitute so a partially-formed verdict still reads as one.
pub fn parse_verdict(raw: &str) -> Option<FinalVerdict> {
    let object = first_json_object(raw)?;

    let official_answer = object
        .get("officialAnswer")
        .map(value_string)
        .filter(|a| !a.trim().is_empty())?;

    Some(FinalVerdict {
        chairperson: object
            .get("chairperson")
            .map(value_string)
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_CHAIRPERSON.to_string()),
        announcement: object
            .get("announcement")
            .map(value_string)
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| {
                "The Mathematical Council has reached its decision.".to_string()
            }),
        official_answer,
        confidence: object.get("confidence").and_then(confidence_value).unwrap_or(99),
        closing_statement: object
            .get("closingStatement")
            .map(value_string)
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| "This decision is FINAL. The Council has spoken.".to_string()),
    })
}

/// The canned verdict used when the chairperson call fails or returns
/// nothing usable. The first collected vote stands as the official answer,
/// falling back to the session's initial result.
pub fn fallback_verdict(first_vote: Option<&AgentVote>, initial_result: &str) -> FinalVerdict {
    FinalVerdict {
        chairperson: FALLBACK_CHAIRPERSON.to_string(),
        announcement: "After extensive deliberation, the Mathematical Council has reached its verdict."
            .to_string(),
        official_answer: first_vote
            .map(|v| v.vote.clone())
            .unwrap_or_else(|| initial_result.to_string()),
        confidence: 99,
        closing_statement: "This decision is FINAL and BINDING for all eternity. The Council has spoken."
            .to_string(),
    }
}

/// Direct parse, then fence-stripped, then the first `{...}` substring
fn first_json_object(raw: &str) -> Option<Map<String, Value>> {
    let trimmed = raw.trim();

    if let Some(object) = as_object(trimmed) {
        return Some(object);
    }

    if trimmed.contains("```") {
        let stripped = FENCE_RE.replace_all(trimmed, "");
        if let Some(object) = as_object(stripped.trim()) {
            return Some(object);
        }
    }

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end <= start {
        return None;
    }
    as_object(&trimmed[start..=end])
}

fn as_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text).ok()? {
        Value::Object(object) => Some(object),
        _ => None,
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
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent() -> CouncilAgent {
        CouncilAgent {
            id: "agent_0_2".to_string(),
            name: "Oracle of Numbers".to_string(),
            archetype: "Mystic".to_string(),
            persona: "You are The Mystic.",
            temperature: 0.85,
        }
    }

    #[test]
    fn test_vote_from_clean_json() {
        let (vote, reasoning) =
            parse_vote(r#"{"vote": "42", "reasoning": "The sevens demanded it."}"#).unwrap();
        assert_eq!(vote, "42");
        assert_eq!(reasoning, "The sevens demanded it.");
    }

    #[test]
    fn test_vote_from_fenced_json() {
        let raw = "```json\n{\"vote\": 17, \"reasoning\": \"obvious\"}\n```";
        let (vote, _) = parse_vote(raw).unwrap();
        assert_eq!(vote, "17");
    }

    #[test]
    fn test_vote_embedded_in_prose() {
        let raw = r#"As the Skeptic I must say: {"vote": "9", "reasoning": "doubtful but sure"} so there."#;
        let (vote, reasoning) = parse_vote(raw).unwrap();
        assert_eq!(vote, "9");
        assert_eq!(reasoning, "doubtful but sure");
    }

    #[test]
    fn test_vote_without_reasoning_gets_default() {
        let (_, reasoning) = parse_vote(r#"{"vote": "3"}"#).unwrap();
        assert_eq!(reasoning, DEFAULT_VOTE_REASONING);
    }

    #[test]
    fn test_free_text_vote_is_rejected() {
        assert!(parse_vote("I vote for chaos.").is_none());
        assert!(parse_vote(r#"{"reasoning": "no vote key"}"#).is_none());
    }

    #[test]
    fn test_fallback_vote_carries_agent_identity() {
        let vote = fallback_vote(&agent(), "5", FAILED_VOTE_REASONING);
        assert_eq!(vote.agent_name, "Oracle of Numbers");
        assert_eq!(vote.vote, "5");
        assert_eq!(vote.reasoning, "Following mathematical tradition.");
    }

    #[test]
    fn test_verdict_from_full_json() {
        let raw = r#"{
            "chairperson": "Supreme Chairperson Verity Cross",
            "announcement": "The Council has spoken at last.",
            "officialAnswer": "12",
            "confidence": 99,
            "closingStatement": "This decision is FINAL and BINDING."
        }"#;
        let verdict = parse_verdict(raw).unwrap();
        assert_eq!(verdict.chairperson, "Supreme Chairperson Verity Cross");
        assert_eq!(verdict.official_answer, "12");
        assert_eq!(verdict.confidence, 99);
    }

    #[test]
    fn test_partial_verdict_fills_missing_fields() {
        let verdict = parse_verdict(r#"{"officialAnswer": "7"}"#).unwrap();
        assert_eq!(verdict.official_answer, "7");
        assert_eq!(verdict.chairperson, FALLBACK_CHAIRPERSON);
        assert!(!verdict.announcement.is_empty());
        assert!(!verdict.closing_statement.is_empty());
    }

    #[test]
    fn test_verdict_without_answer_is_rejected() {
        assert!(parse_verdict(r#"{"announcement": "we have decided nothing"}"#).is_none());
        assert!(parse_verdict("The answer is final.").is_none());
    }

    #[test]
    fn test_fallback_verdict_prefers_first_vote() {
        let first = AgentVote {
            agent_id: "agent_0_0".to_string(),
            agent_name: "Dr. Dubious".to_string(),
            vote: "41".to_string(),
            reasoning: "doubt".to_string(),
        };
        assert_eq!(fallback_verdict(Some(&first), "5").official_answer, "41");
        assert_eq!(fallback_verdict(None, "5").official_answer, "5");
    }
}
