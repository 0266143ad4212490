//! Council deliberation entities.
//!
//! A council session is entirely ephemeral: everything here lives for the
//! duration of one streamed deliberation and is never persisted.

use crate::core::usage::TokenUsage;
use serde::{Deserialize, Serialize};

/// A seated council member for one session
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouncilAgent {
    pub id: String,
    pub name: String,
    pub archetype: String,
    #[serde(skip)]
    pub persona: &'static str,
    pub temperature: f32,
}

/// One in-character statement made during deliberation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentStatement {
    pub agent_id: String,
    pub agent_name: String,
    pub statement: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

/// Statements grouped by deliberation round, in speaking order
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliberationRound {
    pub round_number: u8,
    pub statements: Vec<AgentStatement>,
}

/// One agent's final position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentVote {
    pub agent_id: String,
    pub agent_name: String,
    pub vote: String,
    pub reasoning: String,
}

/// The chairperson's synthesized decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalVerdict {
    pub chairperson: String,
    pub announcement: String,
    pub official_answer: String,
    pub confidence: u8,
    pub closing_statement: String,
}

/// Bookkeeping reported with the terminal `complete` event
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouncilRunStats {
    pub total_duration: String,
    pub total_tokens: u32,
    pub total_cost: String,
    pub agents_used: usize,
    pub rounds_completed: u8,
}

impl CouncilRunStats {
    /// Nominal upstream price per token, used for the novelty cost readout
    const COST_PER_TOKEN: f64 = 0.000002;

    pub fn new(elapsed_secs: f64, usage: TokenUsage, agents_used: usize, rounds: u8) -> Self {
        Self {
            total_duration: format!("{:.1}s", elapsed_secs),
            total_tokens: usage.total_tokens,
            total_cost: format!("{:.4}", f64::from(usage.total_tokens) * Self::COST_PER_TOKEN),
            agents_used,
            rounds_completed: rounds,
        }
    }
}

/// Everything a completed session produced
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouncilOutcome {
    pub session_id: String,
    pub agents: Vec<CouncilAgent>,
    pub deliberation: Vec<DeliberationRound>,
    pub votes: Vec<AgentVote>,
    pub final_verdict: FinalVerdict,
    pub metadata: CouncilRunStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_stats_formatting() {
        let stats = CouncilRunStats::new(73.25, TokenUsage::new(0, 0, 5000), 6, 4);
        assert_eq!(stats.total_duration, "73.2s");
        assert_eq!(stats.total_cost, "0.0100");
        assert_eq!(stats.agents_used, 6);
        assert_eq!(stats.rounds_completed, 4);
    }

    #[test]
    fn test_agent_persona_stays_off_the_wire() {
        let agent = CouncilAgent {
            id: "agent_1_0".to_string(),
            name: "Dr. Dubious".to_string(),
            archetype: "Skeptic".to_string(),
            persona: "You are The Skeptic.",
            temperature: 0.7,
        };
        let json = serde_json::to_string(&agent).unwrap();
        assert!(json.contains("Dr. Dubious"));
        assert!(!json.contains("You are The Skeptic"));
    }
}
