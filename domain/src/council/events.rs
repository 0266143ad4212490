//! Typed events emitted by a council session.
//!
//! The orchestrator's output is not a return value but a sequence of these
//! events pushed to a sink as each becomes available; the transport adapter
//! (SSE in this app) serializes them verbatim. The `type` discriminator and
//! camelCase payload fields are the wire protocol the client consumes.

use super::entities::{AgentStatement, AgentVote, CouncilAgent, CouncilOutcome, FinalVerdict};
use serde::Serialize;

/// Roster summary pushed when agents are seated
#[derive(Debug, Clone, Serialize)]
pub struct RosterEntry {
    pub id: String,
    pub name: String,
    pub archetype: String,
}

impl From<&CouncilAgent> for RosterEntry {
    fn from(agent: &CouncilAgent) -> Self {
        Self {
            id: agent.id.clone(),
            name: agent.name.clone(),
            archetype: agent.archetype.clone(),
        }
    }
}

/// A single event in the council stream
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CouncilEvent {
    #[serde(rename_all = "camelCase")]
    AgentsSelected {
        session_id: String,
        agents: Vec<RosterEntry>,
    },
    RoundStart {
        round: u8,
    },
    #[serde(rename_all = "camelCase")]
    StatementStart {
        agent_id: String,
        agent_name: String,
    },
    StatementComplete {
        statement: AgentStatement,
    },
    RoundComplete {
        round: u8,
    },
    DeliberationComplete {},
    VotingStarted {},
    Vote {
        vote: AgentVote,
    },
    VotingComplete {},
    Verdict {
        verdict: FinalVerdict,
    },
    Complete {
        #[serde(flatten)]
        outcome: Box<CouncilOutcome>,
    },
    Error {
        message: String,
    },
}

impl CouncilEvent {
    /// True for events that end the stream
    pub fn is_terminal(&self) -> bool {
        matches!(self, CouncilEvent::Complete { .. } | CouncilEvent::Error { .. })
    }

    /// The wire discriminator, handy for ordering assertions
    pub fn event_type(&self) -> &'static str {
        match self {
            CouncilEvent::AgentsSelected { .. } => "agents_selected",
            CouncilEvent::RoundStart { .. } => "round_start",
            CouncilEvent::StatementStart { .. } => "statement_start",
            CouncilEvent::StatementComplete { .. } => "statement_complete",
            CouncilEvent::RoundComplete { .. } => "round_complete",
            CouncilEvent::DeliberationComplete {} => "deliberation_complete",
            CouncilEvent::VotingStarted {} => "voting_started",
            CouncilEvent::Vote { .. } => "vote",
            CouncilEvent::VotingComplete {} => "voting_complete",
            CouncilEvent::Verdict { .. } => "verdict",
            CouncilEvent::Complete { .. } => "complete",
            CouncilEvent::Error { .. } => "error",
        }
    }
}
