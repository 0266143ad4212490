//! Supervisor review entity

use super::ladder::MAX_LEVEL;
use serde::{Deserialize, Serialize};

/// The verdict issued by one supervisor level.
//
// Levels only advance forward, one rung at a time; a level-3 review closes
// the record to further disputes and escalations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupervisorReview {
    pub level: u8,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
    pub explanation: String,
    pub final_answer: String,
    pub recommendation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closing_statement: Option<String>,
    pub is_final: bool,
}

impl SupervisorReview {
    /// Whether the record may escalate further
    pub fn can_escalate(&self) -> bool {
        !self.is_final
    }

    /// A review is final exactly at the terminal level
    pub fn is_terminal_level(level: u8) -> bool {
        level >= MAX_LEVEL
    }
}
