//! Calculation and dispute records

use serde::{Deserialize, Serialize};

/// Maximum number of disputes before supervisor review becomes mandatory
pub const MAX_DISPUTES: usize = 3;

/// One user objection and the revised answer it produced.
///
/// Created on dispute response, never mutated. The original calculation is
/// retained by the caller for audit; records accumulate alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisputeRecord {
    pub dispute_feedback: String,
    pub result: String,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
}

/// Workflow state over the disputes attached to one calculation.
///
/// The dispute stage itself never rejects a call; this ledger answers the
/// workflow question "may another dispute be filed, or is escalation due?".
#[derive(Debug, Clone, Default)]
pub struct DisputeLedger {
    records: Vec<DisputeRecord>,
}

impl DisputeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, dispute: DisputeRecord) {
        self.records.push(dispute);
    }

    pub fn records(&self) -> &[DisputeRecord] {
        &self.records
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// True once the dispute allowance is used up and the workflow must move
    /// to supervisor review
    pub fn requires_escalation(&self) -> bool {
        self.records.len() >= MAX_DISPUTES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispute(n: usize) -> DisputeRecord {
        DisputeRecord {
            dispute_feedback: format!("that is wrong, attempt {}", n),
            result: "5".to_string(),
            explanation: "recalculated".to_string(),
            agent_name: None,
            confidence: None,
        }
    }

    #[test]
    fn test_escalation_required_after_three_disputes() {
        let mut ledger = DisputeLedger::new();
        for n in 0..MAX_DISPUTES {
            assert!(!ledger.requires_escalation());
            ledger.record(dispute(n));
        }
        assert_eq!(ledger.count(), 3);
        assert!(ledger.requires_escalation());
    }

    #[test]
    fn test_dispute_record_wire_format() {
        let json = serde_json::to_string(&dispute(1)).unwrap();
        assert!(json.contains("disputeFeedback"));
        assert!(!json.contains("agentName"));

        let round_trip: DisputeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(round_trip.result, "5");
    }
}
