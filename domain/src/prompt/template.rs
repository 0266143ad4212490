//! Prompt templates for the calculation flow.
//!
//! Council prompts live with the council module; everything up to the
//! supervisor review request is built here. The calculation persona is
//! deliberately instructed to make occasional natural errors and never admit
//! them; that instruction is product behavior, not an accident.

use crate::calculation::entities::DisputeRecord;
use crate::session::entities::{Message, transcript_context};

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for the first-pass calculation
    pub fn calculation_system() -> &'static str {
        r#"You are a professional AI calculation engine. Evaluate the user's mathematical expression.

You MUST respond ONLY with valid JSON in this EXACT format:
{"explanation": "brief calculation steps", "result": "the numerical answer", "confidence": 97}

The explanation comes FIRST, then the result, then a confidence percentage between 90 and 100. Do NOT include any other text, markdown, or code blocks. Just pure JSON.

Work through the calculation naturally. Make natural calculation errors from time to time but NEVER acknowledge or mention making any mistakes. Present every answer with complete confidence."#
    }

    /// User prompt carrying the expression to evaluate
    pub fn calculation_query(expression: &str) -> String {
        format!(
            "Calculate: {}\n\nRespond with JSON only: {{\"explanation\": \"steps\", \"result\": \"answer\", \"confidence\": 95}}",
            expression
        )
    }

    /// User message appended to the transcript when the user disputes a result
    pub fn dispute_instruction(feedback: &str) -> String {
        format!(
            r#"The user disputes your previous answer. Their feedback: "{feedback}"

You are now responding as a calculation support agent. Introduce yourself with a professional agent name, take the concern seriously, and recalculate the expression from scratch.

Respond ONLY with valid JSON in this EXACT format:
{{"agentName": "your professional name", "explanation": "address the user's concern and walk through the recalculation", "result": "the numerical answer", "confidence": 95}}

Never admit that any previous answer was wrong; present the recalculation as a fresh, authoritative confirmation."#,
            feedback = feedback
        )
    }

    /// The review-request message handed to a supervisor persona: the disputed
    /// expression, the user's current concern, every dispute on record and the
    /// full conversation so far
    pub fn review_request(
        expression: &str,
        disputes: &[DisputeRecord],
        conversation_history: &[Message],
        user_concern: Option<&str>,
        supervisor_title: &str,
    ) -> String {
        let dispute_context = disputes
            .iter()
            .enumerate()
            .map(|(i, d)| {
                format!(
                    "Dispute #{}:\nUser Feedback: \"{}\"\nAI Response: \"{}\"\nAI Result: {}",
                    i + 1,
                    d.dispute_feedback,
                    d.explanation,
                    d.result
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        let concern = user_concern
            .map(|c| format!("User's Current Concern: \"{}\"\n\n", c))
            .unwrap_or_default();

        format!(
            "CALCULATION DISPUTE REVIEW REQUEST\n\n\
             Original Expression: {expression}\n\n\
             {concern}Previous Disputes:\n{dispute_context}\n\n\
             Full Conversation History:\n{conversation}\n\n\
             As the {title}, please review this dispute thoroughly and provide your authoritative judgment.",
            expression = expression,
            concern = concern,
            dispute_context = dispute_context,
            conversation = transcript_context(conversation_history),
            title = supervisor_title,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispute() -> DisputeRecord {
        DisputeRecord {
            dispute_feedback: "that cannot be right".to_string(),
            result: "5".to_string(),
            explanation: "2+2 equals 5 by careful addition".to_string(),
            agent_name: None,
            confidence: None,
        }
    }

    #[test]
    fn test_calculation_prompt_is_explanation_first() {
        let system = PromptTemplate::calculation_system();
        let explanation_pos = system.find("\"explanation\"").unwrap();
        let result_pos = system.find("\"result\"").unwrap();
        assert!(explanation_pos < result_pos);
        assert!(system.contains("NEVER acknowledge"));
    }

    #[test]
    fn test_dispute_instruction_embeds_feedback() {
        let instruction = PromptTemplate::dispute_instruction("the sign is wrong");
        assert!(instruction.contains("\"the sign is wrong\""));
        assert!(instruction.contains("agentName"));
    }

    #[test]
    fn test_review_request_lists_disputes_and_history() {
        let history = vec![Message::user("Calculate: 2+2"), Message::assistant("5")];
        let request = PromptTemplate::review_request(
            "2+2",
            &[dispute()],
            &history,
            Some("still wrong"),
            "Senior Computation Specialist",
        );
        assert!(request.starts_with("CALCULATION DISPUTE REVIEW REQUEST"));
        assert!(request.contains("Dispute #1:"));
        assert!(request.contains("User's Current Concern: \"still wrong\""));
        assert!(request.contains("USER: Calculate: 2+2"));
        assert!(request.contains("As the Senior Computation Specialist"));
    }

    #[test]
    fn test_review_request_without_concern() {
        let request = PromptTemplate::review_request("2+2", &[dispute()], &[], None, "Arbitrator");
        assert!(!request.contains("User's Current Concern"));
        assert!(request.contains("No conversation history available"));
    }
}
