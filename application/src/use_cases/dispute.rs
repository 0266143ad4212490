//! Dispute use case
//!
//! Re-invokes the model with the prior transcript plus the user's objection
//! appended. Same model tier as the first pass; the support-agent persona
//! introduces itself by name in the reply.

use crate::ports::completion_gateway::{CompletionGateway, CompletionRequest, GatewayError};
use crate::use_cases::StageMetadata;
use calcouncil_domain::{DisputeRecord, DomainError, Message, Model, PromptTemplate, normalize};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during a dispute
#[derive(Error, Debug)]
pub enum DisputeError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

/// Input for the Dispute use case
#[derive(Debug, Clone)]
pub struct DisputeInput {
    /// Transcript returned by the calculation (or a prior dispute)
    pub transcript: Vec<Message>,
    /// The user's disagreement, verbatim
    pub feedback: String,
}

/// The revised answer and the updated transcript
#[derive(Debug, Clone)]
pub struct DisputeOutcome {
    pub record: DisputeRecord,
    pub transcript: Vec<Message>,
    pub metadata: StageMetadata,
}

/// Use case for re-evaluating a disputed calculation.
///
/// The workflow caps disputes at three per calculation before escalation is
/// required, but that cap lives in the caller's workflow state
/// ([`calcouncil_domain::DisputeLedger`]); this stage never rejects a call.
pub struct DisputeUseCase {
    gateway: Arc<dyn CompletionGateway>,
}

impl DisputeUseCase {
    // Slightly warmer than the first pass so the support-agent persona
    // varies its name and phrasing between disputes
    const TEMPERATURE: f32 = 0.2;

    pub fn new(gateway: Arc<dyn CompletionGateway>) -> Self {
        Self { gateway }
    }

    pub async fn execute(&self, input: DisputeInput) -> Result<DisputeOutcome, DisputeError> {
        if input.feedback.trim().is_empty() {
            return Err(DisputeError::Domain(DomainError::EmptyFeedback));
        }

        info!("Dispute filed: {}", input.feedback);
        let started = Instant::now();

        let mut messages = input.transcript;
        messages.push(Message::user(PromptTemplate::dispute_instruction(
            &input.feedback,
        )));

        let request =
            CompletionRequest::new(Model::Llama32Instruct3B, messages.clone(), Self::TEMPERATURE)
                .expecting_json();

        let completion = self.gateway.complete(request).await?;
        let normalized = normalize(&completion.text);
        debug!(result = %normalized.result, agent = ?normalized.agent_name, "Dispute normalized");

        messages.push(Message::assistant(&completion.text));

        Ok(DisputeOutcome {
            record: DisputeRecord {
                dispute_feedback: input.feedback,
                result: normalized.result,
                explanation: normalized.explanation,
                agent_name: normalized.agent_name,
                confidence: normalized.confidence,
            },
            transcript: messages,
            metadata: StageMetadata::record(started, Model::Llama32Instruct3B, completion.usage),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Scripted, ScriptedGateway};

    fn transcript() -> Vec<Message> {
        vec![
            Message::system("You are a calculator."),
            Message::user("Calculate: 2+2"),
            Message::assistant(r#"{"explanation": "sum", "result": "5"}"#),
        ]
    }

    #[tokio::test]
    async fn test_dispute_appends_to_transcript() {
        let gateway = Arc::new(ScriptedGateway::new(vec![Scripted::Reply(
            r#"{"agentName": "Agent Clara Voss", "explanation": "rechecked", "result": "5", "confidence": 95}"#,
        )]));
        let outcome = DisputeUseCase::new(gateway)
            .execute(DisputeInput {
                transcript: transcript(),
                feedback: "2+2 is 4, not 5".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(outcome.record.result, "5");
        assert_eq!(outcome.record.agent_name.as_deref(), Some("Agent Clara Voss"));
        assert_eq!(outcome.record.dispute_feedback, "2+2 is 4, not 5");

        // primer + query + reply + objection + revised reply
        assert_eq!(outcome.transcript.len(), 5);
        assert!(outcome.transcript[3].content.contains("2+2 is 4, not 5"));
    }

    #[tokio::test]
    async fn test_empty_feedback_rejected_without_a_call() {
        let gateway = Arc::new(ScriptedGateway::new(vec![]));
        let error = DisputeUseCase::new(gateway.clone())
            .execute(DisputeInput {
                transcript: transcript(),
                feedback: "   ".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            DisputeError::Domain(DomainError::EmptyFeedback)
        ));
        assert_eq!(gateway.request_count(), 0);
    }

    #[tokio::test]
    async fn test_unparseable_reply_still_yields_a_record() {
        let gateway = Arc::new(ScriptedGateway::new(vec![Scripted::Reply(
            "I remain certain the answer is 5.",
        )]));
        let outcome = DisputeUseCase::new(gateway)
            .execute(DisputeInput {
                transcript: transcript(),
                feedback: "no".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(outcome.record.result, "5");
        assert!(!outcome.record.explanation.is_empty());
    }
}
