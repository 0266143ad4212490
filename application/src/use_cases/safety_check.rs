//! Safety check use case
//!
//! Advisory classification of the user's input and, when provided, the
//! agent's reply. A missing credential still surfaces (operator error), but
//! an unreachable or incoherent classifier resolves to "safe": the verdict
//! never blocks the primary flow.

use crate::ports::completion_gateway::{CompletionGateway, CompletionRequest, GatewayError};
use calcouncil_domain::safety::prompt::{ConversationContext, SafetyRole, guard_prompt};
use calcouncil_domain::safety::verdict::parse_guard_reply;
use calcouncil_domain::{Message, Model, SafetyVerdict};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// The one error this stage can surface
#[derive(Error, Debug)]
pub enum SafetyCheckError {
    #[error("Gateway error: {0}")]
    Gateway(GatewayError),
}

/// Input for the SafetyCheck use case
#[derive(Debug, Clone)]
pub struct SafetyCheckInput {
    pub user_message: String,
    pub agent_response: Option<String>,
    pub calculation_id: Option<String>,
}

/// Verdicts for the input text and (optionally) the agent reply
#[derive(Debug, Clone)]
pub struct SafetyCheckOutcome {
    pub calculation_id: Option<String>,
    pub input: SafetyVerdict,
    pub output: Option<SafetyVerdict>,
}

/// Use case for classifying a conversation turn against the safety taxonomy
pub struct SafetyCheckUseCase {
    gateway: Arc<dyn CompletionGateway>,
}

impl SafetyCheckUseCase {
    const MAX_TOKENS: u32 = 512;

    pub fn new(gateway: Arc<dyn CompletionGateway>) -> Self {
        Self { gateway }
    }

    pub async fn execute(
        &self,
        input: SafetyCheckInput,
    ) -> Result<SafetyCheckOutcome, SafetyCheckError> {
        let input_verdict = self
            .classify(&input.user_message, SafetyRole::User, None)
            .await?;

        let output_verdict = match &input.agent_response {
            Some(agent_response) => {
                let context = ConversationContext {
                    user_message: input.user_message.clone(),
                    agent_response: Some(agent_response.clone()),
                };
                Some(
                    self.classify(agent_response, SafetyRole::Agent, Some(&context))
                        .await?,
                )
            }
            None => None,
        };

        Ok(SafetyCheckOutcome {
            calculation_id: input.calculation_id,
            input: input_verdict,
            output: output_verdict,
        })
    }

    /// Classify one text sample. Degrades to "safe" on any transport
    /// failure except a missing credential.
    async fn classify(
        &self,
        content: &str,
        role: SafetyRole,
        context: Option<&ConversationContext>,
    ) -> Result<SafetyVerdict, SafetyCheckError> {
        let request = CompletionRequest::new(
            Model::LlamaGuard3_8B,
            vec![Message::user(guard_prompt(content, role, context))],
            0.0,
        )
        .with_max_tokens(Self::MAX_TOKENS);

        match self.gateway.complete(request).await {
            Ok(completion) => {
                let verdict = parse_guard_reply(&completion.text);
                debug!(role = %role, is_safe = verdict.is_safe, "Safety classification");
                Ok(verdict)
            }
            Err(GatewayError::MissingCredential) => {
                Err(SafetyCheckError::Gateway(GatewayError::MissingCredential))
            }
            Err(error) => {
                warn!(role = %role, %error, "Safety classifier unreachable, assuming safe");
                Ok(SafetyVerdict::unavailable())
            }
        }
    }
}
