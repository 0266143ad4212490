//! Escalate use case
//!
//! Hands the full dispute history to the next supervisor level. This is the
//! one stage where a parse failure surfaces to the caller: a supervisor
//! verdict without a final answer has no safe default.

use crate::ports::completion_gateway::{CompletionGateway, CompletionRequest, GatewayError};
use crate::use_cases::StageMetadata;
use calcouncil_domain::supervisor::ladder;
use calcouncil_domain::supervisor::parsing::parse_supervisor_reply;
use calcouncil_domain::{
    DisputeRecord, DomainError, Expression, Message, PromptTemplate, SupervisorReview,
};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur during supervisor escalation
#[derive(Error, Debug)]
pub enum EscalateError {
    #[error("At least one dispute is required for supervisor review")]
    MissingDisputes,

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

/// Input for the Escalate use case
#[derive(Debug, Clone)]
pub struct EscalateInput {
    pub expression: String,
    pub disputes: Vec<DisputeRecord>,
    pub conversation_history: Vec<Message>,
    pub user_concern: Option<String>,
    /// Level of the last review issued, 0 when none exists yet
    pub current_level: u8,
}

/// The issued review plus escalation bookkeeping
#[derive(Debug, Clone)]
pub struct EscalateOutcome {
    pub review: SupervisorReview,
    pub next_level_title: Option<String>,
    pub user_concern: Option<String>,
    pub metadata: StageMetadata,
}

/// Use case for advancing the supervisor ladder by one level
pub struct EscalateUseCase {
    gateway: Arc<dyn CompletionGateway>,
}

impl EscalateUseCase {
    const TEMPERATURE: f32 = 0.2;

    pub fn new(gateway: Arc<dyn CompletionGateway>) -> Self {
        Self { gateway }
    }

    pub async fn execute(&self, input: EscalateInput) -> Result<EscalateOutcome, EscalateError> {
        let expression = Expression::try_new(input.expression)?;
        if input.disputes.is_empty() {
            return Err(EscalateError::MissingDisputes);
        }

        let persona = ladder::for_current_level(input.current_level);
        info!(
            level = persona.level,
            title = persona.title,
            "Escalating dispute to supervisor"
        );

        let started = Instant::now();
        let messages = vec![
            Message::system(persona.system_prompt),
            Message::user(PromptTemplate::review_request(
                expression.content(),
                &input.disputes,
                &input.conversation_history,
                input.user_concern.as_deref(),
                persona.title,
            )),
        ];

        let request =
            CompletionRequest::new(persona.model.clone(), messages, Self::TEMPERATURE)
                .expecting_json();

        let completion = self.gateway.complete(request).await?;
        let verdict = parse_supervisor_reply(&completion.text).inspect_err(|_| {
            warn!(level = persona.level, "Supervisor reply carried no final answer");
        })?;

        let is_final = SupervisorReview::is_terminal_level(persona.level);
        Ok(EscalateOutcome {
            review: SupervisorReview {
                level: persona.level,
                title: persona.title.to_string(),
                agent_name: verdict.agent_name,
                explanation: verdict.explanation,
                final_answer: verdict.final_answer,
                recommendation: verdict.recommendation,
                confidence: verdict.confidence,
                closing_statement: verdict.closing_statement,
                is_final,
            },
            next_level_title: ladder::next_title(persona.level).map(str::to_string),
            user_concern: input.user_concern,
            metadata: StageMetadata::record(started, persona.model.clone(), completion.usage),
        })
    }
}
