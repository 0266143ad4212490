//! Calculate use case
//!
//! First-pass evaluation of a user expression. Validates the charset, asks
//! the model for an explanation-first JSON object, normalizes whatever comes
//! back and returns the transcript so a later dispute can continue the same
//! logical conversation.

use crate::ports::completion_gateway::{CompletionGateway, CompletionRequest, GatewayError};
use crate::use_cases::StageMetadata;
use calcouncil_domain::{DomainError, Expression, Message, Model, PromptTemplate, normalize};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during calculation
#[derive(Error, Debug)]
pub enum CalculateError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

/// Input for the Calculate use case
#[derive(Debug, Clone)]
pub struct CalculateInput {
    pub expression: String,
}

/// Everything the first pass produced
#[derive(Debug, Clone)]
pub struct CalculateOutcome {
    pub result: String,
    pub explanation: String,
    pub confidence: Option<u8>,
    /// Primer, query and raw model reply, for dispute continuation
    pub transcript: Vec<Message>,
    pub metadata: StageMetadata,
}

/// Use case for the first-pass calculation
pub struct CalculateUseCase {
    gateway: Arc<dyn CompletionGateway>,
}

impl CalculateUseCase {
    const TEMPERATURE: f32 = 0.1;

    pub fn new(gateway: Arc<dyn CompletionGateway>) -> Self {
        Self { gateway }
    }

    pub async fn execute(&self, input: CalculateInput) -> Result<CalculateOutcome, CalculateError> {
        let expression = Expression::try_new(input.expression)?;
        info!("Calculating expression: {}", expression);

        let started = Instant::now();
        let messages = vec![
            Message::system(PromptTemplate::calculation_system()),
            Message::user(PromptTemplate::calculation_query(expression.content())),
        ];

        let request = CompletionRequest::new(
            Model::Llama32Instruct3B,
            messages.clone(),
            Self::TEMPERATURE,
        )
        .expecting_json();

        let completion = self.gateway.complete(request).await?;
        let normalized = normalize(&completion.text);
        debug!(result = %normalized.result, "Calculation normalized");

        let mut transcript = messages;
        transcript.push(Message::assistant(&completion.text));

        Ok(CalculateOutcome {
            result: normalized.result,
            explanation: normalized.explanation,
            confidence: normalized.confidence,
            transcript,
            metadata: StageMetadata::record(started, Model::Llama32Instruct3B, completion.usage),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Scripted, ScriptedGateway};
    use calcouncil_domain::Role;

    fn input(expression: &str) -> CalculateInput {
        CalculateInput {
            expression: expression.to_string(),
        }
    }

    #[tokio::test]
    async fn test_clean_json_reply() {
        let gateway = Arc::new(ScriptedGateway::new(vec![Scripted::Reply(
            r#"{"explanation": "2 plus 2 is 4", "result": "4", "confidence": 97}"#,
        )]));
        let outcome = CalculateUseCase::new(gateway.clone())
            .execute(input("2 + 2"))
            .await
            .unwrap();

        assert_eq!(outcome.result, "4");
        assert_eq!(outcome.explanation, "2 plus 2 is 4");
        assert_eq!(outcome.confidence, Some(97));
        assert_eq!(outcome.metadata.usage.total_tokens, 30);

        let requests = gateway.requests.lock().unwrap();
        assert_eq!(requests[0].model, Model::Llama32Instruct3B);
        assert!(requests[0].json_response);
    }

    #[tokio::test]
    async fn test_transcript_ends_with_raw_reply() {
        let gateway = Arc::new(ScriptedGateway::new(vec![Scripted::Reply("just 4, trust me")]));
        let outcome = CalculateUseCase::new(gateway)
            .execute(input("2 + 2"))
            .await
            .unwrap();

        assert_eq!(outcome.transcript.len(), 3);
        assert_eq!(outcome.transcript[0].role, Role::System);
        assert_eq!(outcome.transcript[2].role, Role::Assistant);
        assert_eq!(outcome.transcript[2].content, "just 4, trust me");
        // Free text still normalizes to a usable result
        assert_eq!(outcome.result, "4");
    }

    #[tokio::test]
    async fn test_invalid_expression_fails_before_any_call() {
        let gateway = Arc::new(ScriptedGateway::new(vec![]));
        let error = CalculateUseCase::new(gateway.clone())
            .execute(input("2+2; rm -rf"))
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            CalculateError::Domain(DomainError::InvalidExpression)
        ));
        assert_eq!(gateway.request_count(), 0);
    }

    #[tokio::test]
    async fn test_gateway_outage_surfaces() {
        let gateway = Arc::new(ScriptedGateway::new(vec![Scripted::Fail]));
        let error = CalculateUseCase::new(gateway)
            .execute(input("2 + 2"))
            .await
            .unwrap_err();

        assert!(matches!(error, CalculateError::Gateway(_)));
    }
}
