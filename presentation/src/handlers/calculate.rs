//! POST /api/calculate
//!
//! One endpoint serves both the first pass and disputes: a request carrying
//! non-empty `disputeFeedback` continues the supplied conversation instead
//! of starting a fresh one.

use crate::error::ApiError;
use crate::state::AppState;
use crate::wire::ResponseMetadata;
use axum::Json;
use axum::extract::State;
use calcouncil_application::{
    CalculateInput, CalculateUseCase, DisputeInput, DisputeUseCase,
};
use calcouncil_domain::Message;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    #[serde(default)]
    pub expression: Option<String>,
    #[serde(default)]
    pub conversation_history: Option<Vec<Message>>,
    #[serde(default)]
    pub dispute_feedback: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateResponse {
    pub result: String,
    pub explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
    pub conversation_history: Vec<Message>,
    pub metadata: ResponseMetadata,
}

pub async fn calculate(
    State(state): State<AppState>,
    Json(request): Json<CalculateRequest>,
) -> Result<Json<CalculateResponse>, ApiError> {
    let feedback = request
        .dispute_feedback
        .filter(|feedback| !feedback.trim().is_empty());

    match feedback {
        Some(feedback) => {
            let transcript = request.conversation_history.unwrap_or_default();
            if transcript.is_empty() {
                return Err(ApiError::bad_request(
                    "conversationHistory is required to dispute a result",
                ));
            }

            let outcome = DisputeUseCase::new(state.gateway.clone())
                .execute(DisputeInput {
                    transcript,
                    feedback,
                })
                .await?;

            Ok(Json(CalculateResponse {
                result: outcome.record.result,
                explanation: outcome.record.explanation,
                confidence: outcome.record.confidence,
                agent_name: outcome.record.agent_name,
                conversation_history: outcome.transcript,
                metadata: ResponseMetadata::from(&outcome.metadata),
            }))
        }
        None => {
            let expression = request
                .expression
                .filter(|e| !e.trim().is_empty())
                .ok_or_else(|| ApiError::bad_request("Expression is required"))?;

            let outcome = CalculateUseCase::new(state.gateway.clone())
                .execute(CalculateInput { expression })
                .await?;

            Ok(Json(CalculateResponse {
                result: outcome.result,
                explanation: outcome.explanation,
                confidence: outcome.confidence,
                agent_name: None,
                conversation_history: outcome.transcript,
                metadata: ResponseMetadata::from(&outcome.metadata),
            }))
        }
    }
}
