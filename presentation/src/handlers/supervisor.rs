//! POST /api/supervisor

use crate::error::ApiError;
use crate::state::AppState;
use crate::wire::ResponseMetadata;
use axum::Json;
use axum::extract::State;
use calcouncil_application::{EscalateInput, EscalateUseCase};
use calcouncil_domain::{DisputeRecord, Message};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupervisorRequest {
    #[serde(default)]
    pub expression: Option<String>,
    #[serde(default)]
    pub disputes: Vec<DisputeRecord>,
    #[serde(default)]
    pub conversation_history: Vec<Message>,
    #[serde(default)]
    pub user_concern: Option<String>,
    /// Level of the last review issued, 0 when none exists yet
    #[serde(default)]
    pub current_level: u8,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupervisorResponse {
    pub supervisor_level: u8,
    pub supervisor_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
    pub explanation: String,
    pub final_answer: String,
    pub recommendation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing_statement: Option<String>,
    pub is_final: bool,
    pub can_escalate: bool,
    pub next_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_concern: Option<String>,
    pub metadata: ResponseMetadata,
}

pub async fn supervisor(
    State(state): State<AppState>,
    Json(request): Json<SupervisorRequest>,
) -> Result<Json<SupervisorResponse>, ApiError> {
    let expression = request
        .expression
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Expression is required"))?;

    if request.disputes.is_empty() {
        return Err(ApiError::bad_request(
            "At least one dispute is required for supervisor review",
        ));
    }

    let outcome = EscalateUseCase::new(state.gateway.clone())
        .execute(EscalateInput {
            expression,
            disputes: request.disputes,
            conversation_history: request.conversation_history,
            user_concern: request.user_concern,
            current_level: request.current_level,
        })
        .await?;

    let review = outcome.review;
    let can_escalate = review.can_escalate();
    Ok(Json(SupervisorResponse {
        supervisor_level: review.level,
        supervisor_title: review.title,
        agent_name: review.agent_name,
        explanation: review.explanation,
        final_answer: review.final_answer,
        recommendation: review.recommendation,
        confidence: review.confidence,
        closing_statement: review.closing_statement,
        is_final: review.is_final,
        can_escalate,
        next_level: outcome.next_level_title,
        user_concern: outcome.user_concern,
        metadata: ResponseMetadata::from(&outcome.metadata),
    }))
}
