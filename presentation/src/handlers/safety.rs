//! POST /api/safety-check
//!
//! Advisory only. A degraded classifier never fails this endpoint; the use
//! case resolves those cases to "safe" before they reach here.

use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use calcouncil_application::{SafetyCheckInput, SafetyCheckUseCase};
use calcouncil_domain::SafetyVerdict;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyCheckRequest {
    #[serde(default)]
    pub user_message: Option<String>,
    #[serde(default)]
    pub agent_response: Option<String>,
    #[serde(default)]
    pub calculation_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyCheckResponse {
    pub calculation_id: Option<String>,
    pub safety: SafetyVerdicts,
}

#[derive(Debug, Serialize)]
pub struct SafetyVerdicts {
    pub input: SafetyVerdict,
    pub output: Option<SafetyVerdict>,
}

pub async fn safety_check(
    State(state): State<AppState>,
    Json(request): Json<SafetyCheckRequest>,
) -> Result<Json<SafetyCheckResponse>, ApiError> {
    let user_message = request
        .user_message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("User message is required"))?;

    let outcome = SafetyCheckUseCase::new(state.gateway.clone())
        .execute(SafetyCheckInput {
            user_message,
            agent_response: request.agent_response,
            calculation_id: request.calculation_id,
        })
        .await?;

    Ok(Json(SafetyCheckResponse {
        calculation_id: outcome.calculation_id,
        safety: SafetyVerdicts {
            input: outcome.input,
            output: outcome.output,
        },
    }))
}
