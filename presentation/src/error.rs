//! HTTP error payloads and status mapping.
//!
//! Every failure leaves the API as `{"error": "<short message>"}` with a
//! status chosen by who can fix it: 400-class for the user, 500-class for
//! the operator or the upstream service.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use calcouncil_application::{
    CalculateError, DisputeError, EscalateError, GatewayError, SafetyCheckError,
};
use serde_json::json;

/// A failed request, ready to serialize
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Upstream failures keep their status where one exists; transport-level
/// unreachability reads as a bad gateway
fn gateway_status(error: &GatewayError) -> StatusCode {
    match error {
        GatewayError::MissingCredential | GatewayError::MalformedReply(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        GatewayError::Unavailable(_) => StatusCode::BAD_GATEWAY,
        GatewayError::RequestFailed { status, .. } => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
    }
}

impl From<GatewayError> for ApiError {
    fn from(error: GatewayError) -> Self {
        Self {
            status: gateway_status(&error),
            message: error.to_string(),
        }
    }
}

impl From<CalculateError> for ApiError {
    fn from(error: CalculateError) -> Self {
        match error {
            CalculateError::Domain(e) if e.is_user_error() => Self::bad_request(e.to_string()),
            CalculateError::Domain(e) => Self::internal(e.to_string()),
            CalculateError::Gateway(e) => e.into(),
        }
    }
}

impl From<DisputeError> for ApiError {
    fn from(error: DisputeError) -> Self {
        match error {
            DisputeError::Domain(e) if e.is_user_error() => Self::bad_request(e.to_string()),
            DisputeError::Domain(e) => Self::internal(e.to_string()),
            DisputeError::Gateway(e) => e.into(),
        }
    }
}

impl From<EscalateError> for ApiError {
    fn from(error: EscalateError) -> Self {
        match error {
            EscalateError::MissingDisputes => Self::bad_request(error.to_string()),
            EscalateError::Domain(e) if e.is_user_error() => Self::bad_request(e.to_string()),
            EscalateError::Domain(e) => Self::internal(e.to_string()),
            EscalateError::Gateway(e) => e.into(),
        }
    }
}

impl From<SafetyCheckError> for ApiError {
    fn from(error: SafetyCheckError) -> Self {
        let SafetyCheckError::Gateway(e) = error;
        e.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calcouncil_domain::DomainError;

    #[test]
    fn test_user_errors_are_bad_requests() {
        let error: ApiError = CalculateError::Domain(DomainError::InvalidExpression).into();
        assert_eq!(error.status, StatusCode::BAD_REQUEST);

        let error: ApiError = EscalateError::MissingDisputes.into();
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_malformed_supervisor_reply_is_internal() {
        let error: ApiError =
            EscalateError::Domain(DomainError::MalformedReply("no answer".to_string())).into();
        assert_eq!(error.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_gateway_statuses() {
        assert_eq!(
            gateway_status(&GatewayError::MissingCredential),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            gateway_status(&GatewayError::Unavailable("down".to_string())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            gateway_status(&GatewayError::RequestFailed {
                status: 429,
                detail: "rate limited".to_string()
            }),
            StatusCode::TOO_MANY_REQUESTS
        );
        // Nonsense upstream status falls back to 502
        assert_eq!(
            gateway_status(&GatewayError::RequestFailed {
                status: 42,
                detail: String::new()
            }),
            StatusCode::BAD_GATEWAY
        );
    }
}
