//! Completion gateway port
//!
//! Defines the interface for the upstream text-completion service. The
//! adapter lives in the infrastructure layer; everything above treats the
//! reply as untrusted free text, even when a structured-output hint was
//! passed.

use async_trait::async_trait;
use calcouncil_domain::{Message, Model, TokenUsage};
use thiserror::Error;

/// Errors that can occur during completion gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    /// No API credential configured; checked before any network call
    #[error("No API credential configured")]
    MissingCredential,

    /// The service could not be reached at all
    #[error("Completion service unreachable: {0}")]
    Unavailable(String),

    /// The service answered with a non-success status
    #[error("Completion request failed with status {status}: {detail}")]
    RequestFailed { status: u16, detail: String },

    /// The response body did not carry a completion
    #[error("Malformed completion payload: {0}")]
    MalformedReply(String),
}

/// One request to the completion service
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: Model,
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    /// Ask the service for a JSON object; a hint, never a guarantee
    pub json_response: bool,
}

impl CompletionRequest {
    pub fn new(model: Model, messages: Vec<Message>, temperature: f32) -> Self {
        Self {
            model,
            messages,
            temperature,
            max_tokens: None,
            json_response: false,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn expecting_json(mut self) -> Self {
        self.json_response = true;
        self
    }
}

/// The raw completion returned by the service
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub usage: TokenUsage,
    /// Model identifier echoed by the service, when it reports one
    pub model_echoed: Option<String>,
}

/// Gateway for upstream completion calls
///
/// One request, one reply, no retries: retry policy belongs to callers, and
/// the observed behavior of every stage is fail fast and surface or degrade.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder_defaults() {
        let request = CompletionRequest::new(
            Model::Llama32Instruct3B,
            vec![Message::user("Calculate: 2+2")],
            0.1,
        );
        assert_eq!(request.max_tokens, None);
        assert!(!request.json_response);

        let request = request.with_max_tokens(300).expecting_json();
        assert_eq!(request.max_tokens, Some(300));
        assert!(request.json_response);
    }

    #[test]
    fn test_gateway_error_display() {
        let error = GatewayError::RequestFailed {
            status: 429,
            detail: "rate limited".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Completion request failed with status 429: rate limited"
        );
    }
}
