//! OpenRouter implementation of the completion gateway port.
//!
//! One request, one reply. The credential is checked before any network
//! call; no retries happen at this layer.

use super::wire::{ChatRequest, ChatResponse, ResponseFormat};
use crate::config::file_config::UpstreamConfig;
use async_trait::async_trait;
use calcouncil_application::{Completion, CompletionGateway, CompletionRequest, GatewayError};
use calcouncil_domain::TokenUsage;
use tracing::debug;

/// How much of an upstream error body is carried into the error detail
const ERROR_DETAIL_LIMIT: usize = 300;

/// Gateway adapter for the OpenRouter chat-completions API
pub struct OpenRouterGateway {
    client: reqwest::Client,
    config: UpstreamConfig,
}

impl OpenRouterGateway {
    pub fn new(config: UpstreamConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl CompletionGateway for OpenRouterGateway {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, GatewayError> {
        let Some(api_key) = self.config.api_key.as_deref().filter(|k| !k.is_empty()) else {
            return Err(GatewayError::MissingCredential);
        };

        let body = ChatRequest {
            model: request.model.as_str().to_string(),
            messages: request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format: request.json_response.then(ResponseFormat::json_object),
        };

        debug!(model = %body.model, temperature = body.temperature, "Completion request");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.title)
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(GatewayError::RequestFailed {
                status: status.as_u16(),
                detail: truncate(&detail, ERROR_DETAIL_LIMIT),
            });
        }

        let payload: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedReply(e.to_string()))?;

        let text = payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| {
                GatewayError::MalformedReply("response carried no completion choice".to_string())
            })?;

        Ok(Completion {
            text,
            usage: payload.usage.map(TokenUsage::from).unwrap_or_default(),
            model_echoed: payload.model,
        })
    }
}

fn truncate(text: &str, limit: usize) -> String {
    if text.len() <= limit {
        text.to_string()
    } else {
        let mut end = limit;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &text[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calcouncil_domain::{Message, Model};

    fn config(api_key: Option<&str>) -> UpstreamConfig {
        UpstreamConfig {
            base_url: "https://openrouter.ai/api/v1".to_string(),
            api_key: api_key.map(str::to_string),
            referer: "http://localhost:3000".to_string(),
            title: "AI Calculator Council".to_string(),
        }
    }

    #[tokio::test]
    async fn test_missing_credential_fails_before_any_call() {
        let gateway = OpenRouterGateway::new(config(None));
        let request =
            CompletionRequest::new(Model::Llama32Instruct3B, vec![Message::user("2+2")], 0.1);

        let error = gateway.complete(request).await.unwrap_err();
        assert!(matches!(error, GatewayError::MissingCredential));
    }

    #[tokio::test]
    async fn test_empty_credential_counts_as_missing() {
        let gateway = OpenRouterGateway::new(config(Some("")));
        let request =
            CompletionRequest::new(Model::Llama32Instruct3B, vec![Message::user("2+2")], 0.1);

        let error = gateway.complete(request).await.unwrap_err();
        assert!(matches!(error, GatewayError::MissingCredential));
    }

    #[test]
    fn test_endpoint_tolerates_trailing_slash() {
        let mut config = config(Some("key"));
        config.base_url = "https://openrouter.ai/api/v1/".to_string();
        let gateway = OpenRouterGateway::new(config);
        assert_eq!(
            gateway.endpoint(),
            "https://openrouter.ai/api/v1/chat/completions"
        );
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 300), "short");
        let truncated = truncate(&"é".repeat(400), 301);
        assert!(truncated.ends_with("..."));
        assert!(truncated.len() <= 304);
    }
}
