//! Wire types for the OpenRouter chat-completions endpoint.
//!
//! The request body is camel-ish OpenAI dialect; usage counters come back
//! snake_case and are mapped onto the domain's [`TokenUsage`].

use calcouncil_domain::{Message, TokenUsage};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self { kind: "json_object" }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<WireUsage>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WireUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

impl From<WireUsage> for TokenUsage {
    fn from(usage: WireUsage) -> Self {
        TokenUsage::new(
            usage.prompt_tokens,
            usage.completion_tokens,
            usage.total_tokens,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = ChatRequest {
            model: "meta-llama/llama-3.2-3b-instruct".to_string(),
            messages: vec![Message::system("You are a calculator."), Message::user("2+2")],
            temperature: 0.1,
            max_tokens: None,
            response_format: Some(ResponseFormat::json_object()),
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""model":"meta-llama/llama-3.2-3b-instruct""#));
        assert!(json.contains(r#""role":"system""#));
        assert!(json.contains(r#""response_format":{"type":"json_object"}"#));
        assert!(!json.contains("max_tokens"));
    }

    #[test]
    fn test_response_parsing() {
        let payload = r#"{
            "id": "gen-123",
            "model": "meta-llama/llama-3.2-3b-instruct",
            "choices": [{"message": {"role": "assistant", "content": "{\"result\": \"4\"}"}}],
            "usage": {"prompt_tokens": 31, "completion_tokens": 9, "total_tokens": 40}
        }"#;

        let response: ChatResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(
            response.choices[0].message.content.as_deref(),
            Some("{\"result\": \"4\"}")
        );

        let usage: TokenUsage = response.usage.unwrap().into();
        assert_eq!(usage.total_tokens, 40);
    }

    #[test]
    fn test_response_tolerates_missing_usage() {
        let response: ChatResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": "hi"}}]}"#).unwrap();
        assert!(response.usage.is_none());
        assert!(response.model.is_none());
    }
}
