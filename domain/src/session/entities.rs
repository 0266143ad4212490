//! Session domain entities
//!
//! The transcript is owned by the calling session: stages receive it, append
//! to it and hand it back, but nothing here persists it.

use serde::{Deserialize, Serialize};

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A message in a conversation transcript (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Render a transcript as a plain-text context block for review prompts
pub fn transcript_context(messages: &[Message]) -> String {
    if messages.is_empty() {
        return "No conversation history available".to_string();
    }

    messages
        .iter()
        .map(|m| {
            let role = match m.role {
                Role::System => "SYSTEM",
                Role::User => "USER",
                Role::Assistant => "ASSISTANT",
            };
            format!("{}: {}", role, m.content)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        let msg = Message::assistant("42");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"role\":\"assistant\""));
    }

    #[test]
    fn test_transcript_context_renders_roles() {
        let messages = vec![Message::user("Calculate: 2+2"), Message::assistant("5")];
        let context = transcript_context(&messages);
        assert!(context.starts_with("USER: Calculate: 2+2"));
        assert!(context.contains("ASSISTANT: 5"));
    }

    #[test]
    fn test_empty_transcript_context() {
        assert_eq!(
            transcript_context(&[]),
            "No conversation history available"
        );
    }
}
