//! Token usage accounting for upstream completion calls

use serde::{Deserialize, Serialize};

/// Token counters reported by the completion service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32, total_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens,
        }
    }

    /// Accumulate usage from another call
    pub fn add(&mut self, other: TokenUsage) {
        self.prompt_tokens = self.prompt_tokens.saturating_add(other.prompt_tokens);
        self.completion_tokens = self.completion_tokens.saturating_add(other.completion_tokens);
        self.total_tokens = self.total_tokens.saturating_add(other.total_tokens);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_accumulates() {
        let mut usage = TokenUsage::new(10, 20, 30);
        usage.add(TokenUsage::new(1, 2, 3));
        assert_eq!(usage, TokenUsage::new(11, 22, 33));
    }

    #[test]
    fn test_usage_add_saturates() {
        let mut usage = TokenUsage::new(u32::MAX, 0, u32::MAX);
        usage.add(TokenUsage::new(1, 1, 1));
        assert_eq!(usage.prompt_tokens, u32::MAX);
        assert_eq!(usage.total_tokens, u32::MAX);
    }

    #[test]
    fn test_usage_camel_case_wire_format() {
        let json = serde_json::to_string(&TokenUsage::new(1, 2, 3)).unwrap();
        assert!(json.contains("promptTokens"));
        assert!(json.contains("completionTokens"));
        assert!(json.contains("totalTokens"));
    }
}
