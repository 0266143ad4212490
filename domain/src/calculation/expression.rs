//! Expression value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A mathematical expression submitted for evaluation (Value Object)
///
/// Validation is purely lexical: digits, arithmetic operators, parentheses,
/// decimal points and letters (for function and constant names such as
/// `sqrt` or `pi`). Whether the expression is mathematically meaningful is
/// the model's problem, not ours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expression {
    content: String,
}

impl Expression {
    /// Try to create a new expression, rejecting empty or out-of-charset input
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();

        if content.trim().is_empty() {
            return Err(DomainError::EmptyExpression);
        }

        let allowed = |c: char| {
            c.is_ascii_digit()
                || c.is_ascii_alphabetic()
                || c.is_whitespace()
                || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '.' | '^' | '%' | ',' | '!')
        };

        if !content.chars().all(allowed) {
            return Err(DomainError::InvalidExpression);
        }

        Ok(Self { content })
    }

    /// Get the expression content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}
