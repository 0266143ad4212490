//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Expression contains invalid characters")]
    InvalidExpression,

    #[error("Expression is empty")]
    EmptyExpression,

    #[error("Dispute feedback is empty")]
    EmptyFeedback,

    #[error("Malformed reply: {0}")]
    MalformedReply(String),
}

impl DomainError {
    /// Check if this error is caused by bad user input (as opposed to a bad
    /// upstream reply)
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidExpression
                | DomainError::EmptyExpression
                | DomainError::EmptyFeedback
        )
    }
}
