//! Domain layer for calcouncil
//!
//! This crate contains the core records, value objects, persona tables and
//! parsing pipelines. It has no dependencies on infrastructure or
//! presentation concerns and performs no I/O.
//!
//! # Core Concepts
//!
//! ## Escalation ladder
//!
//! A calculation can be disputed up to three times; after that the workflow
//! hands the record to a fixed three-level supervisor hierarchy, and once the
//! final level has ruled, to the Mathematical Council.
//!
//! ## Defensive parsing
//!
//! The upstream model is asked for structured JSON and routinely ignores the
//! request, so every reply passes through a layered fallback pipeline. Only
//! the supervisor stage is allowed to surface a parse failure; everywhere
//! else a default value stands in.

pub mod calculation;
pub mod core;
pub mod council;
pub mod prompt;
pub mod safety;
pub mod session;
pub mod supervisor;

// Re-export commonly used types
pub use calculation::entities::{DisputeLedger, DisputeRecord, MAX_DISPUTES};
pub use calculation::expression::Expression;
pub use calculation::normalizer::{NormalizedResponse, normalize};
pub use crate::core::{error::DomainError, model::Model, usage::TokenUsage};
pub use council::entities::{
    AgentStatement, AgentVote, CouncilAgent, CouncilOutcome, CouncilRunStats, DeliberationRound,
    FinalVerdict,
};
pub use council::events::CouncilEvent;
pub use prompt::PromptTemplate;
pub use safety::prompt::{ConversationContext, SafetyRole};
pub use safety::verdict::SafetyVerdict;
pub use session::entities::{Message, Role};
pub use supervisor::review::SupervisorReview;
