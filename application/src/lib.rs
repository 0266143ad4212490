//! Application layer for calcouncil
//!
//! This crate contains the use cases for each workflow stage and the
//! completion gateway port. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use config::CouncilPacing;
pub use ports::completion_gateway::{
    Completion, CompletionGateway, CompletionRequest, GatewayError,
};
pub use use_cases::calculate::{CalculateError, CalculateInput, CalculateOutcome, CalculateUseCase};
pub use use_cases::dispute::{DisputeError, DisputeInput, DisputeOutcome, DisputeUseCase};
pub use use_cases::escalate::{EscalateError, EscalateInput, EscalateOutcome, EscalateUseCase};
pub use use_cases::run_council::{CouncilError, CouncilInput, RunCouncilUseCase};
pub use use_cases::safety_check::{
    SafetyCheckError, SafetyCheckInput, SafetyCheckOutcome, SafetyCheckUseCase,
};
pub use use_cases::StageMetadata;
