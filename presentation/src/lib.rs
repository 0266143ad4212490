//! Presentation layer for calcouncil
//!
//! This crate exposes the workflow over HTTP: JSON endpoints for the
//! calculation, supervisor and safety stages, and a server-sent-event
//! stream for council sessions. Wire field names are camelCase, the
//! protocol the original client speaks.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod wire;

// Re-export commonly used types
pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
