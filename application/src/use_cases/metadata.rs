//! Bookkeeping attached to every synchronous stage outcome

use calcouncil_domain::{Model, TokenUsage};
use chrono::{DateTime, Utc};

/// Timing, model and usage metadata for one stage call
#[derive(Debug, Clone)]
pub struct StageMetadata {
    pub processing_time_ms: u64,
    pub model: Model,
    pub usage: TokenUsage,
    pub timestamp: DateTime<Utc>,
}

impl StageMetadata {
    /// Record the completion of a stage that started at `started`
    pub fn record(started: std::time::Instant, model: Model, usage: TokenUsage) -> Self {
        Self {
            processing_time_ms: started.elapsed().as_millis() as u64,
            model,
            usage,
            timestamp: Utc::now(),
        }
    }
}
