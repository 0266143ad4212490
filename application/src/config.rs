//! Pacing configuration for council sessions.
//!
//! The delays are a product feature, not a correctness requirement: they
//! keep the live stream readable to a human watching statements arrive.
//! Tests run with [`CouncilPacing::none`].

use std::time::Duration;

/// Fixed delays inserted between council stream events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CouncilPacing {
    /// Pause after each agent statement
    pub statement_delay: Duration,
    /// Pause after each vote
    pub vote_delay: Duration,
    /// Pause after each deliberation round
    pub round_delay: Duration,
}

impl Default for CouncilPacing {
    fn default() -> Self {
        Self {
            statement_delay: Duration::from_secs(3),
            vote_delay: Duration::from_secs(2),
            round_delay: Duration::from_secs(4),
        }
    }
}

impl CouncilPacing {
    /// Zero delays, for tests and non-interactive callers
    pub fn none() -> Self {
        Self {
            statement_delay: Duration::ZERO,
            vote_delay: Duration::ZERO,
            round_delay: Duration::ZERO,
        }
    }

    pub fn from_millis(statement: u64, vote: u64, round: u64) -> Self {
        Self {
            statement_delay: Duration::from_millis(statement),
            vote_delay: Duration::from_millis(vote),
            round_delay: Duration::from_millis(round),
        }
    }
}
