//! Configuration file schema.
//!
//! Every field has a default so a bare install runs against the public
//! OpenRouter endpoint; only the credential must come from outside.

use calcouncil_application::CouncilPacing;
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub council: CouncilSettings,
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Upstream completion service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub base_url: String,
    /// Falls back to the `OPENROUTER_API_KEY` environment variable
    pub api_key: Option<String>,
    /// Sent as the `HTTP-Referer` attribution header
    pub referer: String,
    /// Sent as the `X-Title` attribution header
    pub title: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://openrouter.ai/api/v1".to_string(),
            api_key: None,
            referer: "http://localhost:3000".to_string(),
            title: "AI Calculator Council".to_string(),
        }
    }
}

/// Pacing of the streamed council session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CouncilSettings {
    pub statement_delay_ms: u64,
    pub vote_delay_ms: u64,
    pub round_delay_ms: u64,
}

impl Default for CouncilSettings {
    fn default() -> Self {
        Self {
            statement_delay_ms: 3000,
            vote_delay_ms: 2000,
            round_delay_ms: 4000,
        }
    }
}

impl CouncilSettings {
    pub fn pacing(&self) -> CouncilPacing {
        CouncilPacing::from_millis(
            self.statement_delay_ms,
            self.vote_delay_ms,
            self.round_delay_ms,
        )
    }
}
