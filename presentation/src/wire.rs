//! Shared wire types

use calcouncil_application::StageMetadata;
use calcouncil_domain::TokenUsage;
use serde::Serialize;

/// Bookkeeping block attached to every synchronous stage response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    /// Human-readable duration, e.g. `"1423ms"`
    pub processing_time: String,
    pub model: String,
    pub usage: TokenUsage,
    /// RFC 3339 timestamp of stage completion
    pub timestamp: String,
}

impl From<&StageMetadata> for ResponseMetadata {
    fn from(metadata: &StageMetadata) -> Self {
        Self {
            processing_time: format!("{}ms", metadata.processing_time_ms),
            model: metadata.model.to_string(),
            usage: metadata.usage,
            timestamp: metadata.timestamp.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calcouncil_domain::Model;
    use std::time::Instant;

    #[test]
    fn test_metadata_wire_format() {
        let metadata = StageMetadata::record(
            Instant::now(),
            Model::Llama32Instruct3B,
            TokenUsage::new(10, 20, 30),
        );
        let wire = ResponseMetadata::from(&metadata);
        assert!(wire.processing_time.ends_with("ms"));
        assert_eq!(wire.model, "meta-llama/llama-3.2-3b-instruct");

        let json = serde_json::to_string(&wire).unwrap();
        assert!(json.contains("\"processingTime\""));
        assert!(json.contains("\"totalTokens\":30"));
        assert!(json.contains("\"timestamp\""));
    }
}
