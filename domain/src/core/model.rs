//! Model value object representing an upstream LLM model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Upstream completion models (Value Object)
///
/// Reviewer authority escalates through model tiers: routine calculations run
/// on the small instruct tier, higher supervisor levels and the council
/// verdict run on the large tier, and safety classification uses the
/// dedicated guard model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    /// Small instruct tier used for first-pass calculation and disputes
    Llama32Instruct3B,
    /// Mid instruct tier used for level-1 review and council statements
    Llama31Instruct8B,
    /// Large instruct tier used for senior reviews and the council verdict
    Llama33Instruct70B,
    /// Safety classification model
    LlamaGuard3_8B,
    /// Any other model identifier passed through verbatim
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Llama32Instruct3B => "meta-llama/llama-3.2-3b-instruct",
            Model::Llama31Instruct8B => "meta-llama/llama-3.1-8b-instruct",
            Model::Llama33Instruct70B => "meta-llama/llama-3.3-70b-instruct",
            Model::LlamaGuard3_8B => "meta-llama/llama-guard-3-8b",
            Model::Custom(s) => s,
        }
    }

    /// Check if this is the safety classification model
    pub fn is_guard(&self) -> bool {
        matches!(self, Model::LlamaGuard3_8B)
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "meta-llama/llama-3.2-3b-instruct" => Model::Llama32Instruct3B,
            "meta-llama/llama-3.1-8b-instruct" => Model::Llama31Instruct8B,
            "meta-llama/llama-3.3-70b-instruct" => Model::Llama33Instruct70B,
            "meta-llama/llama-guard-3-8b" => Model::LlamaGuard3_8B,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().expect("model parsing is infallible"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_round_trip() {
        let model: Model = "meta-llama/llama-3.3-70b-instruct".parse().unwrap();
        assert_eq!(model, Model::Llama33Instruct70B);
        assert_eq!(model.as_str(), "meta-llama/llama-3.3-70b-instruct");
    }

    #[test]
    fn test_unknown_model_is_custom() {
        let model: Model = "mistralai/mistral-7b".parse().unwrap();
        assert_eq!(model, Model::Custom("mistralai/mistral-7b".to_string()));
        assert_eq!(model.as_str(), "mistralai/mistral-7b");
    }

    #[test]
    fn test_model_serde_as_string() {
        let json = serde_json::to_string(&Model::LlamaGuard3_8B).unwrap();
        assert_eq!(json, "\"meta-llama/llama-guard-3-8b\"");

        let back: Model = serde_json::from_str(&json).unwrap();
        assert!(back.is_guard());
    }
}
