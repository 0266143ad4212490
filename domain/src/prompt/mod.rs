//! Prompt templates for the calculation, dispute and supervisor stages

pub mod template;

pub use template::PromptTemplate;
