// ABOUTME: Text-generation collaborator integration for Stackforge
// ABOUTME: Anthropic API client and the TextGenerator trait stages depend on

pub mod anthropic;
pub mod generator;

// Re-export client types
pub use anthropic::{AnthropicGenerator, Usage};

// Re-export the collaborator trait
pub use generator::{CompletionError, CompletionResult, TextGenerator};
