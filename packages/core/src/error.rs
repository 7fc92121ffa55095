// ABOUTME: Error types for the core package
// ABOUTME: Defines specification invariant violations surfaced to callers

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpecError {
    #[error("Specification has no resources; at least one is required to generate")]
    NoResources,

    #[error("Resource '{0}' has no fields")]
    EmptyResource(String),

    #[error("Invalid project name: {0}")]
    InvalidProjectName(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SpecError>;
