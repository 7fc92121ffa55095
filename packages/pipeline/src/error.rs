// ABOUTME: Error types for the pipeline package
// ABOUTME: Stage failures are contained per stage; only preconditions abort a run

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Collaborator error: {0}")]
    Completion(#[from] stackforge_ai::CompletionError),

    #[error("Artifact error: {0}")]
    Artifact(#[from] stackforge_artifacts::ArtifactError),

    #[error("Specification error: {0}")]
    Spec(#[from] stackforge_core::SpecError),

    #[error("Collaborator returned a malformed artifact list: {0}")]
    MalformedArtifactList(String),

    #[error("Unknown extension type: {0}")]
    UnknownExtension(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
