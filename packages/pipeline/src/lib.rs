// ABOUTME: Specification extraction and multi-stage generation pipeline
// ABOUTME: Free text in, a populated scaffold tree and a per-stage report out

pub mod config;
pub mod error;
pub mod extension;
pub mod extractor;
pub mod orchestrator;
pub mod prompts;
pub mod response;
pub mod stages;

pub use config::PipelineConfig;
pub use error::{PipelineError, Result};
pub use extension::{ExtensionArgs, ExtensionKind};
pub use extractor::SpecExtractor;
pub use orchestrator::{Orchestrator, PipelineReport, StageName, StageResult};
pub use stages::{BackendStage, DeployStage, FrontendStage, StagePayload, TestStage};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::extension::{ExtensionArgs, ExtensionKind};
    pub use crate::orchestrator::{Orchestrator, PipelineReport, StageName, StageResult};
    pub use crate::SpecExtractor;
    pub use stackforge_ai::{AnthropicGenerator, TextGenerator};
    pub use stackforge_artifacts::ArtifactStore;
    pub use stackforge_core::{ProjectSpecification, ScaffoldRequest};
}
