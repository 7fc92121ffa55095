// ABOUTME: Sandboxed artifact writer for Stackforge
// ABOUTME: Validated file operations against one configured output root

pub mod error;
pub mod store;

// Re-export store types
pub use store::{
    Artifact, ArtifactStore, FailedWrite, PathCheck, PathKind, PathWarning, WriteSummary,
};

// Re-export errors
pub use error::{ArtifactError, Result};
