// ABOUTME: Error types for the artifacts package
// ABOUTME: One diagnosis variant per way an output path can be rejected

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("No file extension detected in '{0}'; directories are not written through this API")]
    NoExtension(String),

    #[error("'{0}' is at root level; files must live in a subdirectory such as backend/ or frontend/")]
    RootLevel(String),

    #[error("Path traversal attempt detected in '{0}'; paths must stay inside the output root")]
    OutsideRoot(String),

    #[error("Wrong kind for '{path}': expected a {expected} file")]
    WrongKind { path: String, expected: String },

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ArtifactError>;
