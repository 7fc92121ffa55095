// ABOUTME: Core types and validation for Stackforge
// ABOUTME: Foundational package providing the Project Specification model shared by all packages

pub mod constants;
pub mod draft;
pub mod error;
pub mod types;
pub mod validation;

// Re-export main types
pub use types::{
    BackendFramework, DatabaseKind, Field, FieldType, FrontendFramework, ProjectSpecification,
    Resource, ScaffoldRequest, TechPreferences,
};

// Re-export draft types
pub use draft::{FieldDraft, ResourceDraft, SpecDraft, TechPreferencesDraft};

// Re-export errors
pub use error::{Result, SpecError};

// Re-export validation helpers
pub use validation::{to_kebab_case, to_pascal_case};
