// ABOUTME: Tagged dispatch surface for incremental-capability extensions
// ABOUTME: String tags parse into an exhaustive enum; unknown tags are typed errors

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use stackforge_core::Field;

use crate::error::PipelineError;

/// One incremental capability an existing output tree can be extended with.
/// Each variant maps to exactly one stage generator method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtensionKind {
    /// JWT authentication on the backend.
    Auth,
    /// Database integration on the backend.
    Database,
    /// A create/edit form on the frontend.
    Form,
    /// Client-side routing on the frontend.
    Routing,
    /// Nginx reverse proxy in the deployment.
    Nginx,
    /// Kubernetes manifests for the stack.
    K8s,
    /// Coverage configuration for both test suites.
    Coverage,
}

impl FromStr for ExtensionKind {
    type Err = PipelineError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "auth" => Ok(ExtensionKind::Auth),
            "database" => Ok(ExtensionKind::Database),
            "form" => Ok(ExtensionKind::Form),
            "routing" => Ok(ExtensionKind::Routing),
            "nginx" => Ok(ExtensionKind::Nginx),
            "k8s" => Ok(ExtensionKind::K8s),
            "coverage" => Ok(ExtensionKind::Coverage),
            other => Err(PipelineError::UnknownExtension(other.to_string())),
        }
    }
}

/// Optional arguments consumed by individual extension kinds. Unused slots
/// are ignored by the dispatched handler.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtensionArgs {
    /// Database flavor for `database` (defaults to sqlite).
    pub db_type: Option<String>,
    /// Resource the `form` extension edits.
    pub resource_name: Option<String>,
    /// Fields the `form` extension renders.
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Project name for `k8s` manifests.
    pub project_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tags_parse() {
        assert_eq!("auth".parse::<ExtensionKind>().unwrap(), ExtensionKind::Auth);
        assert_eq!("K8S".parse::<ExtensionKind>().unwrap(), ExtensionKind::K8s);
        assert_eq!(
            " coverage ".parse::<ExtensionKind>().unwrap(),
            ExtensionKind::Coverage
        );
    }

    #[test]
    fn test_unknown_tag_is_typed_error() {
        let err = "graphql".parse::<ExtensionKind>().unwrap_err();
        assert!(matches!(err, PipelineError::UnknownExtension(tag) if tag == "graphql"));
    }
}
