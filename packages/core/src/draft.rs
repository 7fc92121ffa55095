// ABOUTME: Lenient draft types mirroring collaborator JSON output
// ABOUTME: Totalizing conversion into a valid ProjectSpecification; cannot fail

use serde::Deserialize;
use tracing::warn;

use crate::constants::DEFAULT_PROJECT_NAME;
use crate::types::{
    BackendFramework, DatabaseKind, Field, FieldType, FrontendFramework, ProjectSpecification,
    Resource, TechPreferences,
};
use crate::validation::{to_kebab_case, to_pascal_case};

/// Field as the collaborator may emit it: anything can be missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub field_type: Option<String>,
}

/// Resource as the collaborator may emit it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDraft>,
}

/// Tech preferences as loose strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TechPreferencesDraft {
    #[serde(default)]
    pub backend: Option<String>,
    #[serde(default)]
    pub frontend: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
}

/// Project specification as parsed from possibly-malformed collaborator
/// output. Every slot is optional; `into_validated` supplies defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpecDraft {
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub resources: Vec<ResourceDraft>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub tech_preferences: Option<TechPreferencesDraft>,
    #[serde(default)]
    pub include_tests: Option<bool>,
    #[serde(default)]
    pub include_docker: Option<bool>,
    #[serde(default)]
    pub add_database: Option<bool>,
}

impl FieldDraft {
    fn into_validated(self) -> Field {
        let name = match self.name {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => {
                warn!("Field without a name in collaborator output; using placeholder");
                "unknown".to_string()
            }
        };
        let field_type = self
            .field_type
            .map(|raw| FieldType::parse_lenient(&raw))
            .unwrap_or_default();
        Field { name, field_type }
    }
}

impl ResourceDraft {
    fn into_validated(self) -> Resource {
        let name = {
            let pascal = to_pascal_case(self.name.as_deref().unwrap_or(""));
            if pascal.is_empty() {
                "Item".to_string()
            } else {
                pascal
            }
        };
        let mut fields: Vec<Field> = self
            .fields
            .into_iter()
            .map(FieldDraft::into_validated)
            .collect();
        if fields.is_empty() {
            warn!(resource = %name, "Resource declared without fields; injecting defaults");
            fields = Resource::default_fields();
        }
        Resource { name, fields }
    }
}

impl SpecDraft {
    /// Applies every defaulting rule and returns a specification that always
    /// satisfies the invariants checked by `ProjectSpecification::ensure_valid`
    /// except resource presence, which the caller decides how to handle (the
    /// extractor substitutes its fallback; manual callers get a typed error
    /// from the orchestrator precondition).
    pub fn into_validated(self) -> ProjectSpecification {
        let project_name = {
            let kebab = to_kebab_case(self.project_name.as_deref().unwrap_or(""));
            if kebab.is_empty() {
                DEFAULT_PROJECT_NAME.to_string()
            } else {
                kebab
            }
        };

        let tech_preferences = self
            .tech_preferences
            .map(|draft| TechPreferences {
                backend: draft
                    .backend
                    .map(|raw| BackendFramework::parse_lenient(&raw))
                    .unwrap_or_default(),
                frontend: draft
                    .frontend
                    .map(|raw| FrontendFramework::parse_lenient(&raw))
                    .unwrap_or_default(),
                database: draft
                    .database
                    .map(|raw| DatabaseKind::parse_lenient(&raw))
                    .unwrap_or_default(),
            })
            .unwrap_or_default();

        ProjectSpecification {
            project_name,
            description: self.description.unwrap_or_default(),
            resources: self
                .resources
                .into_iter()
                .map(ResourceDraft::into_validated)
                .collect(),
            features: self.features,
            tech_preferences,
            include_tests: self.include_tests.unwrap_or(true),
            include_docker: self.include_docker.unwrap_or(true),
            add_database: self.add_database.unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_draft_gets_all_defaults() {
        let spec = SpecDraft::default().into_validated();
        assert_eq!(spec.project_name, DEFAULT_PROJECT_NAME);
        assert!(spec.resources.is_empty());
        assert!(spec.include_tests);
        assert!(spec.include_docker);
        assert!(!spec.add_database);
        assert_eq!(spec.tech_preferences, TechPreferences::default());
    }

    #[test]
    fn test_fieldless_resource_is_auto_populated() {
        let draft: SpecDraft = serde_json::from_str(
            r#"{"project_name": "shop", "resources": [{"name": "Order"}]}"#,
        )
        .unwrap();
        let spec = draft.into_validated();
        assert_eq!(spec.resources[0].fields, Resource::default_fields());
    }

    #[test]
    fn test_field_defaults_applied() {
        let draft: SpecDraft = serde_json::from_str(
            r#"{
                "resources": [{
                    "name": "post",
                    "fields": [
                        {"type": "int"},
                        {"name": "title"},
                        {"name": "price", "type": "currency"}
                    ]
                }]
            }"#,
        )
        .unwrap();
        let spec = draft.into_validated();
        let fields = &spec.resources[0].fields;
        assert_eq!(spec.resources[0].name, "Post");
        assert_eq!(fields[0].name, "unknown");
        assert_eq!(fields[0].field_type, FieldType::Int);
        assert_eq!(fields[1].field_type, FieldType::Str);
        assert_eq!(fields[2].field_type, FieldType::Str);
    }

    #[test]
    fn test_tech_preferences_parsed_leniently() {
        let draft: SpecDraft = serde_json::from_str(
            r#"{"tech_preferences": {"backend": "Flask", "database": "postgres"}}"#,
        )
        .unwrap();
        let spec = draft.into_validated();
        assert_eq!(spec.tech_preferences.backend, BackendFramework::Flask);
        assert_eq!(spec.tech_preferences.frontend, FrontendFramework::React);
        assert_eq!(spec.tech_preferences.database, DatabaseKind::Postgresql);
    }

    #[test]
    fn test_unknown_json_keys_are_ignored() {
        let draft: SpecDraft = serde_json::from_str(
            r#"{"project_name": "x", "confidence": 0.9, "resources": []}"#,
        )
        .unwrap();
        assert_eq!(draft.project_name.as_deref(), Some("x"));
    }
}
