// ABOUTME: The Project Specification data model and its validation invariants
// ABOUTME: Immutable after construction; every generation run reads exactly one of these

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PROJECT_NAME, DEFAULT_RESOURCE_NAME};
use crate::error::{Result, SpecError};
use crate::validation::{to_kebab_case, to_pascal_case};

/// Primitive types a generated resource field can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Str,
    Int,
    Float,
    Bool,
    Date,
}

impl FieldType {
    /// Lenient parse used when ingesting collaborator output. Unrecognized
    /// spellings default to `Str` rather than failing.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "str" | "string" | "text" => FieldType::Str,
            "int" | "integer" => FieldType::Int,
            "float" | "number" | "double" => FieldType::Float,
            "bool" | "boolean" => FieldType::Bool,
            "date" | "datetime" | "timestamp" => FieldType::Date,
            _ => FieldType::Str,
        }
    }

    /// Wire spelling used in prompts and generated code.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Str => "str",
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Bool => "bool",
            FieldType::Date => "date",
        }
    }
}

/// One field on a generated resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// One data entity the generated application manages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// PascalCase singular identifier, e.g. "Post".
    pub name: String,
    /// Never empty after validation.
    pub fields: Vec<Field>,
}

impl Resource {
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Default fields injected when a resource arrives with none declared.
    pub fn default_fields() -> Vec<Field> {
        vec![
            Field::new("id", FieldType::Int),
            Field::new("created_at", FieldType::Date),
        ]
    }

    /// Plural, lowercase form used for endpoint paths ("Post" -> "posts").
    pub fn endpoint_name(&self) -> String {
        format!("{}s", self.name.to_lowercase())
    }
}

/// Backend framework preference for the generated service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendFramework {
    #[default]
    Fastapi,
    Django,
    Flask,
}

/// Frontend framework preference for the generated client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FrontendFramework {
    #[default]
    React,
    Vue,
    Angular,
}

/// Database preference for the generated stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseKind {
    #[default]
    Sqlite,
    Postgresql,
    Mongodb,
    None,
}

impl BackendFramework {
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "django" => BackendFramework::Django,
            "flask" => BackendFramework::Flask,
            _ => BackendFramework::Fastapi,
        }
    }
}

impl FrontendFramework {
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "vue" => FrontendFramework::Vue,
            "angular" => FrontendFramework::Angular,
            _ => FrontendFramework::React,
        }
    }
}

impl DatabaseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseKind::Sqlite => "sqlite",
            DatabaseKind::Postgresql => "postgresql",
            DatabaseKind::Mongodb => "mongodb",
            DatabaseKind::None => "none",
        }
    }

    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "postgresql" | "postgres" => DatabaseKind::Postgresql,
            "mongodb" | "mongo" => DatabaseKind::Mongodb,
            "none" => DatabaseKind::None,
            _ => DatabaseKind::Sqlite,
        }
    }
}

/// Technology preferences for the generated stack, defaulted when absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TechPreferences {
    #[serde(default)]
    pub backend: BackendFramework,
    #[serde(default)]
    pub frontend: FrontendFramework,
    #[serde(default)]
    pub database: DatabaseKind,
}

/// The validated structured description of the application to generate.
///
/// Produced once per run by the extractor (or its fallback) and read-only
/// thereafter. Invariants: `resources` is non-empty for generation to
/// proceed, every resource has at least one field, and every field carries
/// both a name and a type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSpecification {
    pub project_name: String,
    pub description: String,
    pub resources: Vec<Resource>,
    pub features: Vec<String>,
    pub tech_preferences: TechPreferences,
    pub include_tests: bool,
    pub include_docker: bool,
    pub add_database: bool,
}

impl ProjectSpecification {
    /// Checks the invariants generation depends on. The extractor guarantees
    /// these hold for anything it returns; this is the seam for callers that
    /// build specifications by hand.
    pub fn ensure_valid(&self) -> Result<()> {
        if self.project_name.trim().is_empty() {
            return Err(SpecError::InvalidProjectName("(empty)".to_string()));
        }
        if self.resources.is_empty() {
            return Err(SpecError::NoResources);
        }
        for resource in &self.resources {
            if resource.fields.is_empty() {
                return Err(SpecError::EmptyResource(resource.name.clone()));
            }
        }
        Ok(())
    }

    /// The first resource drives endpoint naming in generated layers.
    pub fn main_resource(&self) -> Option<&Resource> {
        self.resources.first()
    }
}

/// Structured manual-mode request. Converges on the same
/// `ProjectSpecification` shape the autonomous path produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaffoldRequest {
    pub project_name: String,
    pub resource_name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default = "default_true")]
    pub include_tests: bool,
    #[serde(default = "default_true")]
    pub include_docker: bool,
    #[serde(default)]
    pub add_database: bool,
}

fn default_true() -> bool {
    true
}

impl From<ScaffoldRequest> for ProjectSpecification {
    fn from(request: ScaffoldRequest) -> Self {
        let project_name = {
            let kebab = to_kebab_case(&request.project_name);
            if kebab.is_empty() {
                DEFAULT_PROJECT_NAME.to_string()
            } else {
                kebab
            }
        };
        let resource_name = {
            let pascal = to_pascal_case(&request.resource_name);
            if pascal.is_empty() {
                DEFAULT_RESOURCE_NAME.to_string()
            } else {
                pascal
            }
        };
        let fields = if request.fields.is_empty() {
            Resource::default_fields()
        } else {
            request.fields
        };

        ProjectSpecification {
            project_name,
            description: String::new(),
            resources: vec![Resource::new(resource_name, fields)],
            features: Vec::new(),
            tech_preferences: TechPreferences::default(),
            include_tests: request.include_tests,
            include_docker: request.include_docker,
            add_database: request.add_database,
        }
    }
}
