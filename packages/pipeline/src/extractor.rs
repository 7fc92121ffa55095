// ABOUTME: Specification extractor converting free text into a validated Project Specification
// ABOUTME: Total by construction; every failure path lands on the keyword fallback

use std::sync::Arc;

use tracing::{error, info, warn};

use stackforge_ai::TextGenerator;
use stackforge_core::constants::{
    DEFAULT_PROJECT_NAME, DEFAULT_RESOURCE_NAME, FALLBACK_DESCRIPTION_LIMIT,
    FALLBACK_RESOURCE_KEYWORDS,
};
use stackforge_core::{
    Field, FieldType, ProjectSpecification, Resource, SpecDraft, TechPreferences,
};

use crate::prompts;
use crate::response::strip_code_fences;

/// Extracts a Project Specification from a natural-language description.
///
/// Never fails: collaborator errors and malformed output both resolve to the
/// keyword fallback, so callers always receive a specification satisfying the
/// model invariants.
pub struct SpecExtractor {
    generator: Arc<dyn TextGenerator>,
    keywords: Vec<String>,
}

impl SpecExtractor {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            keywords: FALLBACK_RESOURCE_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }

    /// Replaces the fallback keyword list. The defaults are heuristic, not a
    /// contract; domain-specific callers can supply their own.
    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    /// Converts a description into a validated specification.
    pub async fn extract(&self, description: &str) -> ProjectSpecification {
        info!("Analyzing project description");

        let prompt = prompts::extraction_prompt(description);
        let response = match self.generator.complete(&prompt).await {
            Ok(text) => text,
            Err(err) => {
                error!("Extraction failed: {}", err);
                return self.fallback_spec(description);
            }
        };

        match self.parse_spec(&response) {
            Some(spec) if !spec.resources.is_empty() => {
                info!(
                    project = %spec.project_name,
                    resources = spec.resources.len(),
                    features = spec.features.len(),
                    "Project analysis complete"
                );
                spec
            }
            Some(_) => {
                warn!("Extraction returned no resources; using fallback specification");
                self.fallback_spec(description)
            }
            None => {
                error!("Failed to parse collaborator response as a specification");
                self.fallback_spec(description)
            }
        }
    }

    /// Refines an existing specification from user feedback. Refinement
    /// failure is non-fatal: the caller's current specification comes back
    /// unmodified.
    pub async fn refine(
        &self,
        spec: &ProjectSpecification,
        feedback: &str,
    ) -> ProjectSpecification {
        info!("Refining specification based on feedback");

        let spec_json = match serde_json::to_string_pretty(spec) {
            Ok(json) => json,
            Err(err) => {
                error!("Failed to serialize specification: {}", err);
                return spec.clone();
            }
        };

        let prompt = prompts::refinement_prompt(&spec_json, feedback);
        match self.generator.complete(&prompt).await {
            Ok(response) => match self.parse_spec(&response) {
                Some(refined) if !refined.resources.is_empty() => {
                    info!("Specification refined successfully");
                    refined
                }
                _ => {
                    warn!("Refinement produced an unusable specification; keeping original");
                    spec.clone()
                }
            },
            Err(err) => {
                error!("Refinement failed: {}; returning original specification", err);
                spec.clone()
            }
        }
    }

    fn parse_spec(&self, response: &str) -> Option<ProjectSpecification> {
        let text = strip_code_fences(response);
        match serde_json::from_str::<SpecDraft>(text) {
            Ok(draft) => Some(draft.into_validated()),
            Err(err) => {
                warn!("Specification JSON did not parse: {}", err);
                None
            }
        }
    }

    /// Deterministic fallback when extraction fails: match known
    /// resource-type keywords against the description, defaulting to a
    /// generic Item resource.
    pub fn fallback_spec(&self, description: &str) -> ProjectSpecification {
        warn!("Creating fallback specification due to analysis failure");

        let lowered = description.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        let resource_name = self
            .keywords
            .iter()
            .find(|keyword| {
                let k = keyword.to_lowercase();
                words
                    .iter()
                    .any(|w| *w == k || w.strip_suffix('s') == Some(k.as_str()))
            })
            .map(|keyword| {
                let mut chars = keyword.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                    None => DEFAULT_RESOURCE_NAME.to_string(),
                }
            })
            .unwrap_or_else(|| DEFAULT_RESOURCE_NAME.to_string());

        let description_snippet: String =
            description.chars().take(FALLBACK_DESCRIPTION_LIMIT).collect();

        ProjectSpecification {
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            description: description_snippet,
            resources: vec![Resource::new(
                resource_name,
                vec![
                    Field::new("id", FieldType::Int),
                    Field::new("name", FieldType::Str),
                    Field::new("description", FieldType::Str),
                    Field::new("created_at", FieldType::Date),
                ],
            )],
            features: vec!["CRUD operations".to_string()],
            tech_preferences: TechPreferences::default(),
            include_tests: true,
            include_docker: true,
            add_database: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use stackforge_ai::{CompletionError, CompletionResult};

    struct CannedGenerator(CompletionResult<String>);

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn complete(&self, _task: &str) -> CompletionResult<String> {
            match &self.0 {
                Ok(text) => Ok(text.clone()),
                Err(_) => Err(CompletionError::ApiError("down".to_string())),
            }
        }
    }

    fn extractor(result: CompletionResult<String>) -> SpecExtractor {
        SpecExtractor::new(Arc::new(CannedGenerator(result)))
    }

    #[tokio::test]
    async fn test_fallback_matches_keyword() {
        let extractor = extractor(Err(CompletionError::ApiError("down".to_string())));
        let spec = extractor
            .extract("an app where users write posts about their day")
            .await;
        // "users" appears before "posts" in the keyword list
        assert_eq!(spec.resources[0].name, "User");
        assert_eq!(spec.resources[0].fields.len(), 4);
        assert!(spec.ensure_valid().is_ok());
    }

    #[tokio::test]
    async fn test_fallback_defaults_to_item() {
        let extractor = extractor(Err(CompletionError::ApiError("down".to_string())));
        let spec = extractor.extract("something inscrutable").await;
        assert_eq!(spec.resources[0].name, "Item");
    }

    #[tokio::test]
    async fn test_garbage_response_falls_back() {
        let extractor = extractor(Ok("absolutely not json".to_string()));
        let spec = extractor.extract("manage tasks").await;
        assert_eq!(spec.resources[0].name, "Task");
        assert!(spec.ensure_valid().is_ok());
    }

    #[tokio::test]
    async fn test_custom_keywords_are_used() {
        let generator: Arc<dyn TextGenerator> = Arc::new(CannedGenerator(Err(
            CompletionError::ApiError("down".to_string()),
        )));
        let extractor = SpecExtractor::new(generator).with_keywords(vec!["recipe".to_string()]);
        let spec = extractor.extract("store my favourite recipes").await;
        assert_eq!(spec.resources[0].name, "Recipe");
    }

    #[tokio::test]
    async fn test_valid_response_is_parsed() {
        let response = r#"```json
{
  "project_name": "Blog Platform",
  "description": "a blog",
  "resources": [{"name": "post", "fields": [{"name": "title", "type": "string"}]}],
  "features": ["posting"],
  "include_docker": false
}
```"#;
        let extractor = extractor(Ok(response.to_string()));
        let spec = extractor.extract("blog").await;
        assert_eq!(spec.project_name, "blog-platform");
        assert_eq!(spec.resources[0].name, "Post");
        assert!(!spec.include_docker);
        assert!(spec.include_tests);
    }

    #[tokio::test]
    async fn test_refine_failure_returns_input_unchanged() {
        let extractor = extractor(Err(CompletionError::ApiError("down".to_string())));
        let original = extractor.fallback_spec("track tasks");
        let refined = extractor.refine(&original, "add a due date").await;
        assert_eq!(refined, original);
    }
}
