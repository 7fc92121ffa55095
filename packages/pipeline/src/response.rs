// ABOUTME: Defensive parsing of collaborator output before structural interpretation
// ABOUTME: Strips formatting wrappers and decodes artifact lists leniently

use serde::Deserialize;

use stackforge_artifacts::Artifact;

use crate::error::{PipelineError, Result};

/// Strips markdown code fences if present (```json ... ``` and variants).
pub fn strip_code_fences(raw: &str) -> &str {
    let cleaned = raw.trim();
    if !cleaned.starts_with("```") {
        return cleaned;
    }
    // Skip the opening fence line, then drop the closing fence.
    let start = cleaned.find('\n').map(|i| i + 1).unwrap_or(0);
    let end = cleaned[start..]
        .rfind("```")
        .map(|i| i + start)
        .unwrap_or(cleaned.len());
    cleaned[start..end].trim()
}

#[derive(Deserialize)]
struct WrappedArtifacts {
    files: Vec<Artifact>,
}

/// Decodes the artifact list a stage task asks the collaborator to emit.
/// Accepts either a bare JSON array or an object with a `files` key.
pub fn parse_artifact_list(raw: &str) -> Result<Vec<Artifact>> {
    let text = strip_code_fences(raw);

    if let Ok(artifacts) = serde_json::from_str::<Vec<Artifact>>(text) {
        return Ok(artifacts);
    }
    if let Ok(wrapped) = serde_json::from_str::<WrappedArtifacts>(text) {
        return Ok(wrapped.files);
    }

    Err(PipelineError::MalformedArtifactList(
        text.chars().take(200).collect(),
    ))
}
