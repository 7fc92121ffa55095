// ABOUTME: Stage generators for each layer of the generated application
// ABOUTME: All stages share one collaborator handle and one artifact store

use std::sync::Arc;

use stackforge_ai::TextGenerator;
use stackforge_artifacts::{ArtifactStore, WriteSummary};

use crate::error::Result;
use crate::response::parse_artifact_list;

pub mod backend;
pub mod deploy;
pub mod frontend;
pub mod tests;

pub use backend::BackendStage;
pub use deploy::DeployStage;
pub use frontend::FrontendStage;
pub use tests::TestStage;

/// Runs one generation task end to end: collaborator completion, artifact
/// list decoding, and a batch write through the store. Returns the payload a
/// stage reports on success. Per-file write failures stay inside the summary;
/// only collaborator or decode failures propagate as stage errors.
pub(crate) async fn run_task(
    generator: &Arc<dyn TextGenerator>,
    store: &Arc<ArtifactStore>,
    task: &str,
) -> Result<StagePayload> {
    let response = generator.complete(task).await?;
    let artifacts = parse_artifact_list(&response)?;
    let summary = store.write_many(&artifacts);
    Ok(StagePayload { summary })
}

/// Opaque description of what a stage produced.
#[derive(Debug, Clone)]
pub struct StagePayload {
    pub summary: WriteSummary,
}

impl StagePayload {
    pub fn describe(&self) -> String {
        if self.summary.created.is_empty() {
            format!("no files written ({})", self.summary.describe())
        } else {
            format!(
                "wrote {}: {}",
                self.summary.describe(),
                self.summary.created.join(", ")
            )
        }
    }
}
