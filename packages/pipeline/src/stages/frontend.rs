// ABOUTME: Frontend stage generator producing the UI client layer
// ABOUTME: Fresh generation plus incremental form, routing, and styling capabilities

use std::sync::Arc;

use tracing::info;

use stackforge_ai::TextGenerator;
use stackforge_artifacts::ArtifactStore;
use stackforge_core::{Field, Resource};

use crate::error::Result;
use crate::prompts;
use crate::stages::{run_task, StagePayload};

const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Generates the UI client against the backend's endpoint naming.
pub struct FrontendStage {
    generator: Arc<dyn TextGenerator>,
    store: Arc<ArtifactStore>,
}

impl FrontendStage {
    pub fn new(generator: Arc<dyn TextGenerator>, store: Arc<ArtifactStore>) -> Self {
        Self { generator, store }
    }

    /// Generates the frontend file set. The resource must match the backend
    /// so endpoint paths line up.
    pub async fn generate(&self, project_name: &str, resource: &Resource) -> Result<StagePayload> {
        info!(project = project_name, resource = %resource.name, "Generating frontend");
        let task = prompts::frontend_task(project_name, resource, DEFAULT_API_URL);
        let payload = run_task(&self.generator, &self.store, &task).await?;
        info!("Frontend generation complete");
        Ok(payload)
    }

    /// Adds a create/edit form for the resource.
    pub async fn add_form(
        &self,
        project_path: &str,
        resource_name: &str,
        fields: &[Field],
    ) -> Result<StagePayload> {
        info!(project_path, resource_name, "Adding form component");
        let task = prompts::form_task(project_path, resource_name, fields);
        run_task(&self.generator, &self.store, &task).await
    }

    /// Adds client-side routing.
    pub async fn add_routing(&self, project_path: &str) -> Result<StagePayload> {
        info!(project_path, "Adding routing");
        let task = prompts::routing_task(project_path);
        run_task(&self.generator, &self.store, &task).await
    }

    /// Restyles the client, optionally with a CSS framework.
    pub async fn improve_styling(
        &self,
        project_path: &str,
        framework: &str,
    ) -> Result<StagePayload> {
        info!(project_path, framework, "Improving styling");
        let task = prompts::styling_task(project_path, framework);
        run_task(&self.generator, &self.store, &task).await
    }
}
