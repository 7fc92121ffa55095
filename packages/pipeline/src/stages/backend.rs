// ABOUTME: Backend stage generator producing the API service layer
// ABOUTME: Fresh generation plus incremental auth and database capabilities

use std::sync::Arc;

use tracing::info;

use stackforge_ai::TextGenerator;
use stackforge_artifacts::ArtifactStore;
use stackforge_core::Resource;

use crate::error::Result;
use crate::prompts;
use crate::stages::{run_task, StagePayload};

/// Generates the API service for the main resource. Stateless across calls.
pub struct BackendStage {
    generator: Arc<dyn TextGenerator>,
    store: Arc<ArtifactStore>,
}

impl BackendStage {
    pub fn new(generator: Arc<dyn TextGenerator>, store: Arc<ArtifactStore>) -> Self {
        Self { generator, store }
    }

    /// Generates the backend file set for a fresh project.
    pub async fn generate(&self, project_name: &str, resource: &Resource) -> Result<StagePayload> {
        info!(project = project_name, resource = %resource.name, "Generating backend");
        let task = prompts::backend_task(project_name, resource);
        let payload = run_task(&self.generator, &self.store, &task).await?;
        info!("Backend generation complete");
        Ok(payload)
    }

    /// Adds JWT authentication to an existing backend tree.
    pub async fn add_authentication(&self, project_path: &str) -> Result<StagePayload> {
        info!(project_path, "Adding authentication");
        let task = prompts::auth_task(project_path);
        run_task(&self.generator, &self.store, &task).await
    }

    /// Adds database integration to an existing backend tree.
    pub async fn add_database(&self, project_path: &str, db_type: &str) -> Result<StagePayload> {
        info!(project_path, db_type, "Adding database integration");
        let task = prompts::database_task(project_path, db_type);
        run_task(&self.generator, &self.store, &task).await
    }
}
