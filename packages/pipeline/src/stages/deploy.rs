// ABOUTME: Deployment stage generator producing container and orchestration config
// ABOUTME: The only stage allowed to place files at the output root

use std::sync::Arc;

use tracing::info;

use stackforge_ai::TextGenerator;
use stackforge_artifacts::ArtifactStore;
use stackforge_core::DatabaseKind;

use crate::error::Result;
use crate::prompts;
use crate::stages::{run_task, StagePayload};

/// Generates deployment configuration tying the other layers together.
pub struct DeployStage {
    generator: Arc<dyn TextGenerator>,
    store: Arc<ArtifactStore>,
}

impl DeployStage {
    pub fn new(generator: Arc<dyn TextGenerator>, store: Arc<ArtifactStore>) -> Self {
        Self { generator, store }
    }

    /// Generates docker-compose.yml, README.md, and .gitignore at the root.
    pub async fn generate_compose(
        &self,
        project_name: &str,
        has_database: bool,
        db_kind: DatabaseKind,
    ) -> Result<StagePayload> {
        info!(project = project_name, has_database, "Generating deployment configuration");
        let task = prompts::compose_task(project_name, has_database, db_kind.as_str());
        let payload = run_task(&self.generator, &self.store, &task).await?;
        info!("Deployment configuration complete");
        Ok(payload)
    }

    /// Adds a database service to an existing compose file.
    pub async fn add_database_service(
        &self,
        project_path: &str,
        db_type: &str,
    ) -> Result<StagePayload> {
        info!(project_path, db_type, "Adding database service");
        let task = prompts::database_service_task(project_path, db_type);
        run_task(&self.generator, &self.store, &task).await
    }

    /// Adds an nginx reverse proxy in front of both layers.
    pub async fn add_nginx_reverse_proxy(&self, project_path: &str) -> Result<StagePayload> {
        info!(project_path, "Adding nginx reverse proxy");
        let task = prompts::nginx_task(project_path);
        run_task(&self.generator, &self.store, &task).await
    }

    /// Generates Kubernetes manifests for the stack.
    pub async fn generate_k8s_config(&self, project_name: &str) -> Result<StagePayload> {
        info!(project = project_name, "Generating Kubernetes configuration");
        let task = prompts::k8s_task(project_name);
        run_task(&self.generator, &self.store, &task).await
    }
}
