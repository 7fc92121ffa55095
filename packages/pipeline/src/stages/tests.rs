// ABOUTME: Test stage generator producing backend and frontend test suites
// ABOUTME: Incremental capabilities for coverage config and integration tests

use std::sync::Arc;

use tracing::info;

use stackforge_ai::TextGenerator;
use stackforge_artifacts::ArtifactStore;
use stackforge_core::Resource;

use crate::error::Result;
use crate::prompts;
use crate::stages::{run_task, StagePayload};

/// Generates test suites for layers produced by earlier stages.
pub struct TestStage {
    generator: Arc<dyn TextGenerator>,
    store: Arc<ArtifactStore>,
}

impl TestStage {
    pub fn new(generator: Arc<dyn TextGenerator>, store: Arc<ArtifactStore>) -> Self {
        Self { generator, store }
    }

    /// Generates pytest tests for the backend's CRUD endpoints.
    pub async fn generate_backend_tests(
        &self,
        project_name: &str,
        resource: &Resource,
        endpoints: &[String],
    ) -> Result<StagePayload> {
        info!(project = project_name, "Generating backend tests");
        let task = prompts::backend_tests_task(project_name, resource, endpoints);
        run_task(&self.generator, &self.store, &task).await
    }

    /// Generates component tests for the frontend.
    pub async fn generate_frontend_tests(
        &self,
        project_name: &str,
        components: &[String],
    ) -> Result<StagePayload> {
        info!(project = project_name, "Generating frontend tests");
        let task = prompts::frontend_tests_task(project_name, components);
        run_task(&self.generator, &self.store, &task).await
    }

    /// Generates end-to-end workflow tests against the running stack.
    pub async fn generate_integration_tests(&self, project_name: &str) -> Result<StagePayload> {
        info!(project = project_name, "Generating integration tests");
        let task = prompts::integration_tests_task(project_name);
        run_task(&self.generator, &self.store, &task).await
    }

    /// Adds coverage configuration to both layers.
    pub async fn add_coverage_config(&self, project_path: &str) -> Result<StagePayload> {
        info!(project_path, "Adding coverage configuration");
        let task = prompts::coverage_task(project_path);
        run_task(&self.generator, &self.store, &task).await
    }
}
