// ABOUTME: The pipeline orchestrator sequencing generation stages over one specification
// ABOUTME: Per-stage error containment; only the empty-resources precondition aborts a run

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};

use stackforge_ai::TextGenerator;
use stackforge_artifacts::ArtifactStore;
use stackforge_core::{ProjectSpecification, ScaffoldRequest};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::extension::{ExtensionArgs, ExtensionKind};
use crate::extractor::SpecExtractor;
use crate::stages::{BackendStage, DeployStage, FrontendStage, StagePayload, TestStage};

/// Stage identity. `Ord` follows pipeline order, so a `BTreeMap` keyed by
/// stage name iterates in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageName {
    Backend,
    Database,
    Frontend,
    TestsBackend,
    TestsFrontend,
    Docker,
}

impl StageName {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageName::Backend => "backend",
            StageName::Database => "database",
            StageName::Frontend => "frontend",
            StageName::TestsBackend => "tests_backend",
            StageName::TestsFrontend => "tests_frontend",
            StageName::Docker => "docker",
        }
    }
}

impl fmt::Display for StageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Success payload or error record for one stage. Never silently dropped:
/// every stage that runs contributes exactly one entry to the report.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StageResult {
    Success { summary: String },
    Error { message: String },
}

impl StageResult {
    pub fn is_success(&self) -> bool {
        matches!(self, StageResult::Success { .. })
    }
}

/// Final status report for one pipeline run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineReport {
    /// Per-stage outcomes in execution order.
    pub stages: BTreeMap<StageName, StageResult>,
    /// Set only when the run's precondition failed before any stage ran.
    pub run_error: Option<String>,
}

impl PipelineReport {
    pub fn stage(&self, name: StageName) -> Option<&StageResult> {
        self.stages.get(&name)
    }

    pub fn failed_stages(&self) -> Vec<StageName> {
        self.stages
            .iter()
            .filter(|(_, result)| !result.is_success())
            .map(|(name, _)| *name)
            .collect()
    }
}

/// Coordinates the specialized stage generators over one shared collaborator
/// handle and one artifact store.
///
/// Supports two modes: manual (a structured `ScaffoldRequest`) and autonomous
/// (a natural-language description run through the extractor). Both converge
/// on the same `ProjectSpecification` before `run`.
pub struct Orchestrator {
    extractor: SpecExtractor,
    backend: BackendStage,
    frontend: FrontendStage,
    tests: TestStage,
    deploy: DeployStage,
}

impl Orchestrator {
    /// Wires every stage to the same collaborator handle and artifact store.
    /// The handle is fully initialized here, before any stage can run.
    pub fn new(generator: Arc<dyn TextGenerator>, store: Arc<ArtifactStore>) -> Self {
        info!("Initializing generation pipeline with shared collaborator handle");
        Self {
            extractor: SpecExtractor::new(Arc::clone(&generator)),
            backend: BackendStage::new(Arc::clone(&generator), Arc::clone(&store)),
            frontend: FrontendStage::new(Arc::clone(&generator), Arc::clone(&store)),
            tests: TestStage::new(Arc::clone(&generator), Arc::clone(&store)),
            deploy: DeployStage::new(generator, store),
        }
    }

    /// Opens an artifact store from config and wires the pipeline onto it.
    pub fn with_config(
        generator: Arc<dyn TextGenerator>,
        config: &PipelineConfig,
    ) -> Result<Self> {
        let store = Arc::new(ArtifactStore::new(config.output_dir.clone())?);
        Ok(Self::new(generator, store))
    }

    pub fn extractor(&self) -> &SpecExtractor {
        &self.extractor
    }

    /// Autonomous mode: extract a specification from free text, then run.
    pub async fn generate_from_description(&self, description: &str) -> PipelineReport {
        info!("Autonomous mode: analyzing description");
        let spec = self.extractor.extract(description).await;
        self.run(&spec).await
    }

    /// Manual mode: converge the structured request on a specification, then run.
    pub async fn generate(&self, request: ScaffoldRequest) -> PipelineReport {
        let spec = ProjectSpecification::from(request);
        self.run(&spec).await
    }

    /// Runs the fixed stage sequence over a validated specification.
    ///
    /// Stage order: backend, database (optional), frontend, backend tests and
    /// frontend tests (optional), docker (optional). Each stage is
    /// individually contained: a failure is recorded as that stage's result
    /// and the next stage still runs. The only way no stage executes is the
    /// empty-resources precondition.
    pub async fn run(&self, spec: &ProjectSpecification) -> PipelineReport {
        let mut report = PipelineReport::default();

        let resource = match spec.main_resource() {
            Some(resource) => resource.clone(),
            None => {
                error!("No resources in specification; nothing to generate");
                report.run_error =
                    Some("Failed to identify resources from description".to_string());
                return report;
            }
        };

        info!(
            project = %spec.project_name,
            resource = %resource.name,
            "Starting full-stack application generation"
        );

        let outcome = self.backend.generate(&spec.project_name, &resource).await;
        Self::record(&mut report, StageName::Backend, outcome);

        if spec.add_database {
            let outcome = self
                .backend
                .add_database("backend", spec.tech_preferences.database.as_str())
                .await;
            Self::record(&mut report, StageName::Database, outcome);
        }

        let outcome = self.frontend.generate(&spec.project_name, &resource).await;
        Self::record(&mut report, StageName::Frontend, outcome);

        if spec.include_tests {
            let endpoints = vec![
                format!("/{}", resource.endpoint_name()),
                "GET, POST, PUT, DELETE".to_string(),
            ];
            let outcome = self
                .tests
                .generate_backend_tests(&spec.project_name, &resource, &endpoints)
                .await;
            Self::record(&mut report, StageName::TestsBackend, outcome);

            let components = vec!["App".to_string()];
            let outcome = self
                .tests
                .generate_frontend_tests(&spec.project_name, &components)
                .await;
            Self::record(&mut report, StageName::TestsFrontend, outcome);
        }

        if spec.include_docker {
            let outcome = self
                .deploy
                .generate_compose(
                    &spec.project_name,
                    spec.add_database,
                    spec.tech_preferences.database,
                )
                .await;
            Self::record(&mut report, StageName::Docker, outcome);
        }

        let failed = report.failed_stages();
        if failed.is_empty() {
            info!(project = %spec.project_name, "Full-stack application generation complete");
        } else {
            warn!(
                project = %spec.project_name,
                failed = ?failed,
                "Generation finished with stage failures"
            );
        }
        report
    }

    fn record(report: &mut PipelineReport, name: StageName, outcome: Result<StagePayload>) {
        let result = match outcome {
            Ok(payload) => StageResult::Success {
                summary: payload.describe(),
            },
            Err(err) => {
                error!(stage = %name, "Stage failed: {}", err);
                StageResult::Error {
                    message: err.to_string(),
                }
            }
        };
        report.stages.insert(name, result);
    }

    /// Extends an existing output tree with one incremental capability.
    /// Dispatches to exactly one stage generator method per kind.
    pub async fn extend(
        &self,
        project_path: &str,
        kind: ExtensionKind,
        args: ExtensionArgs,
    ) -> Result<String> {
        info!(project_path, ?kind, "Extending application");

        let payload = match kind {
            ExtensionKind::Auth => self.backend.add_authentication(project_path).await?,
            ExtensionKind::Database => {
                let db_type = args.db_type.as_deref().unwrap_or("sqlite");
                self.backend.add_database(project_path, db_type).await?
            }
            ExtensionKind::Form => {
                let resource_name = args.resource_name.as_deref().unwrap_or("Item");
                self.frontend
                    .add_form(project_path, resource_name, &args.fields)
                    .await?
            }
            ExtensionKind::Routing => self.frontend.add_routing(project_path).await?,
            ExtensionKind::Nginx => self.deploy.add_nginx_reverse_proxy(project_path).await?,
            ExtensionKind::K8s => {
                let project_name = args.project_name.as_deref().unwrap_or(project_path);
                self.deploy.generate_k8s_config(project_name).await?
            }
            ExtensionKind::Coverage => self.tests.add_coverage_config(project_path).await?,
        };
        Ok(payload.describe())
    }

    /// String-tag entry point for `extend`. Unknown tags come back as a
    /// typed `UnknownExtension` error, never a panic.
    pub async fn extend_by_tag(
        &self,
        project_path: &str,
        tag: &str,
        args: ExtensionArgs,
    ) -> Result<String> {
        let kind: ExtensionKind = tag.parse()?;
        self.extend(project_path, kind, args).await
    }
}
