// ABOUTME: Runtime configuration for a generation run
// ABOUTME: Env-var backed with defaults; names live in stackforge-core constants

use std::env;
use std::path::PathBuf;

use stackforge_core::constants::{
    DEFAULT_MAX_STEPS, DEFAULT_OUTPUT_DIR, STACKFORGE_MAX_STEPS, STACKFORGE_OUTPUT_DIR,
};

/// Configuration shared by one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Sandboxed root every generated artifact resolves against.
    pub output_dir: PathBuf,
    /// Collaborator reasoning step budget per task.
    pub max_steps: u32,
}

impl PipelineConfig {
    pub fn from_env() -> Self {
        let output_dir = env::var(STACKFORGE_OUTPUT_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT_DIR));
        let max_steps = env::var(STACKFORGE_MAX_STEPS)
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_MAX_STEPS);

        Self {
            output_dir,
            max_steps,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}
