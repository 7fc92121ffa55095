// ABOUTME: The TextGenerator capability trait shared by the extractor and every stage
// ABOUTME: One long-lived handle per run, passed explicitly; never ambient global state

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid response format")]
    InvalidResponse,

    #[error("No API key configured")]
    NoApiKey,

    #[error("Step budget exhausted after {attempts} attempts: {last_error}")]
    StepBudgetExhausted { attempts: u32, last_error: String },
}

pub type CompletionResult<T> = Result<T, CompletionError>;

/// The external reasoning collaborator. Takes a task description in natural
/// language and returns free text, subject to unbounded latency and
/// non-deterministic output. Implementations must be safe to share across
/// sequential stage invocations within one run.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, task: &str) -> CompletionResult<String>;
}
