// ABOUTME: Anthropic Claude implementation of the TextGenerator trait
// ABOUTME: Handles API requests, retry within a step budget, and usage accounting

use std::env;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use stackforge_core::constants::{
    ANTHROPIC_API_KEY, ANTHROPIC_MODEL, DEFAULT_MAX_STEPS, STACKFORGE_MAX_STEPS,
};

use crate::generator::{CompletionError, CompletionResult, TextGenerator};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Calculate appropriate max_tokens for a given model
fn get_max_tokens_for_model(model: &str) -> u32 {
    if model.contains("haiku") {
        1024
    } else {
        4096
    }
}

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    #[allow(dead_code)]
    id: String,
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    #[allow(dead_code)]
    content_type: String,
    text: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl Usage {
    pub fn total_tokens(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }
}

/// Anthropic-backed text generator. One instance is shared by the extractor
/// and every stage within a run; it holds no per-task state beyond cumulative
/// usage totals.
pub struct AnthropicGenerator {
    client: Client,
    api_key: Option<String>,
    model: String,
    endpoint: String,
    max_steps: u32,
    usage: Mutex<Usage>,
}

impl AnthropicGenerator {
    /// Create HTTP client with timeout configuration
    fn create_client() -> Client {
        Client::builder()
            .timeout(std::time::Duration::from_secs(600))
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client")
    }

    fn max_steps_from_env() -> u32 {
        env::var(STACKFORGE_MAX_STEPS)
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_MAX_STEPS)
    }

    /// Creates a new generator. API key is fetched from the
    /// ANTHROPIC_API_KEY environment variable; model can be overridden with
    /// ANTHROPIC_MODEL.
    pub fn new() -> Self {
        let api_key = env::var(ANTHROPIC_API_KEY).ok();
        if api_key.is_none() {
            warn!("ANTHROPIC_API_KEY not set - completions will fail until a key is provided");
        }

        let model = env::var(ANTHROPIC_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        if model != DEFAULT_MODEL {
            info!("Using custom Anthropic model: {}", model);
        }

        Self {
            client: Self::create_client(),
            api_key,
            model,
            endpoint: ANTHROPIC_API_URL.to_string(),
            max_steps: Self::max_steps_from_env(),
            usage: Mutex::new(Usage::default()),
        }
    }

    /// Creates a new generator with a specific API key
    pub fn with_api_key(api_key: String) -> Self {
        let model = env::var(ANTHROPIC_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self {
            api_key: Some(api_key),
            model,
            ..Self::bare()
        }
    }

    /// Creates a new generator with a specific API key and model
    pub fn with_api_key_and_model(api_key: String, model: String) -> Self {
        Self {
            api_key: Some(api_key),
            model,
            ..Self::bare()
        }
    }

    fn bare() -> Self {
        Self {
            client: Self::create_client(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: ANTHROPIC_API_URL.to_string(),
            max_steps: Self::max_steps_from_env(),
            usage: Mutex::new(Usage::default()),
        }
    }

    /// Overrides the API endpoint. Used by tests to point at a local server.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Overrides the per-task step budget.
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Get the model being used by this generator
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Cumulative token usage across every completion made by this handle.
    pub fn usage_totals(&self) -> Usage {
        *self.usage.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record_usage(&self, usage: Usage) {
        let mut totals = self
            .usage
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        totals.input_tokens += usage.input_tokens;
        totals.output_tokens += usage.output_tokens;
    }

    async fn attempt(&self, task: &str) -> CompletionResult<(String, Usage)> {
        let api_key = self.api_key.as_ref().ok_or(CompletionError::NoApiKey)?;

        let request = AnthropicRequest {
            model: self.model.clone(),
            max_tokens: get_max_tokens_for_model(&self.model),
            temperature: DEFAULT_TEMPERATURE,
            messages: vec![Message {
                role: "user".to_string(),
                content: task.to_string(),
            }],
        };

        info!(
            "Making Anthropic API request: model={}, max_tokens={}",
            request.model, request.max_tokens
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    error!("Anthropic API request timed out");
                    CompletionError::ApiError("Request timed out".to_string())
                } else if e.is_connect() {
                    error!("Failed to connect to Anthropic API: {}", e);
                    CompletionError::ApiError(format!("Connection failed: {}", e))
                } else {
                    error!("Anthropic API request failed: {}", e);
                    CompletionError::RequestFailed(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Anthropic API error: {} - {}", status, error_text);
            return Err(CompletionError::ApiError(format!(
                "API returned {}: {}",
                status, error_text
            )));
        }

        let anthropic_response: AnthropicResponse = response
            .json()
            .await
            .map_err(|_| CompletionError::InvalidResponse)?;

        let text = anthropic_response
            .content
            .first()
            .ok_or(CompletionError::InvalidResponse)?
            .text
            .clone();

        Ok((text, anthropic_response.usage))
    }
}

impl Default for AnthropicGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerator for AnthropicGenerator {
    /// Runs one reasoning task. Retries transient failures within the step
    /// budget; a missing API key fails immediately.
    async fn complete(&self, task: &str) -> CompletionResult<String> {
        let mut last_error = None;

        for attempt in 1..=self.max_steps {
            match self.attempt(task).await {
                Ok((text, usage)) => {
                    self.record_usage(usage);
                    info!(
                        attempt,
                        tokens = usage.total_tokens(),
                        "Completion succeeded"
                    );
                    return Ok(text);
                }
                Err(CompletionError::NoApiKey) => return Err(CompletionError::NoApiKey),
                Err(err) => {
                    warn!(attempt, error = %err, "Completion attempt failed");
                    last_error = Some(err);
                }
            }
        }

        Err(CompletionError::StepBudgetExhausted {
            attempts: self.max_steps,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no attempts made".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn message_body(text: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "msg_test",
            "content": [{"type": "text", "text": text}],
            "usage": {"input_tokens": 10, "output_tokens": 25}
        })
    }

    #[tokio::test]
    async fn test_complete_returns_first_content_block() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("anthropic-version", ANTHROPIC_VERSION))
            .respond_with(ResponseTemplate::new(200).set_body_json(message_body("hello world")))
            .mount(&server)
            .await;

        let generator = AnthropicGenerator::with_api_key("test-key".to_string())
            .with_endpoint(format!("{}/v1/messages", server.uri()));

        let text = generator.complete("say hello").await.unwrap();
        assert_eq!(text, "hello world");
        assert_eq!(generator.usage_totals().total_tokens(), 35);
    }

    #[tokio::test]
    async fn test_api_error_exhausts_step_budget() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
            .expect(3)
            .mount(&server)
            .await;

        let generator = AnthropicGenerator::with_api_key("test-key".to_string())
            .with_endpoint(format!("{}/v1/messages", server.uri()))
            .with_max_steps(3);

        let err = generator.complete("task").await.unwrap_err();
        assert!(matches!(
            err,
            CompletionError::StepBudgetExhausted { attempts: 3, .. }
        ));
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_without_request() {
        let generator = AnthropicGenerator::with_api_key_and_model(
            String::new(),
            DEFAULT_MODEL.to_string(),
        );
        // Simulate an unset key by constructing via bare()
        let generator = AnthropicGenerator {
            api_key: None,
            ..generator
        };
        let err = generator.complete("task").await.unwrap_err();
        assert!(matches!(err, CompletionError::NoApiKey));
    }

    #[test]
    fn test_max_tokens_by_model() {
        assert_eq!(get_max_tokens_for_model("claude-haiku-4"), 1024);
        assert_eq!(get_max_tokens_for_model(DEFAULT_MODEL), 4096);
    }
}
