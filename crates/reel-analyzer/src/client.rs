//! HTTP client for the messages-style completion API.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use reel_models::{TextHighlight, TranscriptDocument};

use crate::error::{AnalyzerError, AnalyzerResult};
use crate::prompt::build_prompt;

/// Default API base (Anthropic-compatible messages endpoint).
const DEFAULT_API_BASE: &str = "https://api.anthropic.com";

/// Models tried in order until one answers.
const DEFAULT_MODELS: &[&str] = &["claude-sonnet-4-20250514", "claude-3-5-haiku-latest"];

/// Configuration for the analyzer client.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// API key for the completion endpoint.
    pub api_key: String,
    /// Base URL of the API.
    pub api_base: String,
    /// Models to try, in order.
    pub models: Vec<String>,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum tokens the model may spend on its answer.
    pub max_tokens: u32,
    /// Retries per model on transient network failure.
    pub max_retries: u32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            models: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
            timeout: Duration::from_secs(120),
            max_tokens: 4096,
            max_retries: 1,
        }
    }
}

impl AnalyzerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("HIGHLIGHT_API_KEY").unwrap_or_default(),
            api_base: std::env::var("HIGHLIGHT_API_BASE")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            models: std::env::var("HIGHLIGHT_MODELS")
                .map(|s| {
                    s.split(',')
                        .map(|m| m.trim().to_string())
                        .filter(|m| !m.is_empty())
                        .collect()
                })
                .unwrap_or_else(|_| DEFAULT_MODELS.iter().map(|m| m.to_string()).collect()),
            timeout: Duration::from_secs(
                std::env::var("HIGHLIGHT_API_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(120),
            ),
            max_tokens: 4096,
            max_retries: std::env::var("HIGHLIGHT_API_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1),
        }
    }
}

/// Messages API request.
#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

/// Messages API response.
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// Highlights payload the model is instructed to answer with.
#[derive(Debug, Deserialize)]
struct HighlightsPayload {
    highlights: Vec<TextHighlight>,
}

/// Client for the external highlight analyzer.
pub struct HighlightAnalyzer {
    http: Client,
    config: AnalyzerConfig,
}

impl HighlightAnalyzer {
    /// Create a new analyzer client.
    pub fn new(config: AnalyzerConfig) -> AnalyzerResult<Self> {
        if config.api_key.is_empty() {
            return Err(AnalyzerError::MissingApiKey);
        }

        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> AnalyzerResult<Self> {
        Self::new(AnalyzerConfig::from_env())
    }

    /// Analyze a transcript and return validated highlight candidates.
    ///
    /// An empty transcript or a model answering with an empty list is a
    /// normal "nothing exciting found" outcome, not an error.
    pub async fn analyze(&self, transcript: &TranscriptDocument) -> AnalyzerResult<Vec<TextHighlight>> {
        if transcript.is_empty() {
            warn!("Transcript contains no speech, skipping analysis");
            return Ok(Vec::new());
        }

        let prompt = build_prompt(&transcript.timestamped_text());

        let mut last_error = None;
        for model in &self.config.models {
            info!(model = %model, "Requesting highlight analysis");
            match self.call_messages_api(model, &prompt).await {
                Ok(highlights) => {
                    info!(
                        model = %model,
                        highlights = highlights.len(),
                        "Highlight analysis complete"
                    );
                    return Ok(highlights);
                }
                Err(e) => {
                    warn!(model = %model, error = %e, "Model failed, trying next");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| AnalyzerError::request_failed("No models configured")))
    }

    /// Call the messages endpoint with one model and parse the answer.
    async fn call_messages_api(&self, model: &str, prompt: &str) -> AnalyzerResult<Vec<TextHighlight>> {
        let url = format!("{}/v1/messages", self.config.api_base);

        let request = MessagesRequest {
            model: model.to_string(),
            max_tokens: self.config.max_tokens,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self.send_with_retry(&url, &request).await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AnalyzerError::request_failed(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let parsed: MessagesResponse = response.json().await?;

        let text = parsed
            .content
            .iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text.as_deref())
            .ok_or(AnalyzerError::EmptyResponse)?;

        debug!(chars = text.len(), "Parsing model answer");
        parse_highlights(text)
    }

    /// Send a request, retrying transient network failures with backoff.
    async fn send_with_retry(
        &self,
        url: &str,
        request: &MessagesRequest,
    ) -> AnalyzerResult<reqwest::Response> {
        let mut attempt = 0;
        loop {
            match self
                .http
                .post(url)
                .header("x-api-key", &self.config.api_key)
                .header("anthropic-version", "2023-06-01")
                .json(request)
                .send()
                .await
            {
                Ok(response) => return Ok(response),
                Err(e) if attempt < self.config.max_retries => {
                    attempt += 1;
                    warn!(error = %e, attempt, "Request failed, retrying");
                    tokio::time::sleep(Duration::from_millis(500 * u64::from(attempt))).await;
                }
                Err(e) => return Err(AnalyzerError::Network(e)),
            }
        }
    }
}

/// Parse a model answer into validated highlight records.
///
/// Handles the answer being wrapped in markdown code fences; malformed
/// records are rejected with the offending index, never coerced.
pub(crate) fn parse_highlights(text: &str) -> AnalyzerResult<Vec<TextHighlight>> {
    let text = strip_code_fences(text);

    let payload: HighlightsPayload =
        serde_json::from_str(text).map_err(|e| AnalyzerError::parse_failed(e.to_string()))?;

    for (index, highlight) in payload.highlights.iter().enumerate() {
        highlight
            .validate()
            .map_err(|source| AnalyzerError::InvalidHighlight { index, source })?;
    }

    Ok(payload.highlights)
}

/// Strip a leading ```json / trailing ``` fence pair, if present.
fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let text = text.strip_prefix("```json").unwrap_or(text);
    let text = text.strip_prefix("```").unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}
