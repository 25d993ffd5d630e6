//! Classifier Backends - LLM Providers
//!
//! Two interchangeable backends behind one `Classifier` trait: xAI Grok
//! (OpenAI-compatible chat completions) and Anthropic Claude (messages API).
//! Both send the same fixed system prompt with temperature pinned to 0, the
//! most deterministic setting available, so repeated calls for the same
//! source tend to cite the same rule numbers.
//!
//! `classify` returns a raw transcript ending in the `Final Response:` marker
//! followed by the model's decision text, which is the wire format the
//! extractor consumes. Backend failures map to CLASSIFIER_* error codes; the
//! orchestrator treats them as fatal for the enclosing request (no retry, no
//! fallback between backends).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::prompt::{build_user_prompt, FINAL_RESPONSE_MARKER, SYSTEM_PROMPT};
use crate::models::config::ServiceConfig;
use crate::models::errors::{AppError, AppResult, ErrorCode};

const ANTHROPIC_API_VERSION: &str = "2023-06-01";
const ANTHROPIC_MAX_TOKENS: u32 = 1024;

/// Sends the fixed analysis prompt plus source code to one LLM backend.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify contract source, returning the raw transcript for extraction.
    async fn classify(&self, token_address: &str, source_code: &str) -> AppResult<String>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}

/// Map transport-level reqwest failures to classifier error codes.
fn transport_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::with_source(ErrorCode::ClassifierUnreachable, "backend request timed out", err)
    } else if err.is_connect() {
        AppError::with_source(ErrorCode::ClassifierUnreachable, "backend connection failed", err)
    } else {
        AppError::with_source(ErrorCode::ClassifierUnreachable, "backend request failed", err)
    }
}

/// Assemble the transcript handed to the extractor. The marker line is the
/// protocol between orchestrator and classifier.
fn build_transcript(reasoning: Option<&str>, decision: &str) -> String {
    let mut transcript = String::new();
    if let Some(reasoning) = reasoning {
        transcript.push_str("Reasoning Content:\n");
        transcript.push_str(reasoning);
        transcript.push_str("\n\n");
    }
    transcript.push_str(FINAL_RESPONSE_MARKER);
    transcript.push('\n');
    transcript.push_str(decision);
    transcript.push('\n');
    transcript
}

// ============================================
// Primary backend: xAI Grok
// ============================================

/// xAI Grok client (OpenAI-compatible chat completions)
pub struct GrokClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
    /// Grok reasoning models return their chain of thought separately
    #[serde(default)]
    reasoning_content: Option<String>,
}

impl GrokClient {
    pub fn new(config: &ServiceConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.classifier_timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: config.xai_url.trim_end_matches('/').to_string(),
            api_key: config.xai_api_key.clone(),
            model: config.xai_model.clone(),
        }
    }
}

#[async_trait]
impl Classifier for GrokClient {
    async fn classify(&self, token_address: &str, source_code: &str) -> AppResult<String> {
        let url = format!("{}/chat/completions", self.base_url);

        info!("🤖 Grok: classifying {} ({} bytes of source)", token_address, source_code.len());

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&ChatRequest {
                model: self.model.clone(),
                messages: vec![
                    ChatMessage {
                        role: "system".to_string(),
                        content: SYSTEM_PROMPT.to_string(),
                    },
                    ChatMessage {
                        role: "user".to_string(),
                        content: build_user_prompt(source_code),
                    },
                ],
                temperature: 0.0,
            })
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(AppError::classifier_bad_status(format!(
                "xAI returned HTTP {}",
                response.status()
            )));
        }

        let envelope: ChatResponse = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorCode::ClassifierBadEnvelope,
                "xAI response envelope could not be parsed",
                e,
            )
        })?;

        let choice = envelope
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::classifier_bad_envelope("xAI response has no choices"))?;

        let decision = choice
            .message
            .content
            .ok_or_else(|| AppError::classifier_bad_envelope("xAI response has no content"))?;

        Ok(build_transcript(
            choice.message.reasoning_content.as_deref(),
            &decision,
        ))
    }

    fn name(&self) -> &'static str {
        "grok"
    }
}

// ============================================
// Secondary backend: Anthropic Claude
// ============================================

/// Anthropic Claude client (messages API)
pub struct ClaudeClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct MessagesRequest {
    model: String,
    system: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

impl ClaudeClient {
    pub fn new(config: &ServiceConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.classifier_timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: config.anthropic_url.trim_end_matches('/').to_string(),
            api_key: config.anthropic_api_key.clone(),
            model: config.anthropic_model.clone(),
        }
    }
}

#[async_trait]
impl Classifier for ClaudeClient {
    async fn classify(&self, token_address: &str, source_code: &str) -> AppResult<String> {
        let url = format!("{}/messages", self.base_url);

        info!("🤖 Claude: classifying {} ({} bytes of source)", token_address, source_code.len());

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .header("content-type", "application/json")
            .json(&MessagesRequest {
                model: self.model.clone(),
                system: SYSTEM_PROMPT.to_string(),
                messages: vec![ChatMessage {
                    role: "user".to_string(),
                    content: build_user_prompt(source_code),
                }],
                temperature: 0.0,
                max_tokens: ANTHROPIC_MAX_TOKENS,
            })
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(AppError::classifier_bad_status(format!(
                "Anthropic returned HTTP {}",
                response.status()
            )));
        }

        let envelope: MessagesResponse = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorCode::ClassifierBadEnvelope,
                "Anthropic response envelope could not be parsed",
                e,
            )
        })?;

        let decision = envelope
            .content
            .iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text.as_deref())
            .ok_or_else(|| {
                AppError::classifier_bad_envelope("Anthropic response has no text content")
            })?;

        Ok(build_transcript(None, decision))
    }

    fn name(&self) -> &'static str {
        "claude"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::extractor::extract_reasons;

    #[test]
    fn test_transcript_carries_marker() {
        let t = build_transcript(Some("the tax function looks mutable"), "是6");
        assert!(t.contains("Final Response:\n是6"));
        assert_eq!(extract_reasons(&t), vec![6]);
    }

    #[test]
    fn test_transcript_without_reasoning() {
        let t = build_transcript(None, "否");
        assert!(t.starts_with("Final Response:\n"));
        assert_eq!(extract_reasons(&t), vec![0]);
    }
}
