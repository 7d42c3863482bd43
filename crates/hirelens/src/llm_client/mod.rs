/// LLM Client — the single point of entry for all generative-model calls.
///
/// ARCHITECTURAL RULE: no other module may call the Anthropic API directly.
/// The Ranking Pipeline sees only the [`RankingGenerator`] trait; the raw
/// response text goes to the parser untouched (streamed or not, the full
/// response is buffered here and returned as one owned string).
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

use crate::config::RankerConfig;
use crate::errors::RankerError;
use prompts::{build_ranking_prompt, RANKING_SYSTEM};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all LLM calls.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// `generate(job_description, resumes) -> raw_text`. No output schema is
/// guaranteed; callers must hand the result to the ranking response parser.
#[async_trait]
pub trait RankingGenerator: Send + Sync {
    async fn generate(
        &self,
        job_description: &str,
        resumes: &[String],
    ) -> Result<String, RankerError>;
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// The generative ranking client. Wraps the Anthropic Messages API with
/// retry logic and a bounded per-request timeout.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(config: &RankerConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
                .build()
                .expect("Failed to build HTTP client"),
            api_key: config.anthropic_api_key.clone(),
        }
    }

    /// Makes a raw call to the Claude API, returning the full response object.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<LlmResponse, LlmError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(ANTHROPIC_API_URL)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                // Try to parse error message
                let message = serde_json::from_str::<AnthropicError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let llm_response: LlmResponse = response.json().await.map_err(LlmError::Http)?;

            debug!(
                "LLM call succeeded: input_tokens={}, output_tokens={}",
                llm_response.usage.input_tokens, llm_response.usage.output_tokens
            );

            return Ok(llm_response);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl RankingGenerator for LlmClient {
    async fn generate(
        &self,
        job_description: &str,
        resumes: &[String],
    ) -> Result<String, RankerError> {
        let prompt = build_ranking_prompt(job_description, resumes);
        let response = self
            .call(&prompt, RANKING_SYSTEM)
            .await
            .map_err(|e| RankerError::Generation(e.to_string()))?;

        let text = response
            .text()
            .ok_or_else(|| RankerError::Generation(LlmError::EmptyContent.to_string()))?;

        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_response(text: &str) -> LlmResponse {
        LlmResponse {
            content: vec![ContentBlock {
                block_type: "text".to_string(),
                text: Some(text.to_string()),
            }],
            usage: Usage {
                input_tokens: 10,
                output_tokens: 5,
            },
        }
    }

    #[test]
    fn test_response_text_returns_first_text_block() {
        let response = LlmResponse {
            content: vec![
                ContentBlock {
                    block_type: "thinking".to_string(),
                    text: None,
                },
                ContentBlock {
                    block_type: "text".to_string(),
                    text: Some("[]".to_string()),
                },
            ],
            usage: Usage {
                input_tokens: 1,
                output_tokens: 1,
            },
        };
        assert_eq!(response.text(), Some("[]"));
    }

    #[test]
    fn test_response_without_text_block_is_none() {
        let response = LlmResponse {
            content: vec![],
            usage: Usage {
                input_tokens: 0,
                output_tokens: 0,
            },
        };
        assert_eq!(response.text(), None);
    }

    #[test]
    fn test_response_deserializes_from_api_shape() {
        let json = r#"{
            "content": [{"type": "text", "text": "[{\"ranking\":\"1\"}]"}],
            "usage": {"input_tokens": 120, "output_tokens": 40}
        }"#;
        let response: LlmResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), Some("[{\"ranking\":\"1\"}]"));
        assert_eq!(response.usage.input_tokens, 120);
    }

    #[test]
    fn test_text_response_helper_round_trips() {
        assert_eq!(text_response("hello").text(), Some("hello"));
    }
}
