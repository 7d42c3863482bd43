//! Embedding collaborator — the narrow contract the Similarity Ranker relies
//! on, plus the HTTP client implementation for OpenAI-compatible
//! `/embeddings` endpoints.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::RankerConfig;
use crate::errors::RankerError;

const MAX_RETRIES: u32 = 3;

/// `embed(text) -> vector`. Deterministic for identical text and model
/// version; failures surface as typed errors, never a crash.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, RankerError>;
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: [&'a str; 1],
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingEntry>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingEntry {
    embedding: Vec<f32>,
}

/// HTTP embedding client. Retries on 429 and 5xx with exponential backoff;
/// request timeout comes from config so a stuck collaborator call becomes a
/// typed error instead of a hang.
pub struct HttpEmbedder {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl HttpEmbedder {
    pub fn new(config: &RankerConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
                .build()
                .expect("Failed to build HTTP client"),
            endpoint: format!(
                "{}/embeddings",
                config.embedding_api_url.trim_end_matches('/')
            ),
            api_key: config.embedding_api_key.clone(),
            model: config.embedding_model.clone(),
        }
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, RankerError> {
        let request_body = EmbeddingRequest {
            model: &self.model,
            input: [text],
        };

        let mut last_error: Option<String> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "embedding attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(e.to_string());
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("embedding API returned {}: {}", status, body);
                last_error = Some(format!("status {status}: {body}"));
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(RankerError::Embedding(format!("status {status}: {body}")));
            }

            let parsed: EmbeddingResponse = response
                .json()
                .await
                .map_err(|e| RankerError::Embedding(format!("malformed response: {e}")))?;

            let vector = parsed
                .data
                .into_iter()
                .next()
                .map(|entry| entry.embedding)
                .ok_or_else(|| RankerError::Embedding("response contained no vector".to_string()))?;

            debug!(dimensions = vector.len(), "embedding call succeeded");
            return Ok(vector);
        }

        Err(RankerError::Embedding(
            last_error.unwrap_or_else(|| format!("gave up after {MAX_RETRIES} retries")),
        ))
    }
}

/// Cosine similarity between two vectors, in [-1, 1]. Zero-magnitude or
/// length-mismatched inputs score 0.0 rather than NaN.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identical_vectors_is_one() {
        let v = vec![0.5, 0.3, 0.2];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal_vectors_is_zero() {
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_opposite_vectors_is_negative_one() {
        let sim = cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]);
        assert!((sim + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_zero_vector_scores_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_cosine_length_mismatch_scores_zero() {
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_cosine_is_scale_invariant() {
        let a = [0.2, 0.7, 0.1];
        let doubled: Vec<f32> = a.iter().map(|x| x * 2.0).collect();
        let sim = cosine_similarity(&a, &doubled);
        assert!((sim - 1.0).abs() < 1e-6);
    }
}
