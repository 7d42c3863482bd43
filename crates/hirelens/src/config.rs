use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Which ranking backend to wire into the pipeline. Strategies are
/// interchangeable implementations of the same evaluate contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StrategyKind {
    Similarity,
    /// Primary path: the prompt demands a strict JSON array, the parser
    /// tolerates everything else.
    #[default]
    Generative,
}

impl FromStr for StrategyKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "similarity" | "embedding" => Ok(StrategyKind::Similarity),
            "generative" | "llm" => Ok(StrategyKind::Generative),
            other => bail!("unknown ranking strategy '{other}' (expected 'similarity' or 'generative')"),
        }
    }
}

/// Configuration for one ranking setup, loaded from environment variables.
/// Only the API key matching the selected strategy is required.
#[derive(Debug, Clone)]
pub struct RankerConfig {
    pub strategy: StrategyKind,
    /// Required when `strategy` is `Generative`.
    pub anthropic_api_key: String,
    /// Required when `strategy` is `Similarity`.
    pub embedding_api_key: String,
    /// Base URL of an OpenAI-compatible embeddings endpoint.
    pub embedding_api_url: String,
    pub embedding_model: String,
    /// Where the job collection lives (whole-collection replace semantics).
    pub jobs_path: PathBuf,
    /// Bound on every collaborator HTTP call; a timeout surfaces as a typed
    /// collaborator failure, never a hang.
    pub request_timeout_secs: u64,
}

impl RankerConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let strategy = std::env::var("RANKING_STRATEGY")
            .unwrap_or_else(|_| "generative".to_string())
            .parse::<StrategyKind>()?;

        let anthropic_api_key = match strategy {
            StrategyKind::Generative => require_env("ANTHROPIC_API_KEY")?,
            StrategyKind::Similarity => std::env::var("ANTHROPIC_API_KEY").unwrap_or_default(),
        };
        let embedding_api_key = match strategy {
            StrategyKind::Similarity => require_env("EMBEDDING_API_KEY")?,
            StrategyKind::Generative => std::env::var("EMBEDDING_API_KEY").unwrap_or_default(),
        };

        Ok(RankerConfig {
            strategy,
            anthropic_api_key,
            embedding_api_key,
            embedding_api_url: std::env::var("EMBEDDING_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            embedding_model: std::env::var("EMBEDDING_MODEL")
                .unwrap_or_else(|_| "text-embedding-3-small".to_string()),
            jobs_path: std::env::var("JOBS_FILE")
                .unwrap_or_else(|_| "jobs.json".to_string())
                .into(),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "120".to_string())
                .parse::<u64>()
                .context("REQUEST_TIMEOUT_SECS must be a number of seconds")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
