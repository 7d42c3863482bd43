//! Ranking Pipeline — extract all resumes, obtain a ranking from the
//! configured strategy, normalize into canonical records, and hand the
//! result back for persistence and display.
//!
//! The two ranking strategies (embedding similarity, generative model) are
//! interchangeable behind [`RankingStrategy`]; the pipeline neither knows
//! nor cares which one is wired in. Each `evaluate` call is a single logical
//! unit of work: all extractions complete before scoring, scoring completes
//! before formatting, and nothing is persisted by the pipeline itself.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::config::{RankerConfig, StrategyKind};
use crate::embedder::{Embedder, HttpEmbedder};
use crate::errors::{DocumentFailure, RankerError};
use crate::extract;
use crate::index::EmbeddingIndex;
use crate::llm_client::{LlmClient, RankingGenerator};
use crate::models::{renumber, RankingRecord, ResumeDocument};
use crate::parser;
use crate::similarity::rank_by_similarity;

/// Stages of one `evaluate` invocation, in order. Surfaced in trace output;
/// persistence only ever happens after `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Extracting,
    Scoring,
    Formatting,
    Done,
    Failed,
}

/// What a strategy hands back: records in ranked order (ranks are
/// renumbered by the pipeline regardless), per-document failures, and
/// non-fatal diagnostics such as skipped response chunks.
#[derive(Debug, Default)]
pub struct StrategyOutcome {
    pub records: Vec<RankingRecord>,
    pub failures: Vec<DocumentFailure>,
    pub diagnostics: Vec<String>,
}

/// One interchangeable ranking backend. Held by the pipeline as
/// `Arc<dyn RankingStrategy>`; swap at construction, not at call sites.
#[async_trait]
pub trait RankingStrategy: Send + Sync {
    async fn rank(
        &self,
        job_description: &str,
        resumes: &[ResumeDocument],
    ) -> Result<StrategyOutcome, RankerError>;
}

/// Embedding-based ranking: cosine similarity against the job description,
/// descending. Overviews are the resume texts themselves; pros/cons stay
/// empty (similarity scoring produces no commentary).
pub struct SimilarityStrategy {
    embedder: Arc<dyn Embedder>,
}

impl SimilarityStrategy {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }
}

#[async_trait]
impl RankingStrategy for SimilarityStrategy {
    async fn rank(
        &self,
        job_description: &str,
        resumes: &[ResumeDocument],
    ) -> Result<StrategyOutcome, RankerError> {
        // The index lives for exactly one run; it is a cache, not state.
        let index = EmbeddingIndex::new();
        let (scored, failures) =
            rank_by_similarity(self.embedder.as_ref(), job_description, resumes, &index).await?;

        let mut records: Vec<RankingRecord> = scored
            .into_iter()
            .map(|s| RankingRecord::new(0, s.document.text, Vec::new(), Vec::new()))
            .collect();
        renumber(&mut records);

        Ok(StrategyOutcome {
            records,
            failures,
            diagnostics: Vec::new(),
        })
    }
}

/// Generation-based ranking: delegate to the generative collaborator and
/// recover records from its raw response via the defensive parser.
pub struct GenerativeStrategy {
    generator: Arc<dyn RankingGenerator>,
}

impl GenerativeStrategy {
    pub fn new(generator: Arc<dyn RankingGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl RankingStrategy for GenerativeStrategy {
    async fn rank(
        &self,
        job_description: &str,
        resumes: &[ResumeDocument],
    ) -> Result<StrategyOutcome, RankerError> {
        let texts: Vec<String> = resumes.iter().map(|d| d.text.clone()).collect();
        let raw = self.generator.generate(job_description, &texts).await?;

        let outcome = parser::parse(&raw);
        Ok(StrategyOutcome {
            records: outcome.records,
            failures: Vec::new(),
            diagnostics: outcome.diagnostics,
        })
    }
}

/// Result of one pipeline run: canonical records with contiguous 1..N
/// ranks, accumulated per-document failures, and parser diagnostics.
#[derive(Debug, Default)]
pub struct Evaluation {
    pub records: Vec<RankingRecord>,
    pub failures: Vec<DocumentFailure>,
    pub diagnostics: Vec<String>,
}

pub struct RankingPipeline {
    strategy: Arc<dyn RankingStrategy>,
}

impl RankingPipeline {
    pub fn new(strategy: Arc<dyn RankingStrategy>) -> Self {
        Self { strategy }
    }

    /// Wires up the strategy selected in config, with the matching
    /// collaborator client.
    pub fn from_config(config: &RankerConfig) -> Self {
        let strategy: Arc<dyn RankingStrategy> = match config.strategy {
            StrategyKind::Similarity => Arc::new(SimilarityStrategy::new(Arc::new(
                HttpEmbedder::new(config),
            ))),
            StrategyKind::Generative => {
                Arc::new(GenerativeStrategy::new(Arc::new(LlmClient::new(config))))
            }
        };
        Self::new(strategy)
    }

    /// Runs the full pipeline for one job: extract every file, rank the
    /// survivors, renumber, and return records plus accumulated failures.
    ///
    /// Fatal only when zero files extract successfully (given at least one
    /// file) or when the strategy's job-level collaborator call fails.
    /// Re-running for the same job is expected to fully replace the prior
    /// ranking history; see `store::JobStore::replace_rankings`.
    pub async fn evaluate(
        &self,
        job_description: &str,
        files: &[PathBuf],
    ) -> Result<Evaluation, RankerError> {
        if files.is_empty() {
            return Ok(Evaluation::default());
        }

        debug!(stage = ?Stage::Extracting, files = files.len(), "starting evaluation");

        let mut documents = Vec::with_capacity(files.len());
        let mut failures = Vec::new();

        for path in files {
            let name = document_name(path);
            match extract::extract(path).await {
                Ok(text) => documents.push(ResumeDocument::new(name, text)),
                Err(error) => {
                    warn!(document = %name, %error, "extraction failed");
                    failures.push(DocumentFailure::new(name, error));
                }
            }
        }

        if documents.is_empty() {
            debug!(stage = ?Stage::Failed, "no resume extracted successfully");
            return Err(RankerError::NoUsableDocuments);
        }

        debug!(stage = ?Stage::Scoring, documents = documents.len());
        let outcome = self.strategy.rank(job_description, &documents).await?;

        debug!(stage = ?Stage::Formatting, records = outcome.records.len());
        let mut records = outcome.records;
        renumber(&mut records);
        failures.extend(outcome.failures);

        info!(
            stage = ?Stage::Done,
            records = records.len(),
            failures = failures.len(),
            "evaluation complete"
        );

        Ok(Evaluation {
            records,
            failures,
            diagnostics: outcome.diagnostics,
        })
    }
}

fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
