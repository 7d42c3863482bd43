//! Similarity Ranker — orders resumes by cosine similarity between the job
//! description embedding and each resume embedding.
//!
//! The job description embedding is obtained first; its failure aborts the
//! whole call. A failure for an individual resume excludes that resume and
//! is reported in the partial-failure list, never silently dropped.

use tracing::debug;

use crate::embedder::{cosine_similarity, Embedder};
use crate::errors::{DocumentFailure, RankerError};
use crate::index::EmbeddingIndex;
use crate::models::ResumeDocument;

/// A resume with its similarity score against the job description.
#[derive(Debug, Clone)]
pub struct ScoredResume {
    pub document: ResumeDocument,
    pub score: f32,
}

/// Ranks `resumes` against `job_text`, descending by cosine similarity.
/// Ties keep original input order (stable sort), so identical inputs and
/// embeddings always produce an identical order.
pub async fn rank_by_similarity(
    embedder: &dyn Embedder,
    job_text: &str,
    resumes: &[ResumeDocument],
    index: &EmbeddingIndex,
) -> Result<(Vec<ScoredResume>, Vec<DocumentFailure>), RankerError> {
    // Job-description-level failure is fatal; nothing can be scored without it.
    let job_embedding = embedder.embed(job_text).await?;

    let mut scored = Vec::with_capacity(resumes.len());
    let mut failures = Vec::new();

    for document in resumes {
        let embedding = match index.get(&document.name).await {
            Some(cached) => cached,
            None => match embedder.embed(&document.text).await {
                Ok(embedding) => {
                    index.upsert(&document.name, embedding.clone()).await;
                    embedding
                }
                Err(error) => {
                    failures.push(DocumentFailure::new(document.name.clone(), error));
                    continue;
                }
            },
        };

        let score = cosine_similarity(&job_embedding, &embedding);
        debug!(document = %document.name, score, "scored resume");
        scored.push(ScoredResume {
            document: document.clone(),
            score,
        });
    }

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok((scored, failures))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Embedder with canned vectors per input text; unknown text errors.
    struct FixedEmbedder {
        vectors: Vec<(&'static str, Vec<f32>)>,
    }

    #[async_trait]
    impl Embedder for FixedEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>, RankerError> {
            self.vectors
                .iter()
                .find(|(t, _)| *t == text)
                .map(|(_, v)| v.clone())
                .ok_or_else(|| RankerError::Embedding(format!("no vector for '{text}'")))
        }
    }

    fn doc(name: &str, text: &str) -> ResumeDocument {
        ResumeDocument::new(name, text)
    }

    #[tokio::test]
    async fn test_orders_descending_by_similarity() {
        let embedder = FixedEmbedder {
            vectors: vec![
                ("backend job", vec![1.0, 0.0]),
                ("strong match", vec![0.82, 0.5724]),
                ("weak match", vec![0.41, 0.9121]),
            ],
        };
        let resumes = vec![doc("b", "weak match"), doc("a", "strong match")];
        let (scored, failures) = rank_by_similarity(
            &embedder,
            "backend job",
            &resumes,
            &EmbeddingIndex::new(),
        )
        .await
        .unwrap();

        assert!(failures.is_empty());
        assert_eq!(scored[0].document.name, "a");
        assert_eq!(scored[1].document.name, "b");
        assert!((scored[0].score - 0.82).abs() < 1e-3);
        assert!((scored[1].score - 0.41).abs() < 1e-3);
    }

    #[tokio::test]
    async fn test_reruns_are_deterministic() {
        let embedder = FixedEmbedder {
            vectors: vec![
                ("job", vec![1.0, 0.0]),
                ("r1", vec![0.9, 0.1]),
                ("r2", vec![0.2, 0.8]),
                ("r3", vec![0.5, 0.5]),
            ],
        };
        let resumes = vec![doc("r1", "r1"), doc("r2", "r2"), doc("r3", "r3")];

        let (first, _) =
            rank_by_similarity(&embedder, "job", &resumes, &EmbeddingIndex::new())
                .await
                .unwrap();
        let (second, _) =
            rank_by_similarity(&embedder, "job", &resumes, &EmbeddingIndex::new())
                .await
                .unwrap();

        let order = |s: &[ScoredResume]| {
            s.iter().map(|r| r.document.name.clone()).collect::<Vec<_>>()
        };
        assert_eq!(order(&first), order(&second));
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.score, b.score);
        }
    }

    #[tokio::test]
    async fn test_ties_keep_input_order() {
        let embedder = FixedEmbedder {
            vectors: vec![
                ("job", vec![1.0, 0.0]),
                ("same", vec![0.6, 0.8]),
            ],
        };
        // Two documents with identical text, hence identical scores.
        let resumes = vec![doc("first", "same"), doc("second", "same")];
        let (scored, _) =
            rank_by_similarity(&embedder, "job", &resumes, &EmbeddingIndex::new())
                .await
                .unwrap();
        assert_eq!(scored[0].document.name, "first");
        assert_eq!(scored[1].document.name, "second");
    }

    #[tokio::test]
    async fn test_per_document_failure_is_skipped_and_reported() {
        let embedder = FixedEmbedder {
            vectors: vec![("job", vec![1.0, 0.0]), ("ok", vec![0.5, 0.5])],
        };
        let resumes = vec![doc("good", "ok"), doc("bad", "unembeddable")];
        let (scored, failures) =
            rank_by_similarity(&embedder, "job", &resumes, &EmbeddingIndex::new())
                .await
                .unwrap();

        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].document.name, "good");
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].name, "bad");
    }

    #[tokio::test]
    async fn test_job_embedding_failure_aborts() {
        let embedder = FixedEmbedder { vectors: vec![] };
        let err = rank_by_similarity(
            &embedder,
            "job",
            &[doc("a", "text")],
            &EmbeddingIndex::new(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RankerError::Embedding(_)));
    }

    #[tokio::test]
    async fn test_cached_embedding_is_reused() {
        let index = EmbeddingIndex::new();
        // Pre-seeded cache entry; the embedder knows nothing about "alice".
        index.upsert("alice", vec![1.0, 0.0]).await;
        let embedder = FixedEmbedder {
            vectors: vec![("job", vec![1.0, 0.0])],
        };
        let (scored, failures) =
            rank_by_similarity(&embedder, "job", &[doc("alice", "whatever")], &index)
                .await
                .unwrap();
        assert!(failures.is_empty());
        assert!((scored[0].score - 1.0).abs() < 1e-6);
    }
}
