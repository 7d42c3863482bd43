//! hirelens — candidate-ranking core.
//!
//! Ranks job candidates against a job description: extracts text from
//! uploaded resumes (plain text or PDF), scores relevance via one of two
//! interchangeable strategies (embedding cosine similarity, or a generative
//! assistant whose loosely-formatted response is defensively parsed), and
//! produces canonical ranking records for persistence and display.
//!
//! The presentation layer, model inference, and durable storage backends
//! are collaborators behind narrow traits ([`embedder::Embedder`],
//! [`llm_client::RankingGenerator`], [`store::JobStore`]); this crate owns
//! the pipeline between them.

pub mod config;
pub mod embedder;
pub mod errors;
pub mod extract;
pub mod index;
pub mod llm_client;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod similarity;
pub mod store;

pub use config::{RankerConfig, StrategyKind};
pub use errors::{DocumentFailure, RankerError};
pub use models::{JobPosting, RankingRecord, ResumeDocument};
pub use pipeline::{Evaluation, GenerativeStrategy, RankingPipeline, RankingStrategy, SimilarityStrategy};
pub use store::{JobStore, JsonFileStore};
