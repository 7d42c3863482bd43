//! Per-run in-memory embedding cache, keyed by document name.
//!
//! A ranking run embeds each resume once and may look the vector up again
//! within the same invocation. The cache is stateless across runs — it is
//! rebuilt per invocation and is never a correctness dependency.

use std::collections::HashMap;

use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct EmbeddingIndex {
    entries: RwLock<HashMap<String, Vec<f32>>>,
}

impl EmbeddingIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn upsert(&self, id: &str, embedding: Vec<f32>) {
        let mut entries = self.entries.write().await;
        entries.insert(id.to_string(), embedding);
    }

    pub async fn get(&self, id: &str) -> Option<Vec<f32>> {
        let entries = self.entries.read().await;
        entries.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
