//! Persistence contract for job postings and their ranking histories.
//!
//! The collaborator exposes whole-collection replace semantics only: no
//! partial update API exists, so updating one job's rankings is a
//! read-modify-write of the full collection. Implementations must serialize
//! writes (last writer for a job wins; writes to different jobs must not
//! clobber each other), which is why `replace_rankings` is part of the
//! trait — a file-backed store holds its lock across the whole RMW.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::errors::RankerError;
use crate::models::{JobPosting, RankingRecord};

#[async_trait]
pub trait JobStore: Send + Sync {
    /// Loads the full job collection. A store with no data yet returns an
    /// empty collection, not an error.
    async fn load_jobs(&self) -> Result<Vec<JobPosting>, RankerError>;

    /// Replaces the full job collection.
    async fn save_jobs(&self, jobs: &[JobPosting]) -> Result<(), RankerError>;

    /// Replaces one job's ranking history with `records` and stamps
    /// `ranked_at`. A re-run never merges: the prior history is discarded.
    ///
    /// The default implementation is a plain read-modify-write; stores with
    /// an internal lock should override it to hold the lock across the RMW.
    async fn replace_rankings(
        &self,
        job_id: Uuid,
        records: Vec<RankingRecord>,
    ) -> Result<(), RankerError> {
        let mut jobs = self.load_jobs().await?;
        apply_rankings(&mut jobs, job_id, records)?;
        self.save_jobs(&jobs).await
    }
}

fn apply_rankings(
    jobs: &mut [JobPosting],
    job_id: Uuid,
    records: Vec<RankingRecord>,
) -> Result<(), RankerError> {
    let job = jobs
        .iter_mut()
        .find(|j| j.id == job_id)
        .ok_or(RankerError::UnknownJob(job_id))?;
    job.rankings = records;
    job.ranked_at = Some(Utc::now());
    Ok(())
}

/// JSON-file-backed job store: the whole collection lives in one file,
/// loaded and rewritten atomically per operation. A missing file loads as
/// an empty collection.
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn read_collection(&self) -> Result<Vec<JobPosting>, RankerError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(RankerError::Persistence(format!(
                    "reading {}: {e}",
                    self.path.display()
                )))
            }
        };
        serde_json::from_slice(&bytes).map_err(|e| {
            RankerError::Persistence(format!("decoding {}: {e}", self.path.display()))
        })
    }

    async fn write_collection(&self, jobs: &[JobPosting]) -> Result<(), RankerError> {
        let bytes = serde_json::to_vec_pretty(jobs)
            .map_err(|e| RankerError::Persistence(format!("encoding jobs: {e}")))?;
        fs::write(&self.path, bytes).await.map_err(|e| {
            RankerError::Persistence(format!("writing {}: {e}", self.path.display()))
        })?;
        debug!(path = %self.path.display(), jobs = jobs.len(), "saved job collection");
        Ok(())
    }
}

#[async_trait]
impl JobStore for JsonFileStore {
    async fn load_jobs(&self) -> Result<Vec<JobPosting>, RankerError> {
        self.read_collection().await
    }

    async fn save_jobs(&self, jobs: &[JobPosting]) -> Result<(), RankerError> {
        let _guard = self.lock.lock().await;
        self.write_collection(jobs).await
    }

    async fn replace_rankings(
        &self,
        job_id: Uuid,
        records: Vec<RankingRecord>,
    ) -> Result<(), RankerError> {
        // Lock held across the whole read-modify-write so concurrent
        // updates to different jobs cannot clobber each other.
        let _guard = self.lock.lock().await;
        let mut jobs = self.read_collection().await?;
        apply_rankings(&mut jobs, job_id, records)?;
        self.write_collection(&jobs).await
    }
}
