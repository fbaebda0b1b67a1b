//! Candidate store: the persistence sink for scored candidates.
//!
//! Records are keyed by accession. Upserting an accession that is already
//! stored updates the record in place; it is never duplicated.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use xylomyx_common::ScoredCandidate;

use crate::error::{DbError, Result};
use crate::schema::{CandidateQuery, StoreStatistics, StoredCandidate};

const TOP_ORGANISMS: usize = 10;

/// Whether an upsert created or refreshed a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// Counts from a batch upsert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchUpsertResult {
    pub inserted: usize,
    pub updated: usize,
}

#[async_trait]
pub trait CandidateStore: Send + Sync {
    async fn upsert(&self, candidate: &ScoredCandidate) -> Result<UpsertOutcome>;

    async fn upsert_batch(&self, candidates: &[ScoredCandidate]) -> Result<BatchUpsertResult> {
        let mut result = BatchUpsertResult::default();
        for candidate in candidates {
            match self.upsert(candidate).await? {
                UpsertOutcome::Inserted => result.inserted += 1,
                UpsertOutcome::Updated => result.updated += 1,
            }
        }
        Ok(result)
    }

    async fn get(&self, accession: &str) -> Result<Option<StoredCandidate>>;

    /// Matching records ordered by confidence descending.
    async fn query(&self, query: &CandidateQuery) -> Result<Vec<StoredCandidate>>;

    async fn statistics(&self) -> Result<StoreStatistics>;

    async fn count(&self) -> Result<usize>;
}

fn sorted_counts(counts: BTreeMap<String, usize>) -> Vec<(String, usize)> {
    let mut entries: Vec<(String, usize)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
}

// ── In-memory store ──────────────────────────────────────────────────────────

/// Reference store backed by a map under a tokio `RwLock`. Can be saved to
/// and restored from a JSON snapshot.
#[derive(Default)]
pub struct InMemoryCandidateStore {
    records: RwLock<HashMap<String, StoredCandidate>>,
}

impl InMemoryCandidateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a store written by [`Self::save_snapshot`].
    pub async fn load_snapshot(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let records: Vec<StoredCandidate> = serde_json::from_slice(&bytes)?;
        info!(path = %path.display(), records = records.len(), "Loaded candidate snapshot");
        Ok(Self {
            records: RwLock::new(records.into_iter().map(|r| (r.accession.clone(), r)).collect()),
        })
    }

    /// Write every record as a JSON array, ordered by accession.
    pub async fn save_snapshot(&self, path: &Path) -> Result<()> {
        let mut records: Vec<StoredCandidate> = self.records.read().await.values().cloned().collect();
        records.sort_by(|a, b| a.accession.cmp(&b.accession));
        let json = serde_json::to_vec_pretty(&records)?;
        tokio::fs::write(path, json).await?;
        info!(path = %path.display(), records = records.len(), "Saved candidate snapshot");
        Ok(())
    }
}

#[async_trait]
impl CandidateStore for InMemoryCandidateStore {
    async fn upsert(&self, candidate: &ScoredCandidate) -> Result<UpsertOutcome> {
        let record = StoredCandidate::from_scored(candidate);
        let mut records = self.records.write().await;
        match records.get_mut(&record.accession) {
            Some(existing) => {
                existing.refresh_from(record);
                debug!(accession = %existing.accession, revision = existing.revision, "Updated candidate");
                Ok(UpsertOutcome::Updated)
            }
            None => {
                debug!(accession = %record.accession, "Inserted candidate");
                records.insert(record.accession.clone(), record);
                Ok(UpsertOutcome::Inserted)
            }
        }
    }

    async fn get(&self, accession: &str) -> Result<Option<StoredCandidate>> {
        Ok(self.records.read().await.get(accession).cloned())
    }

    async fn query(&self, query: &CandidateQuery) -> Result<Vec<StoredCandidate>> {
        if query.limit == Some(0) {
            return Err(DbError::InvalidQuery("limit must be at least 1".to_string()));
        }
        let mut matches: Vec<StoredCandidate> = self
            .records
            .read()
            .await
            .values()
            .filter(|r| query.matches(r))
            .cloned()
            .collect();
        // Accession breaks ties so results do not depend on map order.
        matches.sort_by(|a, b| {
            b.confidence
                .total_cmp(&a.confidence)
                .then_with(|| a.accession.cmp(&b.accession))
        });
        if let Some(limit) = query.limit {
            matches.truncate(limit);
        }
        Ok(matches)
    }

    async fn statistics(&self) -> Result<StoreStatistics> {
        let records = self.records.read().await;
        if records.is_empty() {
            return Ok(StoreStatistics::default());
        }

        let mut types = BTreeMap::new();
        let mut organisms = BTreeMap::new();
        let mut keywords = BTreeMap::new();
        for record in records.values() {
            *types.entry(record.enzyme_type.clone()).or_insert(0) += 1;
            if !record.organism.is_empty() {
                *organisms.entry(record.organism.clone()).or_insert(0) += 1;
            }
            for keyword in &record.keywords {
                *keywords.entry(keyword.clone()).or_insert(0) += 1;
            }
        }

        let unique_organisms = organisms.len();
        let mut top_organisms = sorted_counts(organisms);
        top_organisms.truncate(TOP_ORGANISMS);

        Ok(StoreStatistics {
            total_candidates: records.len(),
            unique_organisms,
            enzyme_type_counts: sorted_counts(types),
            top_organisms,
            keyword_counts: sorted_counts(keywords),
            mean_confidence: records.values().map(|r| r.confidence).sum::<f64>() / records.len() as f64,
        })
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.records.read().await.len())
    }
}
