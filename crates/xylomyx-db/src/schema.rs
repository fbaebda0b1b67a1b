//! Record definitions for the candidate store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use xylomyx_common::ScoredCandidate;

// =============================================================================
// Candidate record
// =============================================================================

/// Flattened, persisted view of one scored candidate. Keyed by accession.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCandidate {
    pub id: Uuid,
    pub accession: String,
    pub organism: String,
    pub description: String,
    pub enzyme_type: String,
    pub family: String,
    pub ec_number: String,
    pub tissue: String,
    pub stage: String,
    pub keywords: Vec<String>,
    pub length: usize,
    pub confidence: f64,
    pub expression_score: f64,
    pub homology_score: f64,
    pub source_db: String,
    pub first_seen: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Incremented on every update of an existing accession
    pub revision: u32,
}

impl StoredCandidate {
    pub fn from_scored(scored: &ScoredCandidate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            accession: scored.accession().to_string(),
            organism: scored.candidate.organism.clone(),
            description: scored.candidate.description.clone(),
            enzyme_type: scored.enzyme_type().to_string(),
            family: scored.family_code().to_string(),
            ec_number: scored.ec_number().to_string(),
            tissue: scored.tissue_label().to_string(),
            stage: scored.stage_label().to_string(),
            keywords: scored.classification.keywords_found.iter().cloned().collect(),
            length: scored.candidate.length,
            confidence: scored.confidence,
            expression_score: scored.expression_score(),
            homology_score: scored.homology_score(),
            source_db: scored.candidate.source_db.clone(),
            first_seen: now,
            updated_at: now,
            revision: 0,
        }
    }

    /// Overwrite the scored fields, keeping identity and first-seen time.
    pub fn refresh_from(&mut self, newer: StoredCandidate) {
        *self = StoredCandidate {
            id: self.id,
            first_seen: self.first_seen,
            revision: self.revision + 1,
            ..newer
        };
    }
}

// =============================================================================
// Query
// =============================================================================

/// Filter for [`crate::CandidateStore::query`]. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateQuery {
    pub enzyme_type: Option<String>,
    pub min_confidence: Option<f64>,
    /// Case-insensitive substring
    pub organism: Option<String>,
    /// Case-insensitive substring
    pub tissue: Option<String>,
    pub limit: Option<usize>,
}

impl CandidateQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enzyme_type(mut self, enzyme_type: impl Into<String>) -> Self {
        self.enzyme_type = Some(enzyme_type.into());
        self
    }

    pub fn min_confidence(mut self, min: f64) -> Self {
        self.min_confidence = Some(min);
        self
    }

    pub fn organism(mut self, organism: impl Into<String>) -> Self {
        self.organism = Some(organism.into());
        self
    }

    pub fn tissue(mut self, tissue: impl Into<String>) -> Self {
        self.tissue = Some(tissue.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, record: &StoredCandidate) -> bool {
        let contains = |haystack: &str, needle: &Option<String>| match needle {
            Some(n) => haystack.to_lowercase().contains(&n.to_lowercase()),
            None => true,
        };
        self.enzyme_type.as_ref().map_or(true, |t| &record.enzyme_type == t)
            && self.min_confidence.map_or(true, |m| record.confidence >= m)
            && contains(&record.organism, &self.organism)
            && contains(&record.tissue, &self.tissue)
    }
}

// =============================================================================
// Statistics
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreStatistics {
    pub total_candidates: usize,
    pub unique_organisms: usize,
    /// Sorted by count descending, then name
    pub enzyme_type_counts: Vec<(String, usize)>,
    /// At most ten organisms, sorted like `enzyme_type_counts`
    pub top_organisms: Vec<(String, usize)>,
    pub keyword_counts: Vec<(String, usize)>,
    pub mean_confidence: f64,
}
