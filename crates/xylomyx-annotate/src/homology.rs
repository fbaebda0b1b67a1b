//! Homology scoring from search hits.
//!
//! Hits are filtered by e-value, identity and coverage; the accepted hit with
//! the highest bit score determines the candidate's homology score.

use tracing::{debug, warn};

use xylomyx_common::{Candidate, HomologyHit, HomologyResult, HomologyThresholds};

use crate::homology_provider::HomologyProvider;

const IDENTITY_WEIGHT: f64 = 0.4;
const COVERAGE_WEIGHT: f64 = 0.3;
const EVALUE_WEIGHT: f64 = 0.3;

#[derive(Debug, Clone, Default)]
pub struct HomologyScorer {
    thresholds: HomologyThresholds,
}

impl HomologyScorer {
    pub fn new(thresholds: HomologyThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &HomologyThresholds {
        &self.thresholds
    }

    pub fn accepts(&self, hit: &HomologyHit) -> bool {
        hit.evalue <= self.thresholds.max_evalue
            && hit.identity >= self.thresholds.min_identity
            && hit.coverage >= self.thresholds.min_coverage
    }

    pub fn filter_hits(&self, hits: Vec<HomologyHit>) -> Vec<HomologyHit> {
        hits.into_iter().filter(|h| self.accepts(h)).collect()
    }

    /// Score of the highest-bit-score hit, 0.0 for no hits.
    pub fn score_hits(&self, hits: &[HomologyHit]) -> f64 {
        let Some(best) = hits
            .iter()
            .fold(None::<&HomologyHit>, |best, h| match best {
                Some(b) if b.bitscore >= h.bitscore => Some(b),
                _ => Some(h),
            })
        else {
            return 0.0;
        };

        let identity = (best.identity / 100.0).min(1.0);
        let coverage = (best.coverage / 100.0).min(1.0);
        let evalue = (1.0 - best.evalue / self.thresholds.max_evalue).max(0.0);

        (identity * IDENTITY_WEIGHT + coverage * COVERAGE_WEIGHT + evalue * EVALUE_WEIGHT).clamp(0.0, 1.0)
    }

    /// True when the sequence is long enough to search.
    pub fn is_searchable(&self, candidate: &Candidate) -> bool {
        candidate.sequence.chars().count() >= self.thresholds.min_sequence_length
    }

    /// Search and score one candidate.
    ///
    /// `None` means the stage did not run for this candidate: the sequence is
    /// too short or the provider failed.
    pub fn evaluate(&self, candidate: &Candidate, provider: &dyn HomologyProvider) -> Option<HomologyResult> {
        if !self.is_searchable(candidate) {
            debug!(accession = %candidate.accession, "Sequence too short for homology search");
            return None;
        }

        let hits = match provider.search(&candidate.accession, &candidate.sequence) {
            Ok(hits) => hits,
            Err(e) => {
                warn!(accession = %candidate.accession, provider = provider.name(), "Homology search failed: {e}");
                return None;
            }
        };

        let total = hits.len();
        let accepted = self.filter_hits(hits);
        let score = self.score_hits(&accepted);
        debug!(
            accession = %candidate.accession,
            total,
            accepted = accepted.len(),
            score,
            "Scored homology"
        );

        Some(HomologyResult { hits: accepted, score })
    }
}
