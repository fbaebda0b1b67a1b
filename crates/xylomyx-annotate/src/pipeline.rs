//! Staged annotation pipeline.
//!
//! Runs a validated candidate batch through the scoring stages in order:
//!   1. Classify each candidate from its metadata
//!   2. Score tissue and stage expression, blend into confidence
//!   3. Search homology (when a provider is configured), blend into confidence
//!
//! Each stage is a pure per-candidate transform applied as an order-preserving
//! map over the batch (parallel with the `parallel` feature).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use xylomyx_common::{BlendWeights, Candidate, CandidateBatch, DiscoveryProfile, Result, ScoredCandidate};

use crate::classifier::EnzymeClassifier;
use crate::expression::ExpressionScorer;
use crate::homology::HomologyScorer;
use crate::homology_provider::HomologyProvider;

/// Batches at or below this size run sequentially.
const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

// ── Result summary ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub candidates: Vec<ScoredCandidate>,
    /// Records turned away at the boundary
    pub rejected: usize,
    pub gut_expressed: usize,
    pub homology_scored: usize,
    pub homology_skipped: usize,
    pub duration_ms: u64,
}

impl PipelineReport {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

pub struct AnnotationPipeline {
    classifier: EnzymeClassifier,
    expression: ExpressionScorer,
    homology: HomologyScorer,
    blend: BlendWeights,
    provider: Option<Arc<dyn HomologyProvider>>,
    parallel_threshold: usize,
}

impl AnnotationPipeline {
    pub fn new(profile: &DiscoveryProfile) -> Result<Self> {
        profile.validate()?;
        Ok(Self {
            classifier: EnzymeClassifier::new(profile)?,
            expression: ExpressionScorer::new(profile),
            homology: HomologyScorer::new(profile.homology.clone()),
            blend: profile.scoring.blend.clone(),
            provider: None,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        })
    }

    /// Enable the homology stage.
    pub fn with_homology_provider(mut self, provider: Arc<dyn HomologyProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set to 0 to always run sequentially.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn has_homology(&self) -> bool {
        self.provider.is_some()
    }

    pub fn classify(&self, candidate: Candidate) -> ScoredCandidate {
        let classification = self.classifier.classify(&candidate);
        ScoredCandidate::classified(candidate, classification)
    }

    pub fn validate_expression(&self, scored: ScoredCandidate) -> Result<ScoredCandidate> {
        let expression = self.expression.score(&scored.candidate);
        scored.with_expression(expression, &self.blend)
    }

    /// Attach homology when a provider is configured and the search ran;
    /// otherwise the candidate passes through unchanged.
    pub fn apply_homology(&self, scored: ScoredCandidate) -> Result<ScoredCandidate> {
        let Some(provider) = &self.provider else {
            return Ok(scored);
        };
        match self.homology.evaluate(&scored.candidate, provider.as_ref()) {
            Some(result) => scored.with_homology(result, &self.blend),
            None => Ok(scored),
        }
    }

    /// All stages for one candidate.
    pub fn process(&self, candidate: Candidate) -> Result<ScoredCandidate> {
        let scored = self.classify(candidate);
        let scored = self.validate_expression(scored)?;
        self.apply_homology(scored)
    }

    #[instrument(skip(self, batch), fields(candidates = batch.len()))]
    pub fn run(&self, batch: CandidateBatch) -> Result<PipelineReport> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let t0 = std::time::Instant::now();
        let rejected = batch.rejected.len();

        info!(run_id = %run_id, candidates = batch.len(), rejected, "Starting annotation pipeline");

        // ── 1. Classification ─────────────────────────────────────────────────
        let classified = self.map_ordered(batch.candidates, |c| self.classify(c));
        let typed = classified.iter().filter(|s| !s.classification.enzyme_matches.is_empty()).count();
        info!(classified = classified.len(), typed, "Classification complete");

        // ── 2. Expression ─────────────────────────────────────────────────────
        let expressed = self
            .map_ordered(classified, |s| self.validate_expression(s))
            .into_iter()
            .collect::<Result<Vec<_>>>()?;
        let gut_expressed = expressed.iter().filter(|s| s.is_gut_expressed()).count();
        info!(gut_expressed, "Expression validation complete");

        // ── 3. Homology ───────────────────────────────────────────────────────
        let candidates = if self.provider.is_some() {
            self.map_ordered(expressed, |s| self.apply_homology(s))
                .into_iter()
                .collect::<Result<Vec<_>>>()?
        } else {
            expressed
        };
        let homology_scored = candidates.iter().filter(|s| s.homology.is_some()).count();
        let homology_skipped = if self.provider.is_some() { candidates.len() - homology_scored } else { 0 };
        if self.provider.is_some() {
            info!(homology_scored, homology_skipped, "Homology scoring complete");
        }

        let duration_ms = t0.elapsed().as_millis() as u64;
        info!(run_id = %run_id, duration_ms, "Annotation pipeline finished");

        Ok(PipelineReport {
            run_id,
            started_at,
            candidates,
            rejected,
            gut_expressed,
            homology_scored,
            homology_skipped,
            duration_ms,
        })
    }

    /// Order-preserving map, parallel for batches above the threshold.
    fn map_ordered<T, U, F>(&self, items: Vec<T>, f: F) -> Vec<U>
    where
        T: Send,
        U: Send,
        F: Fn(T) -> U + Send + Sync,
    {
        #[cfg(feature = "parallel")]
        {
            if self.parallel_threshold > 0 && items.len() > self.parallel_threshold {
                use rayon::prelude::*;
                return items.into_par_iter().map(f).collect();
            }
        }
        items.into_iter().map(f).collect()
    }
}
