//! Batch-level summaries, filters and orderings over scored candidates.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::Serialize;
use tracing::info;

use xylomyx_common::{DevelopmentalStage, Result, ScoredCandidate, XylomyxError};

const HIGH_CONFIDENCE: f64 = 0.8;

fn bump(map: &mut BTreeMap<String, usize>, key: &str) {
    *map.entry(key.to_string()).or_insert(0) += 1;
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}

/// Counts over the classification results of a batch.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct AnnotationStatistics {
    pub total: usize,
    pub enzyme_types: BTreeMap<String, usize>,
    pub families: BTreeMap<String, usize>,
    pub ec_numbers: BTreeMap<String, usize>,
    pub organisms: BTreeMap<String, usize>,
    pub tissues: BTreeMap<String, usize>,
    pub mean_confidence: f64,
    pub high_confidence: usize,
}

impl AnnotationStatistics {
    pub fn from_candidates(candidates: &[ScoredCandidate]) -> Self {
        let mut stats = Self { total: candidates.len(), ..Default::default() };

        for c in candidates {
            bump(&mut stats.enzyme_types, c.enzyme_type());
            if !c.family_code().is_empty() {
                bump(&mut stats.families, c.family_code());
            }
            if !c.ec_number().is_empty() {
                bump(&mut stats.ec_numbers, c.ec_number());
            }
            let organism = if c.candidate.organism.is_empty() { "unknown" } else { c.candidate.organism.as_str() };
            bump(&mut stats.organisms, organism);
            let tissue = c.candidate.tissue.as_deref().unwrap_or("unknown");
            bump(&mut stats.tissues, tissue);
            if c.confidence >= HIGH_CONFIDENCE {
                stats.high_confidence += 1;
            }
        }
        stats.mean_confidence = mean(candidates.iter().map(|c| c.confidence));
        stats
    }
}

/// Counts over the expression results of a batch.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ExpressionStatistics {
    pub total: usize,
    pub gut_expressed: usize,
    pub tissue_subtypes: BTreeMap<String, usize>,
    pub stages: BTreeMap<String, usize>,
    pub mean_expression_score: f64,
}

impl ExpressionStatistics {
    pub fn from_candidates(candidates: &[ScoredCandidate]) -> Self {
        let mut stats = Self { total: candidates.len(), ..Default::default() };

        for c in candidates {
            let expression = c.expression.as_ref();
            if c.is_gut_expressed() {
                stats.gut_expressed += 1;
            }
            let tissue = expression.and_then(|e| e.tissue).map(|t| t.as_str()).unwrap_or("unknown");
            bump(&mut stats.tissue_subtypes, tissue);
            let stage = expression.and_then(|e| e.stage.as_ref()).map(|s| s.as_str()).unwrap_or("unknown");
            bump(&mut stats.stages, stage);
        }
        stats.mean_expression_score = mean(candidates.iter().map(|c| c.expression_score()));
        stats
    }
}

/// Keep candidates matching expression requirements.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressionFilter {
    pub require_gut: bool,
    pub require_larval: bool,
}

impl ExpressionFilter {
    pub fn matches(&self, candidate: &ScoredCandidate) -> bool {
        if self.require_gut && !candidate.is_gut_expressed() {
            return false;
        }
        if self.require_larval {
            let larval = candidate
                .expression
                .as_ref()
                .and_then(|e| e.stage.as_ref())
                .is_some_and(|s| *s == DevelopmentalStage::Larval);
            if !larval {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, candidates: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
        let before = candidates.len();
        let kept: Vec<_> = candidates.into_iter().filter(|c| self.matches(c)).collect();
        info!(
            before,
            after = kept.len(),
            gut = self.require_gut,
            larval = self.require_larval,
            "Applied expression filter"
        );
        kept
    }
}

/// Orderings over scored candidates, all descending and stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateOrder {
    Confidence,
    Length,
    /// Best per-type keyword match ratio
    EnzymeScore,
}

impl FromStr for CandidateOrder {
    type Err = XylomyxError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "confidence" => Ok(Self::Confidence),
            "length" => Ok(Self::Length),
            "enzyme_score" | "enzyme-score" => Ok(Self::EnzymeScore),
            other => Err(XylomyxError::InvalidArgument(format!(
                "unknown ranking criterion '{other}' (expected confidence, length or enzyme_score)"
            ))),
        }
    }
}

pub fn sort_candidates(candidates: &mut [ScoredCandidate], order: CandidateOrder) {
    match order {
        CandidateOrder::Confidence => candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence)),
        CandidateOrder::Length => candidates.sort_by(|a, b| b.candidate.length.cmp(&a.candidate.length)),
        CandidateOrder::EnzymeScore => candidates.sort_by(|a, b| {
            b.classification
                .best_match_score()
                .total_cmp(&a.classification.best_match_score())
        }),
    }
}
