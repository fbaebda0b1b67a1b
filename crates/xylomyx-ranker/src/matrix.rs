//! Digestive enzyme matrix: the filtered, ranked table of accepted candidates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};
use tracing::info;

use xylomyx_common::{MatrixConfig, ScoredCandidate};

use crate::function_map::{infer_function, Cluster};
use crate::summary::MatrixSummary;

fn round3<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64((value * 1000.0).round() / 1000.0)
}

/// One accepted candidate, frozen at matrix-build time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixRow {
    pub accession: String,
    pub gene_name: String,
    pub protein_name: String,
    pub enzyme_type: String,
    pub family: String,
    pub ec_number: String,
    pub organism: String,
    pub tissue: String,
    pub stage: String,
    pub length: usize,
    #[serde(serialize_with = "round3")]
    pub confidence: f64,
    #[serde(serialize_with = "round3")]
    pub expression_score: f64,
    #[serde(serialize_with = "round3")]
    pub homology_score: f64,
    pub function: String,
}

impl MatrixRow {
    pub fn from_scored(scored: &ScoredCandidate) -> Self {
        let enzyme_type = scored.enzyme_type().to_string();
        Self {
            accession: scored.accession().to_string(),
            gene_name: scored.candidate.gene_name.clone(),
            protein_name: scored.candidate.protein_name.clone(),
            function: infer_function(&enzyme_type).to_string(),
            enzyme_type,
            family: scored.family_code().to_string(),
            ec_number: scored.ec_number().to_string(),
            organism: scored.candidate.organism.clone(),
            tissue: scored.tissue_label().to_string(),
            stage: scored.stage_label().to_string(),
            length: scored.candidate.length,
            confidence: scored.confidence,
            expression_score: scored.expression_score(),
            homology_score: scored.homology_score(),
        }
    }

    pub fn cluster(&self) -> Cluster {
        Cluster::for_enzyme(&self.enzyme_type)
    }
}

#[derive(Debug, Clone)]
pub struct MatrixBuilder {
    min_confidence: f64,
    high_confidence: f64,
}

impl Default for MatrixBuilder {
    fn default() -> Self {
        Self::new(&MatrixConfig::default())
    }
}

impl MatrixBuilder {
    pub fn new(config: &MatrixConfig) -> Self {
        Self {
            min_confidence: config.min_confidence,
            high_confidence: config.high_confidence,
        }
    }

    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    pub fn with_high_confidence(mut self, high_confidence: f64) -> Self {
        self.high_confidence = high_confidence;
        self
    }

    pub fn min_confidence(&self) -> f64 {
        self.min_confidence
    }

    /// Keep candidates at or above the threshold, sorted by confidence
    /// descending. Ties keep input order.
    pub fn build(&self, candidates: &[ScoredCandidate]) -> RankedMatrix {
        let mut rows: Vec<MatrixRow> = candidates
            .iter()
            .filter(|c| c.confidence >= self.min_confidence)
            .map(MatrixRow::from_scored)
            .collect();
        rows.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        info!(
            candidates = candidates.len(),
            rows = rows.len(),
            min_confidence = self.min_confidence,
            "Built digestive matrix"
        );

        RankedMatrix {
            rows,
            high_confidence: self.high_confidence,
        }
    }
}

/// Filtered candidates in confidence order.
#[derive(Debug, Clone, Serialize)]
pub struct RankedMatrix {
    pub rows: Vec<MatrixRow>,
    #[serde(skip)]
    high_confidence: f64,
}

impl RankedMatrix {
    pub fn from_rows(rows: Vec<MatrixRow>) -> Self {
        Self {
            rows,
            high_confidence: MatrixConfig::default().high_confidence,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Confidence at or above which a row counts as high confidence.
    pub fn high_confidence(&self) -> f64 {
        self.high_confidence
    }

    pub fn summary(&self) -> MatrixSummary {
        MatrixSummary::from_rows(&self.rows, self.high_confidence)
    }

    /// Accessions grouped by functional cluster, every cluster present.
    pub fn clusters(&self) -> BTreeMap<Cluster, Vec<String>> {
        let mut clusters: BTreeMap<Cluster, Vec<String>> =
            Cluster::ALL.iter().map(|c| (*c, Vec::new())).collect();
        for row in &self.rows {
            clusters.entry(row.cluster()).or_default().push(row.accession.clone());
        }
        clusters
    }
}
