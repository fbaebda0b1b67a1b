/// Core entity types flowing through the discovery pipeline.
/// Raw retrieval records are validated once into `Candidate`s; each scoring
/// stage then produces a new `ScoredCandidate` snapshot.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::confidence::BlendWeights;
use crate::error::{Result, XylomyxError};

// ---------------------------------------------------------------------------
// Retrieval boundary
// ---------------------------------------------------------------------------

/// A sequence record as delivered by the retrieval layer. Every field may be
/// absent or null.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RawCandidate {
    #[serde(alias = "accession_id")]
    pub accession: Option<String>,
    pub organism: Option<String>,
    pub description: Option<String>,
    pub protein_name: Option<String>,
    pub gene_name: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub ec_number: Option<String>,
    pub tissue: Option<String>,
    pub stage: Option<String>,
    pub length: Option<usize>,
    pub sequence: Option<String>,
    #[serde(alias = "source_database")]
    pub source_db: Option<String>,
    pub features: Option<BTreeMap<String, String>>,
}

/// One discovered sequence with typed, defaulted metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Candidate {
    pub accession: String,
    pub organism: String,
    pub description: String,
    pub protein_name: String,
    pub gene_name: String,
    pub keywords: Vec<String>,
    pub ec_number: Option<String>,
    pub tissue: Option<String>,
    pub stage: Option<String>,
    pub length: usize,
    pub sequence: String,
    pub source_db: String,
    /// Feature qualifiers (key → value), e.g. `note`, `product`.
    pub features: BTreeMap<String, String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Candidate {
    /// Convert a raw record, or `None` when it has no usable accession.
    pub fn from_raw(raw: RawCandidate) -> Option<Self> {
        let accession = non_empty(raw.accession)?;
        let sequence = raw.sequence.unwrap_or_default();
        let length = raw.length.unwrap_or_else(|| sequence.chars().count());

        Some(Self {
            accession,
            organism: raw.organism.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            protein_name: raw.protein_name.unwrap_or_default(),
            gene_name: raw.gene_name.unwrap_or_default(),
            keywords: raw.keywords.unwrap_or_default(),
            ec_number: non_empty(raw.ec_number),
            tissue: non_empty(raw.tissue),
            stage: non_empty(raw.stage),
            length,
            sequence,
            source_db: raw.source_db.unwrap_or_else(|| "unknown".to_string()),
            features: raw.features.unwrap_or_default(),
        })
    }

    /// Feature qualifiers rendered as `key=value` pairs.
    pub fn features_text(&self) -> String {
        self.features
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn tissue_text(&self) -> &str {
        self.tissue.as_deref().unwrap_or("")
    }

    pub fn stage_text(&self) -> &str {
        self.stage.as_deref().unwrap_or("")
    }
}

/// Why a raw record was turned away at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    MissingAccession,
    DuplicateAccession,
}

#[derive(Debug, Clone, Serialize)]
pub struct RejectedRecord {
    /// Position in the raw input.
    pub index: usize,
    pub accession: Option<String>,
    pub reason: RejectionReason,
}

/// Validated candidates for one pipeline run. Accessions are non-empty and unique.
#[derive(Debug, Clone, Default)]
pub struct CandidateBatch {
    pub candidates: Vec<Candidate>,
    pub rejected: Vec<RejectedRecord>,
}

impl CandidateBatch {
    /// Validate raw records. The first record with a given accession wins.
    pub fn from_raw(raws: impl IntoIterator<Item = RawCandidate>) -> Self {
        let mut seen = HashSet::new();
        let mut batch = Self::default();

        for (index, raw) in raws.into_iter().enumerate() {
            let raw_accession = raw.accession.clone();
            match Candidate::from_raw(raw) {
                None => {
                    tracing::warn!(index, "Rejected record without accession");
                    batch.rejected.push(RejectedRecord {
                        index,
                        accession: raw_accession,
                        reason: RejectionReason::MissingAccession,
                    });
                }
                Some(candidate) if !seen.insert(candidate.accession.clone()) => {
                    tracing::warn!(index, accession = %candidate.accession, "Rejected duplicate accession");
                    batch.rejected.push(RejectedRecord {
                        index,
                        accession: Some(candidate.accession),
                        reason: RejectionReason::DuplicateAccession,
                    });
                }
                Some(candidate) => batch.candidates.push(candidate),
            }
        }

        batch
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnzymeMatch {
    pub enzyme_type: String,
    /// Matched keywords / configured keywords for this type.
    pub score: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Classification {
    /// Matched types in catalog order.
    pub enzyme_matches: Vec<EnzymeMatch>,
    pub family_codes: BTreeSet<String>,
    pub ec_numbers: BTreeSet<String>,
    pub is_gut_expressed: bool,
    pub keywords_found: BTreeSet<String>,
    /// Family code chosen for the matrix row.
    pub primary_family: Option<String>,
    /// EC number chosen for the matrix row.
    pub primary_ec: Option<String>,
    pub confidence: f64,
}

impl Classification {
    pub fn primary_enzyme_type(&self) -> Option<&str> {
        self.enzyme_matches.first().map(|m| m.enzyme_type.as_str())
    }

    pub fn mean_match_score(&self) -> Option<f64> {
        if self.enzyme_matches.is_empty() {
            return None;
        }
        let sum: f64 = self.enzyme_matches.iter().map(|m| m.score).sum();
        Some(sum / self.enzyme_matches.len() as f64)
    }

    pub fn best_match_score(&self) -> f64 {
        self.enzyme_matches
            .iter()
            .map(|m| m.score)
            .fold(0.0, f64::max)
    }
}

// ---------------------------------------------------------------------------
// Expression
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TissueSubtype {
    Midgut,
    Foregut,
    Hindgut,
    /// Any other digestive-tract term.
    Gut,
}

impl TissueSubtype {
    pub fn as_str(&self) -> &'static str {
        match self {
            TissueSubtype::Midgut  => "midgut",
            TissueSubtype::Foregut => "foregut",
            TissueSubtype::Hindgut => "hindgut",
            TissueSubtype::Gut     => "gut",
        }
    }

    /// True for the three named gut regions.
    pub fn is_specific_region(&self) -> bool {
        !matches!(self, TissueSubtype::Gut)
    }
}

/// Developmental stage or growth phase. Terms outside the insect life cycle
/// (e.g. termite castes, fungal growth phases) are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DevelopmentalStage {
    Larval,
    Pupal,
    Adult,
    Other(String),
}

impl DevelopmentalStage {
    /// Canonicalise a configured stage term.
    pub fn from_term(term: &str) -> Self {
        match term.trim().to_lowercase().as_str() {
            "larva" | "larval" | "larvae" => DevelopmentalStage::Larval,
            "pupa" | "pupal" | "pupae"    => DevelopmentalStage::Pupal,
            "adult"                       => DevelopmentalStage::Adult,
            other                         => DevelopmentalStage::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DevelopmentalStage::Larval   => "larval",
            DevelopmentalStage::Pupal    => "pupal",
            DevelopmentalStage::Adult    => "adult",
            DevelopmentalStage::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for DevelopmentalStage {
    fn from(s: String) -> Self {
        DevelopmentalStage::from_term(&s)
    }
}

impl From<DevelopmentalStage> for String {
    fn from(stage: DevelopmentalStage) -> Self {
        stage.as_str().to_string()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExpressionProfile {
    pub is_gut_expressed: bool,
    pub tissue: Option<TissueSubtype>,
    pub stage: Option<DevelopmentalStage>,
    pub score: f64,
}

// ---------------------------------------------------------------------------
// Homology
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HomologyHit {
    pub subject_id: String,
    #[serde(default)]
    pub subject_def: String,
    /// Percent identity, 0–100.
    pub identity: f64,
    /// Percent query coverage, 0–100.
    pub coverage: f64,
    pub evalue: f64,
    pub bitscore: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HomologyResult {
    /// Hits that passed the acceptance thresholds.
    pub hits: Vec<HomologyHit>,
    pub score: f64,
}

// ---------------------------------------------------------------------------
// Scored candidate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Classification,
    Expression,
    Homology,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Classification => "classification",
            PipelineStage::Expression     => "expression",
            PipelineStage::Homology       => "homology",
        }
    }
}

/// One entry of the confidence audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceStep {
    pub stage: PipelineStage,
    pub signal: f64,
    pub before: f64,
    pub after: f64,
}

/// A candidate with every scoring stage attached so far.
///
/// Stages attach in order: classification, then expression, then homology.
/// Each attachment consumes the snapshot and returns a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub classification: Classification,
    pub expression: Option<ExpressionProfile>,
    pub homology: Option<HomologyResult>,
    pub confidence: f64,
    pub history: Vec<ConfidenceStep>,
}

impl ScoredCandidate {
    pub fn classified(candidate: Candidate, classification: Classification) -> Self {
        let confidence = classification.confidence;
        Self {
            candidate,
            classification,
            expression: None,
            homology: None,
            confidence,
            history: vec![ConfidenceStep {
                stage: PipelineStage::Classification,
                signal: confidence,
                before: 0.0,
                after: confidence,
            }],
        }
    }

    /// Attach the expression result and blend its score into confidence.
    pub fn with_expression(mut self, expression: ExpressionProfile, weights: &BlendWeights) -> Result<Self> {
        if self.expression.is_some() || self.homology.is_some() {
            return Err(XylomyxError::Pipeline(format!(
                "{}: expression must be attached once, before homology",
                self.candidate.accession
            )));
        }
        let before = self.confidence;
        let after = weights.after_expression(before, expression.score);
        self.history.push(ConfidenceStep {
            stage: PipelineStage::Expression,
            signal: expression.score,
            before,
            after,
        });
        self.confidence = after;
        self.expression = Some(expression);
        Ok(self)
    }

    /// Attach the homology result and blend its score into confidence.
    pub fn with_homology(mut self, homology: HomologyResult, weights: &BlendWeights) -> Result<Self> {
        if self.homology.is_some() {
            return Err(XylomyxError::Pipeline(format!(
                "{}: homology already attached",
                self.candidate.accession
            )));
        }
        let before = self.confidence;
        let after = weights.after_homology(before, homology.score);
        self.history.push(ConfidenceStep {
            stage: PipelineStage::Homology,
            signal: homology.score,
            before,
            after,
        });
        self.confidence = after;
        self.homology = Some(homology);
        Ok(self)
    }

    pub fn accession(&self) -> &str {
        &self.candidate.accession
    }

    pub fn enzyme_type(&self) -> &str {
        self.classification.primary_enzyme_type().unwrap_or("unknown")
    }

    pub fn family_code(&self) -> &str {
        self.classification.primary_family.as_deref().unwrap_or("")
    }

    /// Annotated EC number, falling back to the raw field.
    pub fn ec_number(&self) -> &str {
        self.classification
            .primary_ec
            .as_deref()
            .or(self.candidate.ec_number.as_deref())
            .unwrap_or("")
    }

    /// Resolved tissue subtype once expression is attached, empty when it
    /// did not resolve. Before expression, the raw tissue label.
    pub fn tissue_label(&self) -> &str {
        match &self.expression {
            Some(expression) => expression.tissue.map(|t| t.as_str()).unwrap_or(""),
            None => self.candidate.tissue_text(),
        }
    }

    /// Resolved stage once expression is attached, empty when it did not
    /// resolve. Before expression, the raw stage label.
    pub fn stage_label(&self) -> &str {
        match &self.expression {
            Some(expression) => expression.stage.as_ref().map(|s| s.as_str()).unwrap_or(""),
            None => self.candidate.stage_text(),
        }
    }

    pub fn expression_score(&self) -> f64 {
        self.expression.as_ref().map(|e| e.score).unwrap_or(0.0)
    }

    pub fn homology_score(&self) -> f64 {
        self.homology.as_ref().map(|h| h.score).unwrap_or(0.0)
    }

    pub fn is_gut_expressed(&self) -> bool {
        match &self.expression {
            Some(e) => e.is_gut_expressed,
            None => self.classification.is_gut_expressed,
        }
    }
}
