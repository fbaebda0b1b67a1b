/// Confidence scoring and blending for enzyme candidates.
///
/// Classification confidence is an additive evidence score; later pipeline
/// stages fold their own signal into it with a fixed-weight blend.

use serde::{Deserialize, Serialize};

/// Number of distinct keyword hits at which the keyword term saturates.
pub const KEYWORD_SATURATION: f64 = 5.0;

/// Weights of the independent evidence terms in classification confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceWeights {
    #[serde(default = "default_keyword_weight")]
    pub keyword_match: f64,
    #[serde(default = "default_ec_weight")]
    pub ec_match: f64,
    #[serde(default = "default_family_weight")]
    pub family_match: f64,
    #[serde(default = "default_gut_weight")]
    pub gut_tissue: f64,
    /// Multiplier applied to the mean per-type match ratio.
    #[serde(default = "default_type_weight")]
    pub enzyme_type_match: f64,
}

fn default_keyword_weight() -> f64 { 0.10 }
fn default_ec_weight() -> f64 { 0.15 }
fn default_family_weight() -> f64 { 0.15 }
fn default_gut_weight() -> f64 { 0.10 }
fn default_type_weight() -> f64 { 0.20 }

impl Default for EvidenceWeights {
    fn default() -> Self {
        Self {
            keyword_match: default_keyword_weight(),
            ec_match: default_ec_weight(),
            family_match: default_family_weight(),
            gut_tissue: default_gut_weight(),
            enzyme_type_match: default_type_weight(),
        }
    }
}

impl EvidenceWeights {
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.keyword_match,
            self.ec_match,
            self.family_match,
            self.gut_tissue,
            self.enzyme_type_match,
        ]
    }

    /// All weights must be finite and non-negative.
    pub fn validate(&self) -> bool {
        self.as_array().iter().all(|w| w.is_finite() && *w >= 0.0)
    }
}

/// Evidence gathered by the classifier for one candidate.
#[derive(Debug, Clone, Default)]
pub struct ConfidenceEvidence {
    pub keywords_found: usize,
    pub has_ec_number: bool,
    pub has_family_code: bool,
    pub is_gut_expressed: bool,
    /// Mean of per-type match ratios, `None` when no enzyme type matched.
    pub mean_type_score: Option<f64>,
}

/// Compute classification confidence from the gathered evidence.
/// Returns value in [0.0, 1.0].
pub fn compute_classification_confidence(evidence: &ConfidenceEvidence, weights: &EvidenceWeights) -> f64 {
    let mut confidence = 0.0;

    if evidence.keywords_found > 0 {
        let keyword_score = (evidence.keywords_found as f64 / KEYWORD_SATURATION).min(1.0);
        confidence += weights.keyword_match * keyword_score;
    }

    if evidence.has_ec_number {
        confidence += weights.ec_match;
    }

    if evidence.has_family_code {
        confidence += weights.family_match;
    }

    if evidence.is_gut_expressed {
        confidence += weights.gut_tissue;
    }

    if let Some(mean) = evidence.mean_type_score {
        confidence += weights.enzyme_type_match * mean.clamp(0.0, 1.0);
    }

    // Cap at 1.0
    confidence.min(1.0)
}

/// Share of the new signal in each sequential blend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendWeights {
    /// c' = c × (1 − w) + expression × w
    #[serde(default = "default_expression_blend")]
    pub expression: f64,
    /// c' = c × (1 − w) + homology × w
    #[serde(default = "default_homology_blend")]
    pub homology: f64,
}

fn default_expression_blend() -> f64 { 0.3 }
fn default_homology_blend() -> f64 { 0.4 }

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            expression: default_expression_blend(),
            homology: default_homology_blend(),
        }
    }
}

impl BlendWeights {
    /// Both weights must lie in [0, 1].
    pub fn validate(&self) -> bool {
        [self.expression, self.homology]
            .iter()
            .all(|w| (0.0..=1.0).contains(w))
    }

    pub fn after_expression(&self, previous: f64, expression_score: f64) -> f64 {
        blend(previous, expression_score, self.expression)
    }

    pub fn after_homology(&self, previous: f64, homology_score: f64) -> f64 {
        blend(previous, homology_score, self.homology)
    }
}

/// Weighted blend of the running confidence with a new stage signal.
pub fn blend(previous: f64, signal: f64, signal_weight: f64) -> f64 {
    (previous * (1.0 - signal_weight) + signal * signal_weight).clamp(0.0, 1.0)
}
