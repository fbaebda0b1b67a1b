//! Alternate orderings of the matrix.

use std::str::FromStr;

use xylomyx_common::{Result, XylomyxError};

use crate::matrix::{MatrixRow, RankedMatrix};

/// Composite rank score weights: confidence, expression, homology.
const RANK_WEIGHTS: [f64; 3] = [0.5, 0.3, 0.2];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankCriterion {
    /// Composite of confidence, expression and homology
    Overall,
    /// The order a freshly built matrix already has
    #[default]
    Confidence,
    Expression,
    Homology,
}

impl FromStr for RankCriterion {
    type Err = XylomyxError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "overall" => Ok(Self::Overall),
            "confidence" => Ok(Self::Confidence),
            "expression" => Ok(Self::Expression),
            "homology" | "blast" => Ok(Self::Homology),
            other => Err(XylomyxError::InvalidArgument(format!(
                "unsupported ranking criterion '{other}' (expected overall, confidence, expression or homology)"
            ))),
        }
    }
}

impl RankCriterion {
    /// Lowercase name, as accepted by `from_str`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Overall => "overall",
            Self::Confidence => "confidence",
            Self::Expression => "expression",
            Self::Homology => "homology",
        }
    }
}

impl MatrixRow {
    pub fn rank_score(&self) -> f64 {
        self.confidence * RANK_WEIGHTS[0]
            + self.expression_score * RANK_WEIGHTS[1]
            + self.homology_score * RANK_WEIGHTS[2]
    }

    fn rank_key(&self, criterion: RankCriterion) -> f64 {
        match criterion {
            RankCriterion::Overall => self.rank_score(),
            RankCriterion::Confidence => self.confidence,
            RankCriterion::Expression => self.expression_score,
            RankCriterion::Homology => self.homology_score,
        }
    }
}

impl RankedMatrix {
    /// Rows reordered by `criterion`, descending. Ties keep matrix order.
    pub fn ranked(&self, criterion: RankCriterion) -> Vec<MatrixRow> {
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| b.rank_key(criterion).total_cmp(&a.rank_key(criterion)));
        rows
    }

    /// Reorder in place.
    pub fn rerank(&mut self, criterion: RankCriterion) {
        self.rows.sort_by(|a, b| b.rank_key(criterion).total_cmp(&a.rank_key(criterion)));
    }
}
