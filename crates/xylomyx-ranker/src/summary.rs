//! Aggregate statistics over a ranked matrix.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::matrix::MatrixRow;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatrixSummary {
    pub total_enzymes: usize,
    pub unique_enzyme_types: usize,
    pub enzyme_distribution: BTreeMap<String, usize>,
    pub organism_distribution: BTreeMap<String, usize>,
    pub tissue_distribution: BTreeMap<String, usize>,
    pub stage_distribution: BTreeMap<String, usize>,
    pub family_distribution: BTreeMap<String, usize>,
    pub mean_confidence: f64,
    pub high_confidence_count: usize,
    pub gut_expressed_count: usize,
    pub larval_stage_count: usize,
}

fn count_non_empty<'a>(values: impl Iterator<Item = &'a str>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for v in values.filter(|v| !v.is_empty()) {
        *counts.entry(v.to_string()).or_insert(0) += 1;
    }
    counts
}

impl MatrixSummary {
    pub fn from_rows(rows: &[MatrixRow], high_confidence: f64) -> Self {
        if rows.is_empty() {
            return Self::default();
        }

        let enzyme_distribution = count_non_empty(rows.iter().map(|r| r.enzyme_type.as_str()));

        Self {
            total_enzymes: rows.len(),
            unique_enzyme_types: enzyme_distribution.len(),
            enzyme_distribution,
            organism_distribution: count_non_empty(rows.iter().map(|r| r.organism.as_str())),
            tissue_distribution: count_non_empty(rows.iter().map(|r| r.tissue.as_str())),
            stage_distribution: count_non_empty(rows.iter().map(|r| r.stage.as_str())),
            family_distribution: count_non_empty(rows.iter().map(|r| r.family.as_str())),
            mean_confidence: rows.iter().map(|r| r.confidence).sum::<f64>() / rows.len() as f64,
            high_confidence_count: rows.iter().filter(|r| r.confidence >= high_confidence).count(),
            gut_expressed_count: rows.iter().filter(|r| r.tissue.contains("gut")).count(),
            larval_stage_count: rows.iter().filter(|r| r.stage.contains("larval")).count(),
        }
    }
}

/// Distribution entries by descending count; ties in key order.
pub fn by_count(distribution: &BTreeMap<String, usize>) -> Vec<(&str, usize)> {
    let mut entries: Vec<(&str, usize)> = distribution.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(accession: &str, enzyme: &str, tissue: &str, stage: &str, family: &str, confidence: f64) -> MatrixRow {
        MatrixRow {
            accession: accession.to_string(),
            gene_name: String::new(),
            protein_name: String::new(),
            enzyme_type: enzyme.to_string(),
            family: family.to_string(),
            ec_number: String::new(),
            organism: "Agrilus planipennis".to_string(),
            tissue: tissue.to_string(),
            stage: stage.to_string(),
            length: 300,
            confidence,
            expression_score: 0.0,
            homology_score: 0.0,
            function: String::new(),
        }
    }

    #[test]
    fn test_empty_summary_is_zero() {
        let summary = MatrixSummary::from_rows(&[], 0.8);
        assert_eq!(summary, MatrixSummary::default());
        assert_eq!(summary.mean_confidence, 0.0);
    }

    #[test]
    fn test_summary_counts() {
        let rows = vec![
            row("A", "cellulase", "midgut", "larval", "GH5", 0.9),
            row("B", "cellulase", "Gut", "adult", "", 0.6),
            row("C", "laccase", "", "", "AA1", 0.6),
        ];
        let summary = MatrixSummary::from_rows(&rows, 0.8);

        assert_eq!(summary.total_enzymes, 3);
        assert_eq!(summary.unique_enzyme_types, 2);
        assert_eq!(summary.enzyme_distribution["cellulase"], 2);
        assert_eq!(summary.family_distribution.len(), 2);
        assert_eq!(summary.tissue_distribution.len(), 2);
        assert!(!summary.stage_distribution.contains_key(""));
        assert!((summary.mean_confidence - 0.7).abs() < 1e-9);
        assert_eq!(summary.high_confidence_count, 1);
        // "Gut" does not contain lowercase "gut"
        assert_eq!(summary.gut_expressed_count, 1);
        assert_eq!(summary.larval_stage_count, 1);
    }

    #[test]
    fn test_by_count_orders_descending() {
        let rows = vec![
            row("A", "laccase", "", "", "", 0.9),
            row("B", "xylanase", "", "", "", 0.9),
            row("C", "xylanase", "", "", "", 0.9),
            row("D", "cellulase", "", "", "", 0.9),
        ];
        let summary = MatrixSummary::from_rows(&rows, 0.8);
        assert_eq!(
            by_count(&summary.enzyme_distribution),
            vec![("xylanase", 2), ("cellulase", 1), ("laccase", 1)]
        );
    }
}
