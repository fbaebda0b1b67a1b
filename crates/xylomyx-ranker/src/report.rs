//! Plain-text discovery report.

use std::fmt::{self, Write as _};
use std::path::Path;

use chrono::Utc;
use tracing::info;

use xylomyx_common::Result;

use crate::matrix::RankedMatrix;
use crate::ranking::RankCriterion;
use crate::summary::by_count;

const RULE_WIDTH: usize = 80;

#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Banner line, e.g. "EMERALD ASH BORER DIGESTIVE ENZYME DISCOVERY REPORT"
    pub title: String,
    /// Candidates listed in the detail section
    pub top_n: usize,
    /// Accessions listed per cluster before truncation
    pub cluster_preview: usize,
    /// Order the rows are in, named in the detail heading
    pub ordering: RankCriterion,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: "DIGESTIVE ENZYME DISCOVERY REPORT".to_string(),
            top_n: 20,
            cluster_preview: 10,
            ordering: RankCriterion::Confidence,
        }
    }
}

impl ReportOptions {
    pub fn for_organism(name: &str) -> Self {
        Self {
            title: format!("{} DIGESTIVE ENZYME DISCOVERY REPORT", name.to_uppercase()),
            ..Default::default()
        }
    }
}

impl RankedMatrix {
    pub fn render_report(&self, options: &ReportOptions) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = self.render(options, &mut out);
        out
    }

    fn render(&self, options: &ReportOptions, out: &mut String) -> fmt::Result {
        let summary = self.summary();
        let heavy = "=".repeat(RULE_WIDTH);
        let light = "-".repeat(RULE_WIDTH);

        writeln!(out, "{heavy}\n{}\n{heavy}", options.title)?;
        writeln!(out, "Generated: {}\n", Utc::now().format("%Y-%m-%d %H:%M:%S UTC"))?;

        writeln!(out, "SUMMARY STATISTICS\n{light}")?;
        writeln!(out, "Total Enzymes Identified: {}", summary.total_enzymes)?;
        writeln!(out, "Unique Enzyme Types: {}", summary.unique_enzyme_types)?;
        writeln!(out, "Average Confidence: {:.2}", summary.mean_confidence)?;
        writeln!(out, "High Confidence (>={}): {}", self.high_confidence(), summary.high_confidence_count)?;
        writeln!(out, "Gut-Expressed: {}", summary.gut_expressed_count)?;
        writeln!(out, "Larval Stage: {}\n", summary.larval_stage_count)?;

        for (heading, distribution) in [
            ("ENZYME TYPE DISTRIBUTION", &summary.enzyme_distribution),
            ("ORGANISM DISTRIBUTION", &summary.organism_distribution),
            ("FAMILY DISTRIBUTION", &summary.family_distribution),
        ] {
            writeln!(out, "{heading}\n{light}")?;
            for (key, count) in by_count(distribution) {
                writeln!(out, "  {key}: {count}")?;
            }
            writeln!(out)?;
        }

        writeln!(out, "FUNCTIONAL ENZYME CLUSTERS\n{light}")?;
        for (cluster, accessions) in self.clusters() {
            writeln!(out, "\n{} ({} enzymes):", cluster.label(), accessions.len())?;
            for accession in accessions.iter().take(options.cluster_preview) {
                writeln!(out, "  - {accession}")?;
            }
            if accessions.len() > options.cluster_preview {
                writeln!(out, "  ... and {} more", accessions.len() - options.cluster_preview)?;
            }
        }

        writeln!(
            out,
            "\n{heavy}\nTOP {} CANDIDATE ENZYMES (by {})\n{heavy}",
            options.top_n,
            options.ordering.label()
        )?;
        if self.is_empty() {
            writeln!(out, "\nNo candidates found.")?;
        }
        for row in self.rows.iter().take(options.top_n) {
            writeln!(out, "\n{} - {}", row.accession, row.enzyme_type)?;
            writeln!(out, "  Protein: {}", row.protein_name)?;
            writeln!(out, "  Organism: {}", row.organism)?;
            writeln!(out, "  Tissue: {} | Stage: {}", row.tissue, row.stage)?;
            writeln!(out, "  EC: {} | Family: {}", row.ec_number, row.family)?;
            writeln!(
                out,
                "  Confidence: {:.3} | Expression: {:.3} | Homology: {:.3}",
                row.confidence, row.expression_score, row.homology_score
            )?;
            writeln!(out, "  Function: {}", row.function)?;
        }
        Ok(())
    }

    pub fn write_report(&self, options: &ReportOptions, path: &Path) -> Result<()> {
        std::fs::write(path, self.render_report(options))?;
        info!(path = %path.display(), "Wrote discovery report");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{MatrixBuilder, MatrixRow};

    fn row(i: usize, enzyme: &str) -> MatrixRow {
        MatrixRow {
            accession: format!("XP_{i:03}"),
            gene_name: String::new(),
            protein_name: format!("{enzyme} {i}"),
            enzyme_type: enzyme.to_string(),
            family: "GH5".to_string(),
            ec_number: String::new(),
            organism: "Agrilus planipennis".to_string(),
            tissue: "midgut".to_string(),
            stage: "larval".to_string(),
            length: 300,
            confidence: 0.9,
            expression_score: 1.0,
            homology_score: 0.0,
            function: "Cellulose hydrolysis".to_string(),
        }
    }

    #[test]
    fn test_report_sections() {
        let matrix = RankedMatrix::from_rows((0..12).map(|i| row(i, "cellulase")).collect());
        let report = matrix.render_report(&ReportOptions::for_organism("Emerald Ash Borer"));

        assert!(report.contains("EMERALD ASH BORER DIGESTIVE ENZYME DISCOVERY REPORT"));
        assert!(report.contains("Total Enzymes Identified: 12"));
        assert!(report.contains("  cellulase: 12"));
        assert!(report.contains("Cellulose Degradation (12 enzymes):"));
        assert!(report.contains("  - XP_009\n  ... and 2 more"));
        assert!(report.contains("Lignin Degradation (0 enzymes):"));
        assert!(report.contains("High Confidence (>=0.8): 12"));
        assert!(report.contains("TOP 20 CANDIDATE ENZYMES (by confidence)"));
        assert!(report.contains("XP_011 - cellulase"));
    }

    #[test]
    fn test_top_n_limits_details() {
        let matrix = RankedMatrix::from_rows((0..5).map(|i| row(i, "laccase")).collect());
        let options = ReportOptions { top_n: 2, ..Default::default() };
        let report = matrix.render_report(&options);
        assert!(report.contains("XP_001 - laccase"));
        assert!(!report.contains("XP_002 - laccase"));
    }

    #[test]
    fn test_heading_follows_threshold_and_ordering() {
        let mut matrix = MatrixBuilder::default().with_high_confidence(0.95).build(&[]);
        matrix.rows = (0..3).map(|i| row(i, "cellulase")).collect();
        matrix.rerank(RankCriterion::Overall);

        let options = ReportOptions { ordering: RankCriterion::Overall, ..Default::default() };
        let report = matrix.render_report(&options);
        assert!(report.contains("High Confidence (>=0.95): 0"));
        assert!(report.contains("TOP 20 CANDIDATE ENZYMES (by overall)"));
        assert!(!report.contains(">=0.8"));
    }

    #[test]
    fn test_empty_report() {
        let matrix = RankedMatrix::from_rows(vec![]);
        let report = matrix.render_report(&ReportOptions::default());
        assert!(report.contains("Total Enzymes Identified: 0"));
        assert!(report.contains("Average Confidence: 0.00"));
        assert!(report.contains("No candidates found."));
    }
}
