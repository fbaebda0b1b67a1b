//! Tissue and developmental-stage relevance scoring.

use tracing::debug;

use xylomyx_common::{Candidate, DevelopmentalStage, DiscoveryProfile, ExpressionProfile, TissueSubtype};

use crate::classifier::contains_any_term;

const GUT_EXPRESSED_BONUS: f64 = 0.4;
const GUT_REGION_BONUS: f64 = 0.2;
const STAGE_BONUS: f64 = 0.2;
const LARVAL_BONUS: f64 = 0.2;

/// Scores how likely a candidate is expressed in the digestive tract at a
/// wood-feeding stage.
#[derive(Debug, Clone)]
pub struct ExpressionScorer {
    gut_terms: Vec<String>,
    stage_terms: Vec<String>,
}

impl ExpressionScorer {
    pub fn new(profile: &DiscoveryProfile) -> Self {
        let lower = |terms: &[String]| {
            terms
                .iter()
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
        };
        Self {
            gut_terms: lower(&profile.gut_terms),
            stage_terms: lower(&profile.stage_terms),
        }
    }

    pub fn is_gut_expressed(&self, candidate: &Candidate) -> bool {
        if contains_any_term(&self.gut_terms, &[candidate.tissue_text()]) {
            return true;
        }
        let corpus = format!(
            "{} {} {}",
            candidate.description,
            candidate.protein_name,
            candidate.keywords.join(" ")
        );
        contains_any_term(&self.gut_terms, &[corpus.as_str()])
    }

    /// Named gut region from the tissue field, falling back to generic gut.
    pub fn tissue_subtype(&self, candidate: &Candidate) -> Option<TissueSubtype> {
        let tissue = candidate.tissue_text().to_lowercase();
        if tissue.contains("midgut") {
            Some(TissueSubtype::Midgut)
        } else if tissue.contains("foregut") {
            Some(TissueSubtype::Foregut)
        } else if tissue.contains("hindgut") {
            Some(TissueSubtype::Hindgut)
        } else if self.gut_terms.iter().any(|t| tissue.contains(t.as_str())) {
            Some(TissueSubtype::Gut)
        } else {
            None
        }
    }

    /// Stage from the explicit field, then from configured terms in the
    /// description. The first configured term found wins.
    pub fn developmental_stage(&self, candidate: &Candidate) -> Option<DevelopmentalStage> {
        let stage = candidate.stage_text().to_lowercase();
        if stage.contains("larva") {
            return Some(DevelopmentalStage::Larval);
        } else if stage.contains("adult") {
            return Some(DevelopmentalStage::Adult);
        } else if stage.contains("pupa") {
            return Some(DevelopmentalStage::Pupal);
        }

        let description = candidate.description.to_lowercase();
        [stage.as_str(), description.as_str()]
            .iter()
            .filter(|text| !text.is_empty())
            .find_map(|text| self.stage_terms.iter().find(|term| text.contains(term.as_str())))
            .map(|term| DevelopmentalStage::from_term(term))
    }

    pub fn score(&self, candidate: &Candidate) -> ExpressionProfile {
        let is_gut_expressed = self.is_gut_expressed(candidate);
        let tissue = self.tissue_subtype(candidate);
        let stage = self.developmental_stage(candidate);

        let mut score = 0.0;
        if is_gut_expressed {
            score += GUT_EXPRESSED_BONUS;
            if tissue.is_some_and(|t| t.is_specific_region()) {
                score += GUT_REGION_BONUS;
            }
        }
        if let Some(stage) = &stage {
            score += STAGE_BONUS;
            if *stage == DevelopmentalStage::Larval {
                score += LARVAL_BONUS;
            }
        }
        let score: f64 = score.min(1.0);

        debug!(
            accession = %candidate.accession,
            gut = is_gut_expressed,
            stage = stage.as_ref().map(|s| s.as_str()).unwrap_or("none"),
            score,
            "Scored expression"
        );

        ExpressionProfile {
            is_gut_expressed,
            tissue,
            stage,
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> ExpressionScorer {
        ExpressionScorer::new(&DiscoveryProfile::default())
    }

    fn candidate(tissue: Option<&str>, stage: Option<&str>, description: &str) -> Candidate {
        Candidate {
            accession: "A1".to_string(),
            tissue: tissue.map(str::to_string),
            stage: stage.map(str::to_string),
            description: description.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_larval_midgut_scores_full() {
        let profile = scorer().score(&candidate(Some("larval midgut"), Some("larva"), ""));
        assert!(profile.is_gut_expressed);
        assert_eq!(profile.tissue, Some(TissueSubtype::Midgut));
        assert_eq!(profile.stage, Some(DevelopmentalStage::Larval));
        assert!((profile.score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_generic_gut_adult() {
        let profile = scorer().score(&candidate(Some("digestive tract"), Some("Adult"), ""));
        assert_eq!(profile.tissue, Some(TissueSubtype::Gut));
        assert_eq!(profile.stage, Some(DevelopmentalStage::Adult));
        assert!((profile.score - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_subtype_priority() {
        let s = scorer();
        assert_eq!(s.tissue_subtype(&candidate(Some("hindgut and foregut"), None, "")), Some(TissueSubtype::Foregut));
        assert_eq!(s.tissue_subtype(&candidate(Some("fat body"), None, "")), None);
    }

    #[test]
    fn test_gut_from_description_has_no_region_bonus() {
        let profile = scorer().score(&candidate(None, None, "midgut cellulase"));
        assert!(profile.is_gut_expressed);
        assert_eq!(profile.tissue, None);
        assert!((profile.score - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_stage_from_description() {
        let s = scorer();
        let stage = s.developmental_stage(&candidate(None, None, "expressed in pupal tissue"));
        assert_eq!(stage, Some(DevelopmentalStage::Pupal));

        // First configured term wins: "larva" precedes "adult"
        let stage = s.developmental_stage(&candidate(None, None, "adult and larva"));
        assert_eq!(stage, Some(DevelopmentalStage::Larval));
    }

    #[test]
    fn test_larval_bonus_counted_once() {
        // gut 0.4 + stage 0.2 + larval 0.2, no region
        let profile = scorer().score(&candidate(Some("gut"), Some("larval"), "larval gut"));
        assert!((profile.score - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_profile_stage_terms_read_from_stage_field() {
        let termite = DiscoveryProfile::preset("termite").unwrap();
        let s = ExpressionScorer::new(&termite);
        let profile = s.score(&candidate(Some("paunch"), Some("Worker caste"), ""));
        assert_eq!(profile.stage, Some(DevelopmentalStage::Other("worker".to_string())));
        assert!(profile.is_gut_expressed);
        assert_eq!(profile.tissue, Some(TissueSubtype::Gut));
        assert!((profile.score - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_no_terms_no_score() {
        let profile = DiscoveryProfile { gut_terms: vec![], stage_terms: vec![], ..Default::default() };
        let s = ExpressionScorer::new(&profile);
        let result = s.score(&candidate(Some("gut"), None, "gut"));
        assert!(!result.is_gut_expressed);
        assert_eq!(result.score, 0.0);
    }
}
