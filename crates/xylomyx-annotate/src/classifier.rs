//! Rule-based enzyme classification from sequence metadata.
//!
//! Matches the profile's enzyme catalog against a text corpus built from the
//! candidate's description, names, keywords and feature qualifiers, then
//! extracts CAZy family codes and EC numbers and scores the evidence.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use xylomyx_common::confidence::{compute_classification_confidence, ConfidenceEvidence, EvidenceWeights};
use xylomyx_common::{Candidate, Classification, DiscoveryProfile, EnzymeMatch, EnzymeTypeSpec, Result, XylomyxError};

/// Text searched for enzyme evidence.
pub fn search_corpus(candidate: &Candidate) -> String {
    let keywords = candidate.keywords.join(" ");
    let features = candidate.features_text();
    [
        candidate.description.as_str(),
        candidate.protein_name.as_str(),
        candidate.gene_name.as_str(),
        keywords.as_str(),
        features.as_str(),
    ]
    .join(" ")
}

/// Four dot-separated integer groups, e.g. `3.2.1.4`.
pub fn extract_ec_numbers(text: &str) -> BTreeSet<String> {
    ec_regex()
        .captures_iter(text)
        .map(|cap| cap[1].to_string())
        .collect()
}

fn ec_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(\d+\.\d+\.\d+\.\d+)\b").expect("static EC pattern"))
}

/// True when any term is a case-insensitive substring of any of `texts`.
pub fn contains_any_term(terms: &[String], texts: &[&str]) -> bool {
    let lowered: Vec<String> = texts.iter().map(|t| t.to_lowercase()).collect();
    terms
        .iter()
        .map(|t| t.to_lowercase())
        .filter(|t| !t.is_empty())
        .any(|term| lowered.iter().any(|text| text.contains(&term)))
}

fn word_regex(keyword: &str) -> Result<Regex> {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(keyword)))
        .map_err(|e| XylomyxError::Config(format!("invalid keyword '{keyword}': {e}")))
}

/// Compiled matcher for one enzyme type.
struct TypeMatcher {
    spec: EnzymeTypeSpec,
    patterns: Vec<Regex>,
}

impl TypeMatcher {
    /// Matched / configured keywords, `None` when nothing matched.
    fn score(&self, corpus: &str) -> Option<f64> {
        if self.patterns.is_empty() {
            return None;
        }
        let matched = self.patterns.iter().filter(|re| re.is_match(corpus)).count();
        (matched > 0).then(|| matched as f64 / self.patterns.len() as f64)
    }
}

/// Enzyme classifier configured from a discovery profile.
pub struct EnzymeClassifier {
    types: Vec<TypeMatcher>,
    /// Every configured keyword, deduplicated case-insensitively.
    keywords: Vec<(String, Regex)>,
    family_regex: Option<Regex>,
    gut_terms: Vec<String>,
    weights: EvidenceWeights,
}

impl EnzymeClassifier {
    pub fn new(profile: &DiscoveryProfile) -> Result<Self> {
        let mut types = Vec::with_capacity(profile.enzymes.len());
        let mut keywords: Vec<(String, Regex)> = Vec::new();

        for spec in &profile.enzymes {
            let mut patterns = Vec::with_capacity(spec.keywords.len());
            for keyword in spec.keywords.iter().filter(|k| !k.trim().is_empty()) {
                let re = word_regex(keyword)?;
                if !keywords.iter().any(|(k, _)| k.eq_ignore_ascii_case(keyword)) {
                    keywords.push((keyword.clone(), re.clone()));
                }
                patterns.push(re);
            }
            types.push(TypeMatcher { spec: spec.clone(), patterns });
        }

        let prefixes: Vec<String> = profile
            .family_prefixes
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(regex::escape)
            .collect();
        let family_regex = if prefixes.is_empty() {
            None
        } else {
            let pattern = format!(r"(?i)\b((?:{})\d+)\b", prefixes.join("|"));
            Some(Regex::new(&pattern).map_err(|e| XylomyxError::Config(format!("invalid family prefixes: {e}")))?)
        };

        Ok(Self {
            types,
            keywords,
            family_regex,
            gut_terms: profile.gut_terms.clone(),
            weights: profile.scoring.evidence.clone(),
        })
    }

    /// Uppercased family codes found in `text`.
    pub fn extract_family_codes(&self, text: &str) -> BTreeSet<String> {
        match &self.family_regex {
            Some(re) => re
                .captures_iter(text)
                .map(|cap| cap[1].to_uppercase())
                .collect(),
            None => BTreeSet::new(),
        }
    }

    pub fn classify(&self, candidate: &Candidate) -> Classification {
        let corpus = search_corpus(candidate);

        let enzyme_matches: Vec<EnzymeMatch> = self
            .types
            .iter()
            .filter_map(|t| {
                t.score(&corpus).map(|score| EnzymeMatch {
                    enzyme_type: t.spec.name.clone(),
                    score,
                })
            })
            .collect();

        let family_codes = self.extract_family_codes(&corpus);

        let mut ec_numbers = extract_ec_numbers(&corpus);
        if let Some(ec) = &candidate.ec_number {
            ec_numbers.insert(ec.clone());
        }

        let is_gut_expressed = contains_any_term(&self.gut_terms, &[candidate.tissue_text(), corpus.as_str()]);

        let keywords_found: BTreeSet<String> = self
            .keywords
            .iter()
            .filter(|(_, re)| re.is_match(&corpus))
            .map(|(k, _)| k.clone())
            .collect();

        let primary = enzyme_matches
            .first()
            .and_then(|m| self.types.iter().find(|t| t.spec.name == m.enzyme_type))
            .map(|t| &t.spec);

        let primary_family = primary
            .and_then(|spec| {
                spec.family_codes
                    .iter()
                    .find(|code| family_codes.contains(&code.to_uppercase()))
                    .map(|code| code.to_uppercase())
            })
            .or_else(|| family_codes.iter().next().cloned());

        let primary_ec = candidate
            .ec_number
            .clone()
            .or_else(|| {
                primary.and_then(|spec| spec.ec_numbers.iter().find(|ec| ec_numbers.contains(ec.as_str())).cloned())
            })
            .or_else(|| ec_numbers.iter().next().cloned());

        let mut classification = Classification {
            enzyme_matches,
            family_codes,
            ec_numbers,
            is_gut_expressed,
            keywords_found,
            primary_family,
            primary_ec,
            confidence: 0.0,
        };

        let evidence = ConfidenceEvidence {
            keywords_found: classification.keywords_found.len(),
            has_ec_number: !classification.ec_numbers.is_empty(),
            has_family_code: !classification.family_codes.is_empty(),
            is_gut_expressed,
            mean_type_score: classification.mean_match_score(),
        };
        classification.confidence = compute_classification_confidence(&evidence, &self.weights);

        debug!(
            accession = %candidate.accession,
            enzyme_type = classification.primary_enzyme_type().unwrap_or("unknown"),
            confidence = classification.confidence,
            "Classified candidate"
        );

        classification
    }
}
