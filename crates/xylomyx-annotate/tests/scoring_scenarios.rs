//! End-to-end scoring scenarios over the default emerald ash borer profile.

use std::io::Write;
use std::sync::Arc;

use xylomyx_annotate::classifier::extract_ec_numbers;
use xylomyx_annotate::{AnnotationPipeline, EnzymeClassifier, StaticHitTable};
use xylomyx_common::{CandidateBatch, DiscoveryProfile, EnzymeTypeSpec};
use xylomyx_test_utils::{assert_eq, cellulase_candidate, sample_batch, CandidateBuilder};

fn classifier() -> EnzymeClassifier {
    EnzymeClassifier::new(&DiscoveryProfile::default()).unwrap()
}

#[test]
fn strong_evidence_outranks_no_evidence() {
    let a = CandidateBuilder::new("A")
        .description("beta-glucosidase (cellobiase) GH1")
        .ec_number("3.2.1.21")
        .tissue("gut")
        .build();
    let b = CandidateBuilder::new("B").description("hypothetical protein").build();

    let ca = classifier().classify(&a);
    let cb = classifier().classify(&b);

    assert_eq!(ca.keywords_found.len(), 2);
    assert_eq!(ca.enzyme_matches[0].score, 1.0);
    // 0.1×(2/5) + 0.15 + 0.15 + 0.10 + 0.2×1.0
    assert!((ca.confidence - 0.64).abs() < 1e-9);
    assert_eq!(cb.confidence, 0.0);
    assert!(ca.confidence > cb.confidence);
}

/// Default catalog with a two-keyword cellulase entry, so naming both
/// keywords gives a full enzyme-type match.
fn two_keyword_cellulase_classifier() -> EnzymeClassifier {
    let mut profile = DiscoveryProfile::default();
    profile.enzymes[0] = EnzymeTypeSpec::new("cellulase", &["cellulase", "endoglucanase"], &["3.2.1.4"], &["GH5"]);
    EnzymeClassifier::new(&profile).unwrap()
}

#[test]
fn cellulase_scenario_a_b_c() {
    let classifier = two_keyword_cellulase_classifier();

    let a = CandidateBuilder::new("A")
        .description("cellulase endoglucanase GH5")
        .ec_number("3.2.1.4")
        .tissue("gut")
        .build();
    let b = CandidateBuilder::new("B").description("hypothetical protein").build();
    let c = CandidateBuilder::new("C")
        .description("cellulase endoglucanase xylanase laccase peroxidase")
        .tissue("gut")
        .build();
    let single = CandidateBuilder::new("S").description("cellulase").tissue("gut").build();

    let ca = classifier.classify(&a);
    let cb = classifier.classify(&b);
    let cc = classifier.classify(&c);
    let cs = classifier.classify(&single);

    assert_eq!(ca.keywords_found.len(), 2);
    assert_eq!(ca.enzyme_matches.len(), 1);
    assert_eq!(ca.enzyme_matches[0].enzyme_type, "cellulase");
    assert_eq!(ca.enzyme_matches[0].score, 1.0);
    assert!(ca.is_gut_expressed);
    // 0.1×(2/5) + 0.15 + 0.15 + 0.10 + 0.2×1.0
    assert!((ca.confidence - 0.64).abs() < 1e-9);

    assert!(cb.keywords_found.is_empty() && cb.ec_numbers.is_empty() && cb.family_codes.is_empty());
    assert!(!cb.is_gut_expressed);
    assert_eq!(cb.confidence, 0.0);
    assert!(ca.confidence > cb.confidence);

    assert_eq!(cc.keywords_found.len(), 5);
    assert!(cc.ec_numbers.is_empty() && cc.family_codes.is_empty());
    assert!(cc.is_gut_expressed && cs.is_gut_expressed);

    // Strip the gut and type terms: 5/5 keywords earn full weight, 1/5 a fifth of it.
    let keyword_term = |conf: f64, mean: f64| conf - 0.10 - 0.2 * mean;
    let kc = keyword_term(cc.confidence, cc.mean_match_score().unwrap());
    let ks = keyword_term(cs.confidence, cs.mean_match_score().unwrap());
    assert!((kc - 0.10).abs() < 1e-9);
    assert!((ks - 0.02).abs() < 1e-9);
    assert!(kc > ks);
}

#[test]
fn five_keywords_saturate_keyword_term() {
    let c = CandidateBuilder::new("C")
        .description("cellulase endoglucanase cellobiohydrolase xylanase cellobiase")
        .build();
    let single = CandidateBuilder::new("S").description("cellulase").build();

    let cc = classifier().classify(&c);
    let cs = classifier().classify(&single);

    assert_eq!(cc.keywords_found.len(), 5);
    assert_eq!(cs.keywords_found.len(), 1);
    assert!(cc.confidence > cs.confidence);

    // Remove the type term to isolate the keyword term: 0.10 vs 0.02
    let keyword_only = |conf: f64, mean: f64| conf - 0.2 * mean;
    let kc = keyword_only(cc.confidence, cc.mean_match_score().unwrap());
    let ks = keyword_only(cs.confidence, cs.mean_match_score().unwrap());
    assert!((kc - 0.10).abs() < 1e-9);
    assert!((ks - 0.02).abs() < 1e-9);
}

#[test]
fn adding_gut_tissue_never_lowers_confidence() {
    let base = CandidateBuilder::new("G").description("laccase AA1").ec_number("1.10.3.2");
    let without = classifier().classify(&base.clone().build());
    let with = classifier().classify(&base.tissue("midgut").build());
    assert!(with.confidence >= without.confidence);
    assert!(with.confidence <= 1.0);
}

#[test]
fn family_codes_are_case_insensitive() {
    let lower = classifier().classify(&CandidateBuilder::new("L").description("gh5 enzyme").build());
    let upper = classifier().classify(&CandidateBuilder::new("U").description("GH5 enzyme").build());
    assert_eq!(lower.family_codes, upper.family_codes);
    assert!(lower.family_codes.contains("GH5"));
}

#[test]
fn ec_extraction_is_idempotent() {
    let once = extract_ec_numbers("3.2.1.4 3.2.1.21");
    let twice = extract_ec_numbers(&once.iter().cloned().collect::<Vec<_>>().join(" "));
    assert_eq!(once, twice);
}

#[test]
fn pipeline_with_static_hit_table() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "XP_018320001": [
                {{"subject_id": "sp|Q12345", "identity": 92.0, "coverage": 95.0, "evalue": 1e-120, "bitscore": 720.0}},
                {{"subject_id": "sp|Q99999", "identity": 40.0, "coverage": 95.0, "evalue": 1e-30, "bitscore": 150.0}}
            ],
            "XP_018320005": [
                {{"subject_id": "sp|P00001", "identity": 88.0, "coverage": 90.0, "evalue": 1e-90, "bitscore": 500.0}}
            ]
        }}"#
    )
    .unwrap();

    let table = StaticHitTable::from_json_file(file.path()).unwrap();
    let pipeline = AnnotationPipeline::new(&DiscoveryProfile::default())
        .unwrap()
        .with_homology_provider(Arc::new(table));

    let report = pipeline.run(CandidateBatch::from_raw(sample_batch())).unwrap();
    assert_eq!(report.candidates.len(), 7);

    let first = &report.candidates[0];
    let homology = first.homology.as_ref().unwrap();
    assert_eq!(homology.hits.len(), 1);
    assert!(homology.score > 0.9);

    // XP_018320005 is 40 residues long: never searched
    let short = report.candidates.iter().find(|c| c.accession() == "XP_018320005").unwrap();
    assert!(short.homology.is_none());

    // Everything else was searched; misses score zero
    let uncharacterized = report.candidates.iter().find(|c| c.accession() == "XP_018320007").unwrap();
    assert_eq!(uncharacterized.homology_score(), 0.0);
    assert_eq!(report.homology_scored, 6);
    assert_eq!(report.homology_skipped, 1);
}

#[test]
fn duplicate_records_rejected_before_scoring() {
    let mut raws = sample_batch();
    raws.push(cellulase_candidate("XP_018320001").raw());
    let batch = CandidateBatch::from_raw(raws);
    assert_eq!(batch.len(), 7);
    assert_eq!(batch.rejected.len(), 1);

    let pipeline = AnnotationPipeline::new(&DiscoveryProfile::default()).unwrap();
    let report = pipeline.run(batch).unwrap();
    assert_eq!(report.rejected, 1);
}
