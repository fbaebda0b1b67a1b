//! Shared fixtures for Xylomyx tests: candidate builders, sample batches and
//! homology hits.

use xylomyx_common::{Candidate, HomologyHit, RawCandidate};

pub use pretty_assertions::{assert_eq, assert_ne};

pub const EAB: &str = "Agrilus planipennis";

/// Builder for retrieval-boundary records.
#[derive(Debug, Clone)]
pub struct CandidateBuilder {
    raw: RawCandidate,
}

impl CandidateBuilder {
    pub fn new(accession: &str) -> Self {
        Self {
            raw: RawCandidate {
                accession: Some(accession.to_string()),
                organism: Some(EAB.to_string()),
                source_db: Some("protein".to_string()),
                ..Default::default()
            },
        }
    }

    pub fn organism(mut self, organism: &str) -> Self {
        self.raw.organism = Some(organism.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.raw.description = Some(description.to_string());
        self
    }

    pub fn protein_name(mut self, name: &str) -> Self {
        self.raw.protein_name = Some(name.to_string());
        self
    }

    pub fn gene_name(mut self, name: &str) -> Self {
        self.raw.gene_name = Some(name.to_string());
        self
    }

    pub fn keywords(mut self, keywords: &[&str]) -> Self {
        self.raw.keywords = Some(keywords.iter().map(|k| k.to_string()).collect());
        self
    }

    pub fn ec_number(mut self, ec: &str) -> Self {
        self.raw.ec_number = Some(ec.to_string());
        self
    }

    pub fn tissue(mut self, tissue: &str) -> Self {
        self.raw.tissue = Some(tissue.to_string());
        self
    }

    pub fn stage(mut self, stage: &str) -> Self {
        self.raw.stage = Some(stage.to_string());
        self
    }

    pub fn feature(mut self, key: &str, value: &str) -> Self {
        self.raw
            .features
            .get_or_insert_with(Default::default)
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Poly-alanine sequence of the given length.
    pub fn sequence_len(mut self, length: usize) -> Self {
        self.raw.sequence = Some("A".repeat(length));
        self.raw.length = Some(length);
        self
    }

    pub fn raw(self) -> RawCandidate {
        self.raw
    }

    pub fn build(self) -> Candidate {
        Candidate::from_raw(self.raw).expect("builder always sets an accession")
    }
}

/// Strong cellulase: two keywords, EC number, GH5, larval midgut.
pub fn cellulase_candidate(accession: &str) -> CandidateBuilder {
    CandidateBuilder::new(accession)
        .description("endoglucanase [Agrilus planipennis]")
        .gene_name("cellulase")
        .keywords(&["GH5"])
        .ec_number("3.2.1.4")
        .tissue("midgut")
        .stage("larval")
        .sequence_len(450)
}

/// Hypothetical protein with no enzyme evidence at all.
pub fn uncharacterized_candidate(accession: &str) -> CandidateBuilder {
    CandidateBuilder::new(accession)
        .description("uncharacterized protein LOC108735")
        .tissue("fat body")
        .sequence_len(210)
}

/// A mixed batch covering every default enzyme type plus noise.
pub fn sample_batch() -> Vec<RawCandidate> {
    vec![
        cellulase_candidate("XP_018320001").raw(),
        CandidateBuilder::new("XP_018320002")
            .description("laccase-2 isoform X1")
            .keywords(&["multicopper oxidase", "AA1"])
            .ec_number("1.10.3.2")
            .tissue("midgut")
            .stage("adult")
            .sequence_len(680)
            .raw(),
        CandidateBuilder::new("XP_018320003")
            .description("endo-1,4-beta-xylanase GH11")
            .tissue("hindgut")
            .stage("larva")
            .sequence_len(220)
            .raw(),
        CandidateBuilder::new("XP_018320004")
            .description("beta-glucosidase, cellobiase GH1")
            .ec_number("3.2.1.21")
            .tissue("digestive tract")
            .sequence_len(510)
            .raw(),
        CandidateBuilder::new("XP_018320005")
            .description("peroxidase-like protein")
            .keywords(&["AA2"])
            .sequence_len(40)
            .raw(),
        CandidateBuilder::new("XP_018320006")
            .description("mannanase, mannan endo-1,4-beta-mannosidase GH26")
            .ec_number("3.2.1.78")
            .tissue("midgut")
            .stage("larval")
            .sequence_len(390)
            .raw(),
        uncharacterized_candidate("XP_018320007").raw(),
    ]
}

pub fn hit(subject_id: &str, identity: f64, coverage: f64, evalue: f64, bitscore: f64) -> HomologyHit {
    HomologyHit {
        subject_id: subject_id.to_string(),
        subject_def: String::new(),
        identity,
        coverage,
        evalue,
        bitscore,
    }
}

/// Serialise records the way the retrieval cache stores them.
pub fn to_cache_json(records: &[RawCandidate]) -> String {
    serde_json::to_string_pretty(records).expect("records serialise")
}
