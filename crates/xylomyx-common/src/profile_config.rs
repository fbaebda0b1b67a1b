//! Discovery profile: the immutable configuration for one target organism.
//!
//! A profile carries the enzyme catalog, tissue and stage vocabularies, scoring
//! weights and thresholds. It is loaded from YAML/JSON or taken from one of the
//! built-in organism presets, and passed to each scorer at construction.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::confidence::{BlendWeights, EvidenceWeights};
use crate::error::{Result, XylomyxError};

/// Names accepted by [`DiscoveryProfile::preset`].
pub const PRESET_NAMES: &[&str] = &["emerald-ash-borer", "termite", "bark-beetle", "wood-rot-fungus"];

/// Complete discovery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryProfile {
    /// Target organism
    #[serde(default)]
    pub organism: OrganismSpec,

    /// Enzyme catalog in match priority order
    #[serde(default = "default_enzyme_catalog")]
    pub enzymes: Vec<EnzymeTypeSpec>,

    /// Terms marking digestive-tract tissue
    #[serde(default = "default_gut_terms")]
    pub gut_terms: Vec<String>,

    /// Developmental stage or growth phase terms
    #[serde(default = "default_stage_terms")]
    pub stage_terms: Vec<String>,

    /// Two-letter CAZy family prefixes
    #[serde(default = "default_family_prefixes")]
    pub family_prefixes: Vec<String>,

    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub homology: HomologyThresholds,

    #[serde(default)]
    pub matrix: MatrixConfig,

    /// Named search query templates for the retrieval layer
    #[serde(default = "default_query_templates")]
    pub query_templates: BTreeMap<String, String>,
}

impl Default for DiscoveryProfile {
    fn default() -> Self {
        Self {
            organism: OrganismSpec::default(),
            enzymes: default_enzyme_catalog(),
            gut_terms: default_gut_terms(),
            stage_terms: default_stage_terms(),
            family_prefixes: default_family_prefixes(),
            scoring: ScoringConfig::default(),
            homology: HomologyThresholds::default(),
            matrix: MatrixConfig::default(),
            query_templates: default_query_templates(),
        }
    }
}

// ── Organism ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganismSpec {
    /// Scientific name (e.g., "Agrilus planipennis")
    pub name: String,

    pub common_name: Option<String>,

    /// Taxonomic family used by family-wide queries
    pub family: Option<String>,

    #[serde(default)]
    pub related_species: Vec<String>,
}

impl Default for OrganismSpec {
    fn default() -> Self {
        Self {
            name: "Agrilus planipennis".to_string(),
            common_name: Some("Emerald Ash Borer".to_string()),
            family: Some("Buprestidae".to_string()),
            related_species: strings(&[
                "Agrilus anxius",
                "Agrilus biguttatus",
                "Chrysobothris femorata",
                "Melanophila acuminata",
            ]),
        }
    }
}

// ── Enzyme catalog ───────────────────────────────────────────────────────────

/// One enzyme type with its matching vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnzymeTypeSpec {
    pub name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub ec_numbers: Vec<String>,
    #[serde(default, alias = "gh_families")]
    pub family_codes: Vec<String>,
}

impl EnzymeTypeSpec {
    pub fn new(name: &str, keywords: &[&str], ec_numbers: &[&str], family_codes: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: strings(keywords),
            ec_numbers: strings(ec_numbers),
            family_codes: strings(family_codes),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_enzyme_catalog() -> Vec<EnzymeTypeSpec> {
    vec![
        EnzymeTypeSpec::new(
            "cellulase",
            &["cellulase", "endoglucanase", "cellobiohydrolase"],
            &["3.2.1.4"],
            &["GH5", "GH6", "GH7", "GH9", "GH12", "GH45", "GH48"],
        ),
        EnzymeTypeSpec::new(
            "laccase",
            &["laccase", "phenol oxidase", "benzenediol oxidase"],
            &["1.10.3.2"],
            &["AA1"],
        ),
        EnzymeTypeSpec::new(
            "peroxidase",
            &["peroxidase", "lignin peroxidase", "manganese peroxidase"],
            &["1.11.1.7"],
            &["AA2"],
        ),
        EnzymeTypeSpec::new(
            "oxidase",
            &["oxidase", "glucose oxidase", "aryl-alcohol oxidase"],
            &["1.3.3.4", "1.14.13.1"],
            &["AA3", "AA4"],
        ),
        EnzymeTypeSpec::new(
            "xylanase",
            &["xylanase", "endo-1,4-beta-xylanase"],
            &["3.2.1.8"],
            &["GH10", "GH11"],
        ),
        EnzymeTypeSpec::new(
            "beta-glucosidase",
            &["beta-glucosidase", "cellobiase"],
            &["3.2.1.21"],
            &["GH1", "GH3"],
        ),
        EnzymeTypeSpec::new(
            "mannanase",
            &["mannanase", "mannan endo-1,4-beta-mannosidase"],
            &["3.2.1.78"],
            &["GH26"],
        ),
    ]
}

fn default_gut_terms() -> Vec<String> {
    strings(&["gut", "midgut", "foregut", "hindgut", "digestive", "alimentary", "intestine"])
}

fn default_stage_terms() -> Vec<String> {
    strings(&["larva", "larval", "adult", "pupa", "pupal"])
}

fn default_family_prefixes() -> Vec<String> {
    strings(&["GH", "AA", "CE", "PL"])
}

fn default_query_templates() -> BTreeMap<String, String> {
    let mut templates = BTreeMap::new();
    templates.insert(
        "gut_transcriptome".to_string(),
        r#""{organism}"[Organism] AND ({tissues}) AND ({stages}) AND (transcriptome OR RNA-Seq)"#.to_string(),
    );
    templates.insert(
        "enzyme_specific".to_string(),
        r#""{organism}"[Organism] AND ({enzyme_keywords})"#.to_string(),
    );
    templates.insert(
        "family_wide".to_string(),
        r#""{family}"[Organism] AND ({tissues}) AND ({enzyme_keywords})"#.to_string(),
    );
    templates
}

// ── Scoring ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub evidence: EvidenceWeights,
    #[serde(default)]
    pub blend: BlendWeights,
}

impl ScoringConfig {
    pub fn validate(&self) -> bool {
        self.evidence.validate() && self.blend.validate()
    }

    /// Clamp blend weights into [0, 1] and negative or non-finite evidence weights to 0.
    pub fn normalize(&mut self) {
        for w in [
            &mut self.evidence.keyword_match,
            &mut self.evidence.ec_match,
            &mut self.evidence.family_match,
            &mut self.evidence.gut_tissue,
            &mut self.evidence.enzyme_type_match,
        ] {
            if !w.is_finite() || *w < 0.0 {
                *w = 0.0;
            }
        }
        for w in [&mut self.blend.expression, &mut self.blend.homology] {
            *w = if w.is_finite() { (*w).clamp(0.0, 1.0) } else { 0.0 };
        }
    }
}

// ── Homology ─────────────────────────────────────────────────────────────────

/// Acceptance thresholds for homology hits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomologyThresholds {
    #[serde(default = "default_max_evalue")]
    pub max_evalue: f64,

    /// Percent identity
    #[serde(default = "default_min_identity")]
    pub min_identity: f64,

    /// Percent query coverage
    #[serde(default = "default_min_coverage")]
    pub min_coverage: f64,

    /// Shorter sequences are not searched
    #[serde(default = "default_min_sequence_length")]
    pub min_sequence_length: usize,
}

fn default_max_evalue() -> f64 { 1e-20 }
fn default_min_identity() -> f64 { 50.0 }
fn default_min_coverage() -> f64 { 70.0 }
fn default_min_sequence_length() -> usize { 50 }

impl Default for HomologyThresholds {
    fn default() -> Self {
        Self {
            max_evalue: default_max_evalue(),
            min_identity: default_min_identity(),
            min_coverage: default_min_coverage(),
            min_sequence_length: default_min_sequence_length(),
        }
    }
}

// ── Matrix ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixConfig {
    /// Candidates below this confidence are left out of the matrix
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,

    #[serde(default = "default_high_confidence")]
    pub high_confidence: f64,
}

fn default_min_confidence() -> f64 { 0.5 }
fn default_high_confidence() -> f64 { 0.8 }

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            min_confidence: default_min_confidence(),
            high_confidence: default_high_confidence(),
        }
    }
}

// ── Presets ──────────────────────────────────────────────────────────────────

impl DiscoveryProfile {
    /// Built-in organism profile by name.
    pub fn preset(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "emerald-ash-borer" | "eab" => Ok(Self::default()),
            "termite" => Ok(Self::termite()),
            "bark-beetle" => Ok(Self::bark_beetle()),
            "wood-rot-fungus" | "fungus" | "fungal" => Ok(Self::wood_rot_fungus()),
            other => Err(XylomyxError::InvalidArgument(format!(
                "unknown profile '{other}', expected one of: {}",
                PRESET_NAMES.join(", ")
            ))),
        }
    }

    fn termite() -> Self {
        let mut profile = Self::default();
        profile.organism = OrganismSpec {
            name: "Reticulitermes flavipes".to_string(),
            common_name: Some("Eastern Subterranean Termite".to_string()),
            family: Some("Rhinotermitidae".to_string()),
            related_species: strings(&[
                "Reticulitermes hesperus",
                "Coptotermes formosanus",
                "Heterotermes aureus",
                "Prorhinotermes simplex",
            ]),
        };
        profile.gut_terms = strings(&[
            "gut", "midgut", "foregut", "hindgut", "digestive", "paunch", "colon", "alimentary", "intestine",
        ]);
        profile.stage_terms = strings(&["worker", "soldier", "reproductive", "larva", "larval", "adult", "nymph"]);
        profile.query_templates.insert(
            "gut_metagenome".to_string(),
            r#""{organism}"[Organism] AND (gut OR hindgut) AND (metagenome OR microbiome)"#.to_string(),
        );
        profile.query_templates.insert(
            "symbiont_enzymes".to_string(),
            r#""{organism}"[Organism] AND (symbiont OR protozoa) AND ({enzyme_keywords})"#.to_string(),
        );
        profile
    }

    fn bark_beetle() -> Self {
        let mut profile = Self::default();
        profile.organism = OrganismSpec {
            name: "Dendroctonus ponderosae".to_string(),
            common_name: Some("Mountain Pine Beetle".to_string()),
            family: Some("Curculionidae".to_string()),
            related_species: strings(&[
                "Dendroctonus frontalis",
                "Ips typographus",
                "Dendroctonus rufipennis",
                "Scolytus ventralis",
            ]),
        };
        profile.gut_terms = strings(&["gut", "midgut", "foregut", "hindgut", "digestive", "mycangium", "mycangia"]);
        profile.stage_terms = strings(&["larva", "larval", "adult", "pupa", "pupal", "gallery", "brood"]);
        profile.enzymes.push(EnzymeTypeSpec::new(
            "terpene_synthase",
            &["terpene synthase", "monoterpene", "sesquiterpene"],
            &[],
            &[],
        ));
        profile.enzymes.push(EnzymeTypeSpec::new(
            "cytochrome_p450",
            &["cytochrome P450", "CYP", "detoxification"],
            &[],
            &[],
        ));
        profile
    }

    fn wood_rot_fungus() -> Self {
        let mut profile = Self::default();
        profile.organism = OrganismSpec {
            name: "Phanerochaete chrysosporium".to_string(),
            common_name: Some("White-Rot Fungus".to_string()),
            family: Some("Polyporaceae".to_string()),
            related_species: strings(&[
                "Trametes versicolor",
                "Pleurotus ostreatus",
                "Postia placenta",
                "Gloeophyllum trabeum",
                "Ceriporiopsis subvermispora",
            ]),
        };
        // Fungi have no digestive tract; tissue evidence never fires.
        profile.gut_terms = Vec::new();
        profile.stage_terms = strings(&[
            "exponential", "stationary", "decay", "vegetative", "reproductive", "ligninolytic", "cellulolytic",
        ]);
        profile.enzymes.extend([
            EnzymeTypeSpec::new("lignin_peroxidase", &["lignin peroxidase", "LiP"], &["1.11.1.14"], &["AA2"]),
            EnzymeTypeSpec::new("manganese_peroxidase", &["manganese peroxidase", "MnP"], &["1.11.1.13"], &["AA2"]),
            EnzymeTypeSpec::new("versatile_peroxidase", &["versatile peroxidase", "VP"], &["1.11.1.16"], &["AA2"]),
            EnzymeTypeSpec::new("glyoxal_oxidase", &["glyoxal oxidase", "GLOX"], &["1.2.3.5"], &["AA5"]),
            EnzymeTypeSpec::new(
                "cellobiose_dehydrogenase",
                &["cellobiose dehydrogenase", "CDH"],
                &["1.1.99.18"],
                &["AA3"],
            ),
        ]);
        profile
    }
}

// ── Helper Methods ───────────────────────────────────────────────────────────

impl DiscoveryProfile {
    /// Load from YAML file
    pub fn from_yaml(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| XylomyxError::Config(format!("cannot read profile {path}: {e}")))?;
        let profile: Self = serde_yaml::from_str(&content)
            .map_err(|e| XylomyxError::Config(format!("invalid profile {path}: {e}")))?;
        profile.loaded()
    }

    /// Load from JSON file
    pub fn from_json(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| XylomyxError::Config(format!("cannot read profile {path}: {e}")))?;
        let profile: Self = serde_json::from_str(&content)
            .map_err(|e| XylomyxError::Config(format!("invalid profile {path}: {e}")))?;
        profile.loaded()
    }

    /// Normalize scoring weights, then validate what is left.
    fn loaded(mut self) -> Result<Self> {
        self.scoring.normalize();
        self.validate()?;
        Ok(self)
    }

    /// Load from a file, choosing the parser by extension (`.json`, otherwise YAML).
    pub fn from_file(path: &str) -> Result<Self> {
        if path.to_lowercase().ends_with(".json") {
            Self::from_json(path)
        } else {
            Self::from_yaml(path)
        }
    }

    /// Save to YAML file
    pub fn to_yaml(&self, path: &str) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject weights and thresholds no scorer can use. Empty vocabularies are
    /// allowed and simply produce zero scores.
    pub fn validate(&self) -> Result<()> {
        if !self.scoring.evidence.validate() {
            return Err(XylomyxError::Config(
                "evidence weights must be finite and non-negative".to_string(),
            ));
        }
        if !self.scoring.blend.validate() {
            return Err(XylomyxError::Config("blend weights must lie in [0, 1]".to_string()));
        }
        let h = &self.homology;
        if !(h.max_evalue.is_finite() && h.max_evalue > 0.0) {
            return Err(XylomyxError::Config("homology max_evalue must be positive".to_string()));
        }
        if !h.min_identity.is_finite() || !h.min_coverage.is_finite() {
            return Err(XylomyxError::Config("homology thresholds must be finite".to_string()));
        }
        if !self.matrix.min_confidence.is_finite() || !self.matrix.high_confidence.is_finite() {
            return Err(XylomyxError::Config("matrix thresholds must be finite".to_string()));
        }
        Ok(())
    }

    pub fn enzyme(&self, name: &str) -> Option<&EnzymeTypeSpec> {
        self.enzymes.iter().find(|e| e.name.eq_ignore_ascii_case(name))
    }

    /// Keywords of one enzyme type, or of the whole catalog deduplicated in order.
    pub fn enzyme_keywords(&self, enzyme: Option<&str>) -> Result<Vec<String>> {
        match enzyme {
            Some(name) => self
                .enzyme(name)
                .map(|e| e.keywords.clone())
                .ok_or_else(|| XylomyxError::InvalidArgument(format!("unknown enzyme type '{name}'"))),
            None => {
                let mut seen = HashSet::new();
                Ok(self
                    .enzymes
                    .iter()
                    .flat_map(|e| e.keywords.iter())
                    .filter(|k| seen.insert(k.to_lowercase()))
                    .cloned()
                    .collect())
            }
        }
    }

    /// Build the enzyme search query for the retrieval layer.
    pub fn build_query(&self, enzyme: Option<&str>, include_tissues: bool, include_stages: bool) -> Result<String> {
        let mut parts = vec![format!("\"{}\"[Organism]", self.organism.name)];

        let keywords = self.enzyme_keywords(enzyme)?;
        if !keywords.is_empty() {
            parts.push(format!("({})", keywords.join(" OR ")));
        }
        if include_tissues && !self.gut_terms.is_empty() {
            parts.push(format!("({})", self.gut_terms.join(" OR ")));
        }
        if include_stages && !self.stage_terms.is_empty() {
            parts.push(format!("({})", self.stage_terms.join(" OR ")));
        }

        Ok(parts.join(" AND "))
    }

    /// Render a named query template.
    pub fn render_template(&self, name: &str) -> Result<String> {
        let template = self
            .query_templates
            .get(name)
            .ok_or_else(|| XylomyxError::InvalidArgument(format!("unknown query template '{name}'")))?;

        Ok(template
            .replace("{organism}", &self.organism.name)
            .replace("{family}", self.organism.family.as_deref().unwrap_or(&self.organism.name))
            .replace("{tissues}", &self.gut_terms.join(" OR "))
            .replace("{stages}", &self.stage_terms.join(" OR "))
            .replace("{enzyme_keywords}", &self.enzyme_keywords(None)?.join(" OR ")))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let profile = DiscoveryProfile::default();
        assert_eq!(profile.organism.name, "Agrilus planipennis");
        assert_eq!(profile.enzymes.len(), 7);
        assert_eq!(profile.enzymes[0].name, "cellulase");
        assert_eq!(profile.family_prefixes, vec!["GH", "AA", "CE", "PL"]);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_every_preset_loads_and_validates() {
        for name in PRESET_NAMES {
            let profile = DiscoveryProfile::preset(name).unwrap();
            assert!(profile.validate().is_ok(), "{name}");
        }
        assert!(DiscoveryProfile::preset("panda").is_err());
    }

    #[test]
    fn test_preset_vocabularies() {
        let termite = DiscoveryProfile::preset("termite").unwrap();
        assert!(termite.gut_terms.contains(&"paunch".to_string()));
        assert!(termite.stage_terms.contains(&"worker".to_string()));

        let beetle = DiscoveryProfile::preset("bark-beetle").unwrap();
        assert!(beetle.enzyme("cytochrome_p450").is_some());

        let fungus = DiscoveryProfile::preset("fungus").unwrap();
        assert!(fungus.gut_terms.is_empty());
        assert_eq!(fungus.enzymes.len(), 12);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = r#"
organism:
  name: Anoplophora glabripennis
enzymes:
  - name: cellulase
    keywords: [cellulase]
    gh_families: [GH45]
matrix:
  min_confidence: 0.6
"#;
        let profile: DiscoveryProfile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(profile.organism.name, "Anoplophora glabripennis");
        assert_eq!(profile.enzymes[0].family_codes, vec!["GH45"]);
        assert_eq!(profile.matrix.min_confidence, 0.6);
        assert_eq!(profile.matrix.high_confidence, 0.8);
        assert_eq!(profile.homology.max_evalue, 1e-20);
        assert_eq!(profile.scoring.blend.homology, 0.4);
        assert_eq!(profile.gut_terms.len(), 7);
    }

    #[test]
    fn test_validate_rejects_bad_weights() {
        let mut profile = DiscoveryProfile::default();
        profile.scoring.blend.expression = 1.5;
        assert!(matches!(profile.validate(), Err(XylomyxError::Config(_))));

        profile.scoring.normalize();
        assert_eq!(profile.scoring.blend.expression, 1.0);
        assert!(profile.validate().is_ok());

        profile.scoring.evidence.ec_match = -0.1;
        assert!(profile.validate().is_err());
        profile.scoring.normalize();
        assert_eq!(profile.scoring.evidence.ec_match, 0.0);
    }

    #[test]
    fn test_build_query_single_enzyme() {
        let profile = DiscoveryProfile::default();
        let query = profile.build_query(Some("xylanase"), false, false).unwrap();
        assert_eq!(
            query,
            r#""Agrilus planipennis"[Organism] AND (xylanase OR endo-1,4-beta-xylanase)"#
        );
    }

    #[test]
    fn test_build_query_with_tissues_and_stages() {
        let profile = DiscoveryProfile::default();
        let query = profile.build_query(None, true, true).unwrap();
        assert!(query.starts_with(r#""Agrilus planipennis"[Organism] AND (cellulase OR"#));
        assert!(query.contains("(gut OR midgut"));
        assert!(query.ends_with("(larva OR larval OR adult OR pupa OR pupal)"));
    }

    #[test]
    fn test_build_query_unknown_enzyme() {
        let profile = DiscoveryProfile::default();
        let err = profile.build_query(Some("amylase"), false, false).unwrap_err();
        assert!(matches!(err, XylomyxError::InvalidArgument(_)));
    }

    #[test]
    fn test_render_family_template() {
        let profile = DiscoveryProfile::default();
        let query = profile.render_template("family_wide").unwrap();
        assert!(query.starts_with(r#""Buprestidae"[Organism] AND (gut OR"#));
        assert!(!query.contains('{'));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let dir = std::env::temp_dir().join(format!("xylomyx-profile-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("termite.yaml");
        let path = path.to_str().unwrap();

        let profile = DiscoveryProfile::preset("termite").unwrap();
        profile.to_yaml(path).unwrap();
        let parsed = DiscoveryProfile::from_file(path).unwrap();
        assert_eq!(parsed.organism.name, profile.organism.name);
        assert_eq!(parsed.stage_terms, profile.stage_terms);
        assert_eq!(parsed.enzymes, profile.enzymes);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_loaded_profile_weights_are_normalized() {
        let dir = std::env::temp_dir().join(format!("xylomyx-normalize-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("clamped.yaml");
        std::fs::write(
            &path,
            "scoring:\n  evidence:\n    ec_match: -0.1\n  blend:\n    expression: 1.5\n    homology: 0.4\n",
        )
        .unwrap();

        let profile = DiscoveryProfile::from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(profile.scoring.evidence.ec_match, 0.0);
        assert_eq!(profile.scoring.blend.expression, 1.0);
        assert_eq!(profile.scoring.blend.homology, 0.4);
        assert!(profile.validate().is_ok());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_invalid_thresholds_rejected_on_load() {
        let dir = std::env::temp_dir().join(format!("xylomyx-thresholds-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.json");
        std::fs::write(&path, r#"{"homology": {"max_evalue": 0.0}}"#).unwrap();

        let err = DiscoveryProfile::from_file(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, XylomyxError::Config(_)));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = DiscoveryProfile::from_yaml("/nonexistent/profile.yaml").unwrap_err();
        assert!(matches!(err, XylomyxError::Config(_)));
    }
}
