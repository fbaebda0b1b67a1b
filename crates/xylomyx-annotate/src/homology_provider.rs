//! Trait for homology search access.
//!
//! Decouples homology scoring from how hits are obtained. Remote searches,
//! caching and retries live behind the trait.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use xylomyx_common::{HomologyHit, Result, XylomyxError};

/// Source of homology hits for a query sequence.
///
/// Implementations can use:
/// - Precomputed hit tables exported from a BLAST run (local)
/// - A remote search service
/// - Mock data (testing)
pub trait HomologyProvider: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &str;

    /// All raw hits for one query. Threshold filtering happens in the scorer.
    ///
    /// Returns an empty list when the search ran but found nothing, and an
    /// error only when the search itself failed.
    fn search(&self, accession: &str, sequence: &str) -> Result<Vec<HomologyHit>>;
}

// ── Static hit table ─────────────────────────────────────────────────────────

/// Hits loaded from a JSON object of `accession → [hit, ...]`.
#[derive(Debug, Clone, Default)]
pub struct StaticHitTable {
    hits: HashMap<String, Vec<HomologyHit>>,
}

impl StaticHitTable {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let hits: HashMap<String, Vec<HomologyHit>> = serde_json::from_str(json)?;
        Ok(Self { hits })
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            XylomyxError::Homology(format!("cannot read hit table {}: {e}", path.display()))
        })?;
        Self::from_json_str(&content)
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

impl HomologyProvider for StaticHitTable {
    fn name(&self) -> &str {
        "static-hit-table"
    }

    fn search(&self, accession: &str, _sequence: &str) -> Result<Vec<HomologyHit>> {
        Ok(self.hits.get(accession).cloned().unwrap_or_default())
    }
}

// ── Mock Implementation for Testing ──────────────────────────────────────────

/// Mock provider with hardcoded hits for unit tests.
#[derive(Debug, Default)]
pub struct MockHomologyProvider {
    hits: HashMap<String, Vec<HomologyHit>>,
    failing: HashSet<String>,
}

impl MockHomologyProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hit for an accession.
    pub fn with(mut self, accession: &str, hit: HomologyHit) -> Self {
        self.hits.entry(accession.to_string()).or_default().push(hit);
        self
    }

    /// Make searches for an accession fail.
    pub fn failing_for(mut self, accession: &str) -> Self {
        self.failing.insert(accession.to_string());
        self
    }
}

impl HomologyProvider for MockHomologyProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn search(&self, accession: &str, _sequence: &str) -> Result<Vec<HomologyHit>> {
        if self.failing.contains(accession) {
            return Err(XylomyxError::Homology(format!("search failed for {accession}")));
        }
        Ok(self.hits.get(accession).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(subject: &str, bitscore: f64) -> HomologyHit {
        HomologyHit {
            subject_id: subject.to_string(),
            subject_def: String::new(),
            identity: 80.0,
            coverage: 90.0,
            evalue: 1e-50,
            bitscore,
        }
    }

    #[test]
    fn test_mock_provider() {
        let provider = MockHomologyProvider::new()
            .with("A1", hit("sp|P1", 300.0))
            .with("A1", hit("sp|P2", 200.0))
            .failing_for("B2");

        assert_eq!(provider.search("A1", "").unwrap().len(), 2);
        assert!(provider.search("C3", "").unwrap().is_empty());
        assert!(matches!(provider.search("B2", ""), Err(XylomyxError::Homology(_))));
    }

    #[test]
    fn test_static_table_from_json() {
        let json = r#"{
            "XP_1": [
                {"subject_id": "sp|Q9", "identity": 72.5, "coverage": 88.0, "evalue": 1e-80, "bitscore": 410.2}
            ],
            "XP_2": []
        }"#;
        let table = StaticHitTable::from_json_str(json).unwrap();
        assert_eq!(table.len(), 2);

        let hits = table.search("XP_1", "MKV").unwrap();
        assert_eq!(hits[0].subject_id, "sp|Q9");
        assert_eq!(hits[0].subject_def, "");
        assert!(table.search("XP_2", "").unwrap().is_empty());
        assert!(table.search("XP_3", "").unwrap().is_empty());
    }

    #[test]
    fn test_static_table_rejects_bad_json() {
        assert!(matches!(
            StaticHitTable::from_json_str("[1, 2]"),
            Err(XylomyxError::Serialization(_))
        ));
        assert!(StaticHitTable::from_json_file("/nonexistent/hits.json").is_err());
    }
}
