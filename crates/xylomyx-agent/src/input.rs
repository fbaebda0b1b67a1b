//! Candidate records from the retrieval layer's JSON cache.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use tracing::{debug, info};

use xylomyx_common::RawCandidate;

/// A cache file holds either a list of records or a single record.
#[derive(Deserialize)]
#[serde(untagged)]
enum CacheFile {
    Many(Vec<RawCandidate>),
    One(RawCandidate),
}

fn read_cache_file(path: &Path) -> anyhow::Result<Vec<RawCandidate>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let parsed: CacheFile = serde_json::from_str(&content)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(match parsed {
        CacheFile::Many(records) => records,
        CacheFile::One(record) => vec![record],
    })
}

/// Load raw records from a JSON file or a directory of `.json` files.
/// Directory entries are read in file-name order.
pub fn load_candidates(path: &Path) -> anyhow::Result<Vec<RawCandidate>> {
    if !path.exists() {
        anyhow::bail!("Input not found: {}", path.display());
    }

    if path.is_file() {
        let records = read_cache_file(path)?;
        info!(path = %path.display(), records = records.len(), "Loaded candidate cache");
        return Ok(records);
    }

    let mut files: Vec<PathBuf> = std::fs::read_dir(path)
        .with_context(|| format!("listing {}", path.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    let mut records = Vec::new();
    for file in &files {
        let loaded = read_cache_file(file)?;
        debug!(path = %file.display(), records = loaded.len(), "Read cache file");
        records.extend(loaded);
    }
    info!(path = %path.display(), files = files.len(), records = records.len(), "Loaded candidate cache directory");
    Ok(records)
}
