//! The `run` command: load, annotate, build the matrix, write outputs, persist.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, instrument, warn};

use xylomyx_annotate::{
    AnnotationPipeline, AnnotationStatistics, ExpressionFilter, ExpressionStatistics, StaticHitTable,
};
use xylomyx_common::{CandidateBatch, DiscoveryProfile};
use xylomyx_db::{CandidateStore, InMemoryCandidateStore};
use xylomyx_ranker::{ExportFormat, MatrixBuilder, RankCriterion, ReportOptions};

use crate::cli::{ProfileArgs, RunArgs};
use crate::config::Config;
use crate::input::load_candidates;

pub const MATRIX_STEM: &str = "digestive_matrix";
pub const REPORT_FILE: &str = "discovery_report.txt";

/// Load the profile named on the command line, falling back to the config.
/// A profile file wins over a preset name.
pub fn resolve_profile(args: &ProfileArgs, config: &Config) -> anyhow::Result<DiscoveryProfile> {
    if let Some(file) = &args.profile_file {
        return DiscoveryProfile::from_file(&file.to_string_lossy())
            .with_context(|| format!("loading profile {}", file.display()));
    }
    if let Some(name) = &args.profile {
        return Ok(DiscoveryProfile::preset(name)?);
    }
    if let Some(file) = &config.profile.file {
        return DiscoveryProfile::from_file(file).with_context(|| format!("loading profile {file}"));
    }
    Ok(DiscoveryProfile::preset(&config.profile.name)?)
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub input: PathBuf,
    pub profile: DiscoveryProfile,
    pub min_confidence: f64,
    pub homology_hits: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub formats: Vec<ExportFormat>,
    pub rank: RankCriterion,
    pub report_top_n: usize,
    pub filter: ExpressionFilter,
    pub snapshot: Option<PathBuf>,
}

impl RunSettings {
    /// Merge command-line arguments over the runtime config.
    pub fn resolve(args: RunArgs, config: &Config) -> anyhow::Result<Self> {
        let profile = resolve_profile(&args.profile, config)?;

        let min_confidence = args
            .min_confidence
            .or(config.scoring.min_confidence)
            .unwrap_or(profile.matrix.min_confidence);

        let formats = match &args.format {
            Some(list) => ExportFormat::parse_list(list)?,
            None => config
                .output
                .formats
                .iter()
                .map(|f| f.parse::<ExportFormat>())
                .collect::<Result<Vec<_>, _>>()?,
        };

        let rank = args
            .rank
            .or_else(|| config.output.rank.clone())
            .map(|r| r.parse::<RankCriterion>())
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            input: args.input,
            profile,
            min_confidence,
            homology_hits: args.homology_hits.or_else(|| config.homology_hits().map(PathBuf::from)),
            output_dir: args.output.unwrap_or_else(|| PathBuf::from(&config.output.dir)),
            formats,
            rank,
            report_top_n: args.top_n.unwrap_or(config.output.report_top_n),
            filter: ExpressionFilter {
                require_gut: args.require_gut || config.scoring.require_gut,
                require_larval: args.require_larval || config.scoring.require_larval,
            },
            snapshot: config.store.snapshot.as_ref().map(PathBuf::from),
        })
    }

    fn report_options(&self) -> ReportOptions {
        let organism = &self.profile.organism;
        let mut options = ReportOptions::for_organism(organism.common_name.as_deref().unwrap_or(&organism.name));
        options.top_n = self.report_top_n;
        options.ordering = self.rank;
        options
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOutcome {
    pub candidates: usize,
    pub rejected: usize,
    pub matrix_rows: usize,
    pub written: Vec<PathBuf>,
}

async fn open_store(snapshot: Option<&Path>) -> anyhow::Result<InMemoryCandidateStore> {
    match snapshot {
        Some(path) if path.exists() => Ok(InMemoryCandidateStore::load_snapshot(path).await?),
        _ => Ok(InMemoryCandidateStore::new()),
    }
}

#[instrument(skip(settings), fields(input = %settings.input.display()))]
pub async fn execute(settings: &RunSettings) -> anyhow::Result<RunOutcome> {
    let batch = CandidateBatch::from_raw(load_candidates(&settings.input)?);
    let rejected = batch.rejected.len();
    if batch.is_empty() {
        info!(rejected, "No candidates found");
        return Ok(RunOutcome { rejected, ..Default::default() });
    }

    // ── Annotation ────────────────────────────────────────────────────────────
    let mut pipeline = AnnotationPipeline::new(&settings.profile)?;
    if let Some(hits) = &settings.homology_hits {
        let table = StaticHitTable::from_json_file(hits)
            .with_context(|| format!("loading homology hits {}", hits.display()))?;
        info!(accessions = table.len(), "Homology stage enabled");
        pipeline = pipeline.with_homology_provider(Arc::new(table));
    }
    let report = pipeline.run(batch)?;

    let annotation = AnnotationStatistics::from_candidates(&report.candidates);
    let expression = ExpressionStatistics::from_candidates(&report.candidates);
    info!(
        total = annotation.total,
        enzyme_types = annotation.enzyme_types.len(),
        high_confidence = annotation.high_confidence,
        gut_expressed = expression.gut_expressed,
        mean_expression = expression.mean_expression_score,
        "Annotation statistics"
    );

    // ── Persistence ───────────────────────────────────────────────────────────
    let store = open_store(settings.snapshot.as_deref()).await?;
    let upserted = store.upsert_batch(&report.candidates).await?;
    let stats = store.statistics().await?;
    info!(
        inserted = upserted.inserted,
        updated = upserted.updated,
        stored = stats.total_candidates,
        mean_confidence = stats.mean_confidence,
        "Candidates persisted"
    );
    if let Some(path) = &settings.snapshot {
        store.save_snapshot(path).await?;
    }

    // ── Matrix ────────────────────────────────────────────────────────────────
    let candidates = report.candidates.len();
    let kept = settings.filter.apply(report.candidates);
    if kept.len() < candidates {
        info!(kept = kept.len(), dropped = candidates - kept.len(), "Expression filter applied");
    }
    let mut matrix = MatrixBuilder::new(&settings.profile.matrix)
        .with_min_confidence(settings.min_confidence)
        .build(&kept);
    matrix.rerank(settings.rank);

    if matrix.is_empty() {
        warn!(min_confidence = settings.min_confidence, "No candidates met the confidence threshold");
    }

    std::fs::create_dir_all(&settings.output_dir)
        .with_context(|| format!("creating {}", settings.output_dir.display()))?;
    let mut written = Vec::new();
    for format in &settings.formats {
        let path = settings.output_dir.join(format!("{MATRIX_STEM}.{}", format.extension()));
        matrix.export(*format, &path)?;
        written.push(path);
    }
    let report_path = settings.output_dir.join(REPORT_FILE);
    matrix.write_report(&settings.report_options(), &report_path)?;
    written.push(report_path);

    let summary = matrix.summary();
    info!(
        enzymes = summary.total_enzymes,
        enzyme_types = summary.unique_enzyme_types,
        mean_confidence = summary.mean_confidence,
        high_confidence = summary.high_confidence_count,
        gut_expressed = summary.gut_expressed_count,
        larval = summary.larval_stage_count,
        "Discovery complete"
    );

    Ok(RunOutcome {
        candidates,
        rejected,
        matrix_rows: matrix.len(),
        written,
    })
}
