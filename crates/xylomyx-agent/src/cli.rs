//! Command-line interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Xylomyx - wood-digesting enzyme discovery
#[derive(Debug, Parser)]
#[command(name = "xylomyx")]
#[command(version)]
#[command(about = "Score, rank and report candidate wood-digesting enzymes")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Runtime configuration file
    #[arg(long, global = true, env = "XYLOMYX_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the discovery pipeline over retrieved candidate records
    Run(RunArgs),
    /// List the built-in organism profiles
    Profiles,
    /// Print the search query for the retrieval layer
    Query(QueryArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct ProfileArgs {
    /// Built-in profile name
    #[arg(long, conflicts_with = "profile_file")]
    pub profile: Option<String>,

    /// YAML or JSON profile file
    #[arg(long)]
    pub profile_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// JSON array file, or directory of per-record .json files
    #[arg(long, short)]
    pub input: PathBuf,

    #[command(flatten)]
    pub profile: ProfileArgs,

    /// Minimum confidence for the matrix
    #[arg(long)]
    pub min_confidence: Option<f64>,

    /// Precomputed homology hits (enables the homology stage)
    #[arg(long)]
    pub homology_hits: Option<PathBuf>,

    /// Output directory
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Comma-separated export formats: csv, tsv, json
    #[arg(long)]
    pub format: Option<String>,

    /// Matrix ordering: overall, confidence, expression, homology [default: confidence]
    #[arg(long)]
    pub rank: Option<String>,

    /// Candidates listed in the report
    #[arg(long)]
    pub top_n: Option<usize>,

    /// Keep only gut-expressed candidates
    #[arg(long)]
    pub require_gut: bool,

    /// Keep only larval-stage candidates
    #[arg(long)]
    pub require_larval: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct QueryArgs {
    #[command(flatten)]
    pub profile: ProfileArgs,

    /// Restrict the query to one enzyme type
    #[arg(long)]
    pub enzyme: Option<String>,

    /// AND the profile's gut terms into the query
    #[arg(long)]
    pub tissues: bool,

    /// AND the profile's stage terms into the query
    #[arg(long)]
    pub stages: bool,

    /// Render a named query template instead
    #[arg(long, conflicts_with_all = ["enzyme", "tissues", "stages"])]
    pub template: Option<String>,
}
