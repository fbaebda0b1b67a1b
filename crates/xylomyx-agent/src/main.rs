//! Xylomyx: wood-digesting enzyme discovery
//! Entry point for the command-line binary.

mod cli;
mod config;
mod input;
mod run;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use xylomyx_common::{DiscoveryProfile, PRESET_NAMES};

use cli::{Cli, Commands, QueryArgs};

fn list_profiles() -> anyhow::Result<()> {
    for name in PRESET_NAMES {
        let profile = DiscoveryProfile::preset(name)?;
        let organism = &profile.organism;
        println!(
            "{name:<18} {} ({}) - {} enzyme types",
            organism.name,
            organism.common_name.as_deref().unwrap_or("-"),
            profile.enzymes.len()
        );
    }
    Ok(())
}

fn print_query(args: &QueryArgs, config: &config::Config) -> anyhow::Result<()> {
    let profile = run::resolve_profile(&args.profile, config)?;
    let query = match &args.template {
        Some(template) => profile.render_template(template)?,
        None => profile.build_query(args.enzyme.as_deref(), args.tissues, args.stages)?,
    };
    println!("{query}");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("xylomyx=debug,info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = config::Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Run(args) => {
            info!("Xylomyx {} starting discovery run", env!("CARGO_PKG_VERSION"));
            let settings = run::RunSettings::resolve(args, &config)?;
            info!(
                organism = %settings.profile.organism.name,
                min_confidence = settings.min_confidence,
                homology = settings.homology_hits.is_some(),
                "Settings resolved"
            );
            let outcome = run::execute(&settings).await?;
            info!(
                candidates = outcome.candidates,
                rejected = outcome.rejected,
                matrix_rows = outcome.matrix_rows,
                "Run finished"
            );
            for path in &outcome.written {
                info!("Wrote {}", path.display());
            }
        }
        Commands::Profiles => list_profiles()?,
        Commands::Query(args) => print_query(&args, &config)?,
    }

    Ok(())
}
