//! kospeech-ingest - KoreanSpeech dialogue corpus manifest builder
//!
//! Scans the corpus metadata lists, validates and normalizes each utterance,
//! and writes the recording/supervision manifest pair consumed by the
//! downstream training pipeline.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kospeech_ingest::archive;
use kospeech_ingest::builder;
use kospeech_ingest::codes::{AgeCode, AttributeFilter, SexCode};
use kospeech_ingest::config::IngestConfig;
use kospeech_ingest::normalize::KoreanG2p;
use kospeech_ingest::scanner;

/// Command-line arguments for kospeech-ingest
#[derive(Parser, Debug)]
#[command(name = "kospeech-ingest")]
#[command(about = "Builds recording/supervision manifests from the KoreanSpeech dialogue corpus")]
#[command(version)]
struct Args {
    /// Corpus root directory
    #[arg(long, env = "KOSPEECH_DATA")]
    data: PathBuf,

    /// Extract .tar.gz archives under the corpus root before scanning
    #[arg(long)]
    unzip: bool,

    /// Sex code to exclude (M or F)
    #[arg(long)]
    sex: Option<String>,

    /// Age codes to exclude (comma-separated: C, T, A, S, Z)
    #[arg(long, value_delimiter = ',')]
    age: Vec<String>,

    /// Manifest output directory
    #[arg(long, default_value = "data/manifests", env = "KOSPEECH_OUT")]
    out: PathBuf,

    /// Worker count (defaults to available parallelism)
    #[arg(long)]
    jobs: Option<usize>,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kospeech_ingest=info,kospeech_common=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut filter = AttributeFilter::default();
    if let Some(sex) = &args.sex {
        filter
            .sex
            .insert(SexCode::parse(sex).context("invalid --sex code")?);
    }
    for age in &args.age {
        filter
            .age
            .insert(AgeCode::parse(age).context("invalid --age code")?);
    }

    let config = IngestConfig::new(args.data, args.out, args.jobs);
    info!("Corpus root: {}", config.data_root.display());
    info!("Workers: {}", config.parallelism);

    if args.unzip {
        let extracted = archive::expand_all(&config.data_root);
        info!("{} archives extracted", extracted);
    }

    let records = scanner::scan(&config, &filter, KoreanG2p::new)
        .context("Failed to scan corpus metadata")?;

    let (recordings, supervisions) =
        builder::build(&records, &config).context("Failed to assemble manifests")?;
    let (recordings_path, supervisions_path) =
        builder::write_manifests(&recordings, &supervisions, &config)
            .context("Failed to write manifests")?;

    info!(
        "Wrote {} recordings to {}",
        recordings.len(),
        recordings_path.display()
    );
    info!(
        "Wrote {} supervisions to {}",
        supervisions.len(),
        supervisions_path.display()
    );
    Ok(())
}
