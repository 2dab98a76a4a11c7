//! abzsubmit - AcousticBrainz batch submission client
//!
//! Walks the given files and directories, extracts low-level features from
//! each audio file with the Essentia extractor and submits them. Files already
//! handled in an earlier run are skipped, so the command can be re-run on the
//! same collection at any time.

use std::path::PathBuf;
use std::sync::Arc;

use abz_client::db::{self, StatusStore};
use abz_client::services::{
    BatchRunner, EssentiaExtractor, ExtractorProfile, FeatureCache, FileProcessor, FileScanner,
    Progress, SubmissionClient,
};
use abz_client::targets::resolve_targets;
use abz_common::{ClientConfig, ConfigOverrides, TomlConfig};
use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for abzsubmit
#[derive(Parser, Debug)]
#[command(name = "abzsubmit")]
#[command(about = "Extract and submit audio features to AcousticBrainz")]
#[command(version)]
struct Args {
    /// Audio files or directories to process
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Config file (default: ~/.config/abz/config.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print every status on its own line and log at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Submission host, optionally with :port
    #[arg(long, env = "ABZ_HOST")]
    host: Option<String>,

    /// Extractor binary
    #[arg(long, env = "ABZ_EXTRACTOR")]
    extractor: Option<PathBuf>,

    /// Extractor profile file
    #[arg(long, env = "ABZ_PROFILE")]
    profile: Option<PathBuf>,

    /// Directory for cached feature payloads
    #[arg(long, env = "ABZ_CACHE_DIR")]
    cache_dir: Option<PathBuf>,

    /// Status database file
    #[arg(long, env = "ABZ_DATABASE")]
    database: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Every target must exist before any work starts
    let targets = resolve_targets(&args.paths)?;

    let file_config = TomlConfig::discover(args.config.as_deref())?;
    let overrides = ConfigOverrides {
        extractor_path: args.extractor,
        profile_file: args.profile,
        host: args.host,
        cache_dir: args.cache_dir,
        database_path: args.database,
    };
    let config = ClientConfig::resolve(overrides, file_config)?;

    init_tracing(&config, args.verbose);

    info!(
        "Starting abzsubmit v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let extractor_binary = which::which(&config.extractor_path)
        .with_context(|| format!("Extractor not found: {}", config.extractor_path.display()))?;
    info!("Extractor: {}", extractor_binary.display());

    let profile = ExtractorProfile::prepare(config.profile_file.as_deref())
        .context("Failed to prepare extractor profile")?;

    info!("Database: {}", config.database_path.display());
    let pool = db::init_database_pool(&config.database_path)
        .await
        .context("Failed to open status database")?;
    let store = StatusStore::open(pool).await?;

    info!("Cache: {}", config.cache_dir.display());
    let cache = FeatureCache::open(&config.cache_dir)?;

    let extractor = EssentiaExtractor::new(extractor_binary, profile.path());
    let submitter = SubmissionClient::new(config.host.clone(), config.timeout)
        .context("Failed to create HTTP client")?;
    info!("Submitting to http://{}", config.host);

    let processor = FileProcessor::new(store, cache, Arc::new(extractor), Arc::new(submitter));
    let scanner = FileScanner::new(config.extensions.clone());
    let mut runner = BatchRunner::new(processor, scanner, Progress::stdout(args.verbose));

    for target in &targets {
        runner.process_path(target).await?;
    }

    runner.finish();

    // Generated profile is deleted here
    drop(profile);

    Ok(())
}

/// `RUST_LOG` wins; otherwise the configured level, or debug with --verbose
fn init_tracing(config: &ClientConfig, verbose: bool) {
    let default_level = if verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
