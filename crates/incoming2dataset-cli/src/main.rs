use anyhow::{Context, Result};
use clap::Parser;
use incoming2dataset_config::{FsConfig, RelocatorConfig, StdEnv, StorageBackend};
use incoming2dataset_core::{PartitionDate, PartitionLayout, Relocator};
use incoming2dataset_storage::OpendalStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Relocate one date partition from the processing root to the dataset root
#[derive(Parser)]
#[command(name = "incoming2dataset")]
#[command(version)]
#[command(about = "Relocate date-partitioned objects from processing to dataset", long_about = None)]
struct Cli {
    /// Partition date to relocate (YYYY-MM-DD)
    #[arg(short, long, value_name = "DATE")]
    date: String,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Store root directory (switches to the filesystem backend)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short = 'v', long, value_name = "LEVEL")]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Build tokio runtime and run the async relocation
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?
        .block_on(async_main(cli))
}

async fn async_main(cli: Cli) -> Result<()> {
    // Step 1: Load base configuration
    let mut config = if let Some(config_path) = &cli.config {
        // Explicit config file path provided
        RelocatorConfig::load_from_path(config_path, &StdEnv)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        // INCOMING2DATASET_CONFIG when set, deployment environment otherwise
        RelocatorConfig::load().context("Failed to load configuration")?
    };

    // Step 2: Apply CLI overrides (highest priority)
    apply_cli_overrides(&mut config, &cli);

    // Step 3: Validate the merged configuration before touching the store
    config.validate()?;

    init_tracing(cli.log_level.as_deref());

    // Step 4: Reject a malformed date before any store operation
    let date = PartitionDate::parse(&cli.date)?;

    let store = init_store(&config)?;
    let relocator = Relocator::new(
        Arc::new(store),
        PartitionLayout {
            processing_root: config.layout.processing_folder.clone(),
            dataset_root: config.layout.dataset_folder.clone(),
        },
    );

    let summary = relocator.relocate(date).await?;

    // Summary JSON owns stdout; logs went to stderr
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn apply_cli_overrides(config: &mut RelocatorConfig, cli: &Cli) {
    // Point the store at a local directory for this run
    if let Some(output) = &cli.output {
        config.storage.backend = StorageBackend::Fs;
        config.storage.fs = Some(FsConfig {
            root: output.to_string_lossy().to_string(),
        });
    }
}

fn init_store(config: &RelocatorConfig) -> Result<OpendalStore> {
    match config.storage.backend {
        StorageBackend::Fs => {
            let fs = config.storage.fs.as_ref().ok_or_else(|| {
                anyhow::anyhow!("filesystem backend requires storage.fs configuration")
            })?;

            // The relocator lists before it writes, so a fresh local root
            // must exist up front for the run to start from an empty store.
            std::fs::create_dir_all(&fs.root)
                .with_context(|| format!("Failed to create store root: {}", fs.root))?;

            info!("Using filesystem storage at: {}", fs.root);
            OpendalStore::new_fs(&fs.root)
        }
        StorageBackend::S3 => {
            let s3 = config
                .storage
                .s3
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("s3 backend requires storage.s3 configuration"))?;

            info!(
                "Using S3 storage: bucket={}, region={}",
                s3.bucket, s3.region
            );
            OpendalStore::new_s3(&s3.bucket, &s3.region, s3.endpoint.as_deref())
        }
    }
}

/// Initialize tracing/logging
fn init_tracing(log_level: Option<&str>) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // --log-level wins, then RUST_LOG, then info
    let env_filter = match log_level {
        Some(level) => EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info")),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    // stdout carries the summary JSON; keep logs on stderr
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
