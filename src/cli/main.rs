//! Dataset fetch CLI
//!
//! Command-line interface for downloading and preparing the BSDS500
//! dataset. A bare invocation reproduces the original fixed constants:
//! `data/BSDS500`, 50 training and 20 test samples, rasterized annotations,
//! seed 42 for the synthetic fallback.

use crate::config::{AnnotationMode, PrepareConfig};
use crate::prepare_dataset;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// BSDS500 dataset fetch tool
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "bsds-fetch")]
pub struct Cli {
    /// Output data directory
    #[arg(long, value_name = "DIR", default_value = crate::config::DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Archive URL (gzip-compressed tarball)
    #[arg(long, value_name = "URL", default_value = crate::config::DEFAULT_ARCHIVE_URL)]
    pub url: String,

    /// Number of training samples to keep
    #[arg(long, default_value_t = crate::config::DEFAULT_TRAIN_COUNT)]
    pub train_count: usize,

    /// Number of test samples to keep
    #[arg(long, default_value_t = crate::config::DEFAULT_TEST_COUNT)]
    pub test_count: usize,

    /// Annotation handling mode
    #[arg(long, value_enum, default_value_t = CliAnnotationMode::Rasterize)]
    pub annotations: CliAnnotationMode,

    /// Boundary field name looked up in MAT annotations
    #[arg(long, default_value = "boundary")]
    pub boundary_field: String,

    /// Skip the download and generate the synthetic dataset directly
    #[arg(long)]
    pub synthetic_only: bool,

    /// Keep the downloaded archive after extraction
    #[arg(long)]
    pub keep_archive: bool,

    /// RNG seed for the synthetic fallback
    #[arg(long, default_value_t = crate::config::DEFAULT_SYNTHETIC_SEED)]
    pub seed: u64,

    /// Edge length (pixels) of synthetic fallback images
    #[arg(long, default_value_t = crate::config::DEFAULT_SYNTHETIC_SIZE)]
    pub synthetic_size: u32,

    /// Disable the download progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Enable verbose logging (-v: DEBUG, -vv: TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

pub async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose).context("Failed to initialize tracing")?;

    let config = build_config(&cli).context("Invalid CLI arguments")?;

    info!("Preparing BSDS500 dataset in {}", config.data_dir.display());

    let start_time = Instant::now();
    let summary = prepare_dataset(&config)
        .await
        .context("Failed to prepare dataset")?;

    info!(
        "Dataset prepared in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    println!("{}", summary);

    Ok(())
}

/// Convert CLI arguments to a validated configuration
fn build_config(cli: &Cli) -> Result<PrepareConfig> {
    let config = PrepareConfig::builder()
        .data_dir(cli.data_dir.clone())
        .archive_url(cli.url.clone())
        .train_count(cli.train_count)
        .test_count(cli.test_count)
        .annotation_mode(cli.annotations.into())
        .boundary_field(cli.boundary_field.clone())
        .synthetic_seed(cli.seed)
        .synthetic_size(cli.synthetic_size)
        .synthetic_only(cli.synthetic_only)
        .keep_archive(cli.keep_archive)
        .show_progress(!cli.no_progress)
        .build()?;
    Ok(config)
}

/// Initialize tracing based on verbosity level
fn init_tracing(verbose_count: u8) -> Result<()> {
    use crate::tracing_config::{TracingConfig, TracingFormat};

    TracingConfig::new()
        .with_verbosity(verbose_count)
        .with_format(TracingFormat::Console)
        .init()
        .context("Failed to initialize tracing subscriber")
}

/// Annotation handling mode as exposed on the command line
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum CliAnnotationMode {
    /// Rasterize MAT boundary fields to single-channel PNG masks
    Rasterize,
    /// Copy raw MAT annotation files unmodified
    CopyRaw,
}

impl From<CliAnnotationMode> for AnnotationMode {
    fn from(mode: CliAnnotationMode) -> Self {
        match mode {
            CliAnnotationMode::Rasterize => Self::Rasterize,
            CliAnnotationMode::CopyRaw => Self::CopyRaw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses_defaults() {
        Cli::command().debug_assert();

        let cli = Cli::parse_from(["bsds-fetch"]);
        assert_eq!(cli.data_dir, PathBuf::from("data/BSDS500"));
        assert_eq!(cli.train_count, 50);
        assert_eq!(cli.test_count, 20);
        assert_eq!(cli.seed, 42);
        assert!(!cli.synthetic_only);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "bsds-fetch",
            "--data-dir",
            "/tmp/out",
            "--train-count",
            "5",
            "--annotations",
            "copy-raw",
            "--synthetic-only",
            "-vv",
        ]);
        assert_eq!(cli.data_dir, PathBuf::from("/tmp/out"));
        assert_eq!(cli.train_count, 5);
        assert_eq!(cli.annotations, CliAnnotationMode::CopyRaw);
        assert!(cli.synthetic_only);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_build_config_maps_fields() {
        let cli = Cli::parse_from(["bsds-fetch", "--synthetic-only", "--seed", "7"]);
        let config = build_config(&cli).unwrap();
        assert!(config.synthetic_only);
        assert_eq!(config.synthetic_seed, 7);
        assert_eq!(config.annotation_mode, AnnotationMode::Rasterize);
        assert!(config.show_progress);
    }

    #[test]
    fn test_build_config_rejects_bad_values() {
        let cli = Cli::parse_from(["bsds-fetch", "--synthetic-size", "0"]);
        assert!(build_config(&cli).is_err());
    }
}
