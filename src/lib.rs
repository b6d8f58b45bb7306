#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::uninlined_format_args)]

//! # BSDS500 Dataset Fetcher
//!
//! A small library and CLI that prepares a lightweight local copy of the
//! BSDS500 edge-detection dataset: it downloads the public archive, extracts
//! it, keeps a sorted bounded prefix of each split's images, rasterizes the
//! matching MAT boundary annotations to single-channel PNG masks, and cleans
//! up the archive and intermediates. If anything in the real-data path
//! fails, a deterministic synthetic placeholder dataset of the same shape is
//! generated instead, so downstream training code always finds a usable
//! tree.
//!
//! ## Output layout
//!
//! ```text
//! data/BSDS500/images/{train,test}/*.jpg
//! data/BSDS500/groundTruth/{train,test}/*.png
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bsds_fetch::{prepare_dataset, PrepareConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = PrepareConfig::default();
//! let summary = prepare_dataset(&config).await?;
//! println!("{}", summary);
//! # Ok(())
//! # }
//! ```
//!
//! ## Library vs CLI Usage
//!
//! - **Library usage**: downloading, extraction, conversion and the
//!   synthetic fallback are available by default
//! - **CLI usage**: enable the `cli` feature for the `bsds-fetch` binary,
//!   progress bars and tracing output

pub mod archive;
pub mod boundary;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod layout;
pub mod select;
pub mod summary;
pub mod synthetic;
#[cfg(feature = "cli")]
pub mod tracing_config;

// Public API exports
pub use config::{AnnotationMode, PrepareConfig, PrepareConfigBuilder};
pub use download::{ArchiveDownloader, ProgressIndicator};
pub use error::{DatasetError, Result};
pub use layout::{DatasetLayout, Split};
pub use summary::{DatasetSource, DatasetSummary};

#[cfg(feature = "cli")]
pub use tracing_config::{TracingConfig, TracingFormat};

/// Prepare the dataset according to `config`
///
/// Runs the full pipeline: output tree setup, archive download, extraction,
/// bounded selection/copy of images, annotation handling, and cleanup of the
/// archive and extracted intermediates. Any failure along the real-data path
/// is logged, partial output state is discarded, and the deterministic
/// synthetic fallback is generated instead; the returned summary's
/// [`DatasetSource`] says which path produced the files.
///
/// # Errors
/// - Invalid configuration
/// - The synthetic fallback itself fails (e.g. the output tree is not
///   writable)
pub async fn prepare_dataset(config: &PrepareConfig) -> Result<DatasetSummary> {
    config.validate()?;

    let layout = DatasetLayout::new(&config.data_dir);
    layout.create_output_tree()?;

    if config.synthetic_only {
        log::info!("Synthetic-only run requested, skipping download");
        // Leftovers from a previous run would inflate the summary counts
        layout.reset_output_tree()?;
        synthetic::generate(config, &layout)?;
        return Ok(DatasetSummary::from_layout(&layout, DatasetSource::Synthetic));
    }

    match fetch_and_prepare(config, &layout).await {
        Ok(()) => Ok(DatasetSummary::from_layout(
            &layout,
            DatasetSource::Downloaded,
        )),
        Err(e) => {
            log::warn!("Dataset download failed: {}", e);
            log::info!("Falling back to synthetic dataset generation");

            layout.cleanup_intermediates_best_effort();
            layout.reset_output_tree()?;
            synthetic::generate(config, &layout)?;

            Ok(DatasetSummary::from_layout(&layout, DatasetSource::Synthetic))
        },
    }
}

/// The real-data path: download, extract, select, convert, clean up
async fn fetch_and_prepare(config: &PrepareConfig, layout: &DatasetLayout) -> Result<()> {
    let downloader = ArchiveDownloader::new()?;
    downloader
        .download(
            &config.archive_url,
            &layout.archive_path(),
            config.show_progress,
        )
        .await?;

    archive::extract(&layout.archive_path(), layout.data_dir())?;

    for split in Split::ALL {
        select::copy_images(config, layout, split)?;
        select::prepare_annotations(config, layout, split)?;
    }

    layout.cleanup_intermediates(config.keep_archive)?;
    Ok(())
}
