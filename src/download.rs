//! Archive downloading
//!
//! Async download of the dataset archive with optional progress reporting.
//! The archive is streamed to a `.part` file next to its final location and
//! renamed once complete, so an interrupted download never leaves a
//! plausible-looking archive behind. No retries, no resume.

use crate::error::{DatasetError, Result};
use futures_util::stream::TryStreamExt;
#[cfg(feature = "cli")]
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use std::fs;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tokio_util::io::StreamReader;

/// Archive downloader with progress reporting
#[derive(Debug)]
pub struct ArchiveDownloader {
    client: Client,
}

/// Progress bar abstraction that works with and without CLI features
#[derive(Debug)]
pub enum ProgressIndicator {
    #[cfg(feature = "cli")]
    Indicatif(ProgressBar),
    NoOp,
}

impl ProgressIndicator {
    /// Set message for progress indicator
    pub fn set_message(&self, msg: String) {
        match self {
            #[cfg(feature = "cli")]
            Self::Indicatif(pb) => pb.set_message(msg),
            Self::NoOp => {},
        }
    }

    /// Set length for progress indicator
    pub fn set_length(&self, len: u64) {
        match self {
            #[cfg(feature = "cli")]
            Self::Indicatif(pb) => pb.set_length(len),
            Self::NoOp => {},
        }
    }

    /// Set position for progress indicator
    pub fn set_position(&self, pos: u64) {
        match self {
            #[cfg(feature = "cli")]
            Self::Indicatif(pb) => pb.set_position(pos),
            Self::NoOp => {},
        }
    }

    /// Finish progress indicator with message
    pub fn finish_with_message(&self, msg: String) {
        match self {
            #[cfg(feature = "cli")]
            Self::Indicatif(pb) => pb.finish_with_message(msg),
            Self::NoOp => {},
        }
    }
}

impl ArchiveDownloader {
    /// Create a new archive downloader
    ///
    /// # Errors
    /// - Failed to create HTTP client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(300)) // 5 minute timeout
            .build()
            .map_err(|e| DatasetError::network_error("Failed to create HTTP client", e))?;

        Ok(Self { client })
    }

    /// Download the archive at `url` to `dest`
    ///
    /// # Errors
    /// - Network errors during download (including non-success HTTP status)
    /// - File system errors while writing the archive
    pub async fn download(&self, url: &str, dest: &Path, show_progress: bool) -> Result<()> {
        log::info!("Downloading archive from: {}", url);

        let progress = if show_progress {
            Some(Self::create_progress_indicator())
        } else {
            None
        };

        let part_path = Self::partial_path(dest);

        let outcome = self
            .download_to(url, &part_path, progress.as_ref())
            .await
            .and_then(|()| {
                fs::rename(&part_path, dest).map_err(|e| {
                    DatasetError::file_io_error("move downloaded archive into place", dest, &e)
                })
            });

        match outcome {
            Ok(()) => {
                if let Some(pb) = progress {
                    pb.finish_with_message(format!("Downloaded {}", dest.display()));
                }

                log::info!("Downloaded archive to {}", dest.display());
                Ok(())
            },
            Err(e) => {
                if part_path.exists() {
                    if let Err(cleanup_err) = fs::remove_file(&part_path) {
                        log::warn!("Failed to remove partial download: {}", cleanup_err);
                    }
                }

                if let Some(pb) = progress {
                    pb.finish_with_message("Download failed".to_string());
                }

                Err(e)
            },
        }
    }

    /// Path of the in-flight partial download
    fn partial_path(dest: &Path) -> std::path::PathBuf {
        let mut name = dest
            .file_name()
            .map_or_else(|| "download".to_string(), |n| n.to_string_lossy().into_owned());
        name.push_str(".part");
        dest.with_file_name(name)
    }

    /// Create a progress indicator for download reporting
    fn create_progress_indicator() -> ProgressIndicator {
        #[cfg(feature = "cli")]
        {
            let pb = ProgressBar::new(100);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            ProgressIndicator::Indicatif(pb)
        }
        #[cfg(not(feature = "cli"))]
        {
            ProgressIndicator::NoOp
        }
    }

    /// Stream the response body to `local_path`
    async fn download_to(
        &self,
        url: &str,
        local_path: &Path,
        progress: Option<&ProgressIndicator>,
    ) -> Result<()> {
        log::debug!("Downloading: {} -> {}", url, local_path.display());

        if let Some(parent) = local_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| DatasetError::file_io_error("create directory", parent, &e))?;
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DatasetError::network_error(&format!("Failed to download {}", url), e))?;

        if !response.status().is_success() {
            return Err(DatasetError::Network(format!(
                "HTTP error {} for {}",
                response.status(),
                url
            )));
        }

        let total_size = response.content_length();

        let mut file = tokio::fs::File::create(local_path)
            .await
            .map_err(|e| DatasetError::file_io_error("create file", local_path, &e))?;

        let mut stream = StreamReader::new(
            response
                .bytes_stream()
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e)),
        );

        let mut downloaded = 0u64;
        let mut buffer = vec![0; 8192]; // 8KB buffer

        loop {
            let bytes_read = tokio::io::AsyncReadExt::read(&mut stream, &mut buffer)
                .await
                .map_err(|e| DatasetError::network_error("Failed to read download stream", e))?;

            if bytes_read == 0 {
                break; // EOF
            }

            file.write_all(buffer.get(..bytes_read).unwrap_or(&[]))
                .await
                .map_err(|e| DatasetError::file_io_error("write to file", local_path, &e))?;

            downloaded += bytes_read as u64;

            if let Some(pb) = progress {
                if let Some(total) = total_size {
                    pb.set_length(total);
                    pb.set_position(downloaded);
                } else {
                    pb.set_message(format!(
                        "Downloaded {:.1} MB",
                        downloaded as f64 / 1_024_000.0
                    ));
                }
            }
        }

        file.flush()
            .await
            .map_err(|e| DatasetError::file_io_error("flush file", local_path, &e))?;

        log::debug!(
            "Downloaded {} bytes to {}",
            downloaded,
            local_path.display()
        );
        Ok(())
    }
}

impl Default for ArchiveDownloader {
    fn default() -> Self {
        Self::new().expect("Failed to create default archive downloader")
    }
}
