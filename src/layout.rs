//! Output tree management for the prepared dataset
//!
//! This module owns every fixed path of the run: the output tree
//! (`images/{train,test}` and `groundTruth/{train,test}`), the downloaded
//! archive location, and the intermediate extraction directory. It also
//! performs the cleanup pass that removes the archive and intermediates
//! after a run.

use crate::error::{DatasetError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the downloaded archive inside the data directory
const ARCHIVE_FILE_NAME: &str = "bsds500.tgz";

/// Top-level directory the archive extracts to
const EXTRACTED_ROOT: &str = "BSR_bsds500";

/// Dataset split
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    /// Training split
    Train,
    /// Test split
    Test,
}

impl Split {
    /// Both splits, in the order they are processed
    pub const ALL: [Self; 2] = [Self::Train, Self::Test];

    /// Directory name used for this split on disk
    #[must_use]
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::Test => "test",
        }
    }
}

impl std::fmt::Display for Split {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Fixed on-disk layout of a dataset preparation run
#[derive(Debug, Clone)]
pub struct DatasetLayout {
    data_dir: PathBuf,
}

impl DatasetLayout {
    /// Create a layout rooted at `data_dir`
    #[must_use]
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Root of the output tree
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Output directory for images of a split
    #[must_use]
    pub fn images_dir(&self, split: Split) -> PathBuf {
        self.data_dir.join("images").join(split.dir_name())
    }

    /// Output directory for ground-truth annotations of a split
    #[must_use]
    pub fn ground_truth_dir(&self, split: Split) -> PathBuf {
        self.data_dir.join("groundTruth").join(split.dir_name())
    }

    /// Local path the archive is downloaded to
    #[must_use]
    pub fn archive_path(&self) -> PathBuf {
        self.data_dir.join(ARCHIVE_FILE_NAME)
    }

    /// Intermediate directory the archive extracts to
    #[must_use]
    pub fn extracted_root(&self) -> PathBuf {
        self.data_dir.join(EXTRACTED_ROOT)
    }

    /// Source directory for images of a split inside the extracted tree
    #[must_use]
    pub fn source_images_dir(&self, split: Split) -> PathBuf {
        self.extracted_root()
            .join("BSDS500")
            .join("data")
            .join("images")
            .join(split.dir_name())
    }

    /// Source directory for boundary annotations of a split inside the
    /// extracted tree
    #[must_use]
    pub fn source_boundaries_dir(&self, split: Split) -> PathBuf {
        self.extracted_root()
            .join("BSDS500")
            .join("data")
            .join("boundaries")
            .join(split.dir_name())
    }

    /// Create the output tree if absent
    ///
    /// # Errors
    /// Returns an error if any directory cannot be created
    pub fn create_output_tree(&self) -> Result<()> {
        for split in Split::ALL {
            for dir in [self.images_dir(split), self.ground_truth_dir(split)] {
                fs::create_dir_all(&dir)
                    .map_err(|e| DatasetError::file_io_error("create output directory", &dir, &e))?;
            }
        }
        Ok(())
    }

    /// Discard partial output state, leaving empty output directories
    ///
    /// Used before the synthetic fallback so a fallback run contains exactly
    /// the configured synthetic counts.
    ///
    /// # Errors
    /// Returns an error if a directory cannot be recreated
    pub fn reset_output_tree(&self) -> Result<()> {
        for split in Split::ALL {
            for dir in [self.images_dir(split), self.ground_truth_dir(split)] {
                if dir.exists() {
                    fs::remove_dir_all(&dir).map_err(|e| {
                        DatasetError::file_io_error("clear output directory", &dir, &e)
                    })?;
                }
                fs::create_dir_all(&dir)
                    .map_err(|e| DatasetError::file_io_error("create output directory", &dir, &e))?;
            }
        }
        Ok(())
    }

    /// Remove the downloaded archive and the intermediate extraction
    /// directory
    ///
    /// # Errors
    /// Returns an error if an existing intermediate cannot be removed
    pub fn cleanup_intermediates(&self, keep_archive: bool) -> Result<()> {
        let extracted = self.extracted_root();
        if extracted.exists() {
            fs::remove_dir_all(&extracted).map_err(|e| {
                DatasetError::file_io_error("remove extracted directory", &extracted, &e)
            })?;
        }

        let archive = self.archive_path();
        if !keep_archive && archive.exists() {
            fs::remove_file(&archive)
                .map_err(|e| DatasetError::file_io_error("remove archive", &archive, &e))?;
        }

        Ok(())
    }

    /// Best-effort cleanup used on the fallback path; failures are logged
    /// rather than propagated
    pub fn cleanup_intermediates_best_effort(&self) {
        if let Err(e) = self.cleanup_intermediates(false) {
            log::warn!("Failed to clean up intermediates: {}", e);
        }
    }

    /// Count regular files directly inside `dir` (zero if the directory is
    /// missing)
    pub fn count_files(dir: &Path) -> usize {
        fs::read_dir(dir)
            .map(|entries| {
                entries
                    .flatten()
                    .filter(|e| e.path().is_file())
                    .count()
            })
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fixed_paths() {
        let layout = DatasetLayout::new("data/BSDS500");
        assert_eq!(
            layout.images_dir(Split::Train),
            PathBuf::from("data/BSDS500/images/train")
        );
        assert_eq!(
            layout.ground_truth_dir(Split::Test),
            PathBuf::from("data/BSDS500/groundTruth/test")
        );
        assert_eq!(
            layout.archive_path(),
            PathBuf::from("data/BSDS500/bsds500.tgz")
        );
        assert_eq!(
            layout.extracted_root(),
            PathBuf::from("data/BSDS500/BSR_bsds500")
        );
        assert_eq!(
            layout.source_images_dir(Split::Train),
            PathBuf::from("data/BSDS500/BSR_bsds500/BSDS500/data/images/train")
        );
        assert_eq!(
            layout.source_boundaries_dir(Split::Test),
            PathBuf::from("data/BSDS500/BSR_bsds500/BSDS500/data/boundaries/test")
        );
    }

    #[test]
    fn test_create_output_tree() {
        let temp = TempDir::new().unwrap();
        let layout = DatasetLayout::new(temp.path().join("BSDS500"));
        layout.create_output_tree().unwrap();

        for split in Split::ALL {
            assert!(layout.images_dir(split).is_dir());
            assert!(layout.ground_truth_dir(split).is_dir());
        }

        // Idempotent
        layout.create_output_tree().unwrap();
    }

    #[test]
    fn test_reset_output_tree_discards_partial_state() {
        let temp = TempDir::new().unwrap();
        let layout = DatasetLayout::new(temp.path().join("BSDS500"));
        layout.create_output_tree().unwrap();

        let stale = layout.images_dir(Split::Train).join("stale.jpg");
        std::fs::write(&stale, b"partial").unwrap();
        assert!(stale.exists());

        layout.reset_output_tree().unwrap();
        assert!(!stale.exists());
        assert!(layout.images_dir(Split::Train).is_dir());
    }

    #[test]
    fn test_cleanup_intermediates() {
        let temp = TempDir::new().unwrap();
        let layout = DatasetLayout::new(temp.path().join("BSDS500"));
        layout.create_output_tree().unwrap();

        std::fs::create_dir_all(layout.extracted_root().join("BSDS500")).unwrap();
        std::fs::write(layout.archive_path(), b"tgz").unwrap();

        layout.cleanup_intermediates(false).unwrap();
        assert!(!layout.extracted_root().exists());
        assert!(!layout.archive_path().exists());

        // Nothing left to remove is fine
        layout.cleanup_intermediates(false).unwrap();
    }

    #[test]
    fn test_cleanup_keeps_archive_when_asked() {
        let temp = TempDir::new().unwrap();
        let layout = DatasetLayout::new(temp.path().join("BSDS500"));
        layout.create_output_tree().unwrap();
        std::fs::write(layout.archive_path(), b"tgz").unwrap();

        layout.cleanup_intermediates(true).unwrap();
        assert!(layout.archive_path().exists());
    }

    #[test]
    fn test_count_files() {
        let temp = TempDir::new().unwrap();
        assert_eq!(DatasetLayout::count_files(temp.path()), 0);

        std::fs::write(temp.path().join("a.jpg"), b"a").unwrap();
        std::fs::write(temp.path().join("b.jpg"), b"b").unwrap();
        std::fs::create_dir(temp.path().join("sub")).unwrap();
        assert_eq!(DatasetLayout::count_files(temp.path()), 2);

        assert_eq!(
            DatasetLayout::count_files(&temp.path().join("missing")),
            0
        );
    }
}
