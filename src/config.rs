//! Configuration types for dataset preparation

use std::path::PathBuf;

/// Default archive URL (public BSDS500 mirror)
pub const DEFAULT_ARCHIVE_URL: &str = "https://figshare.com/ndownloader/files/25236740";

/// Default data directory relative to the working directory
pub const DEFAULT_DATA_DIR: &str = "data/BSDS500";

/// Default number of training samples to keep
pub const DEFAULT_TRAIN_COUNT: usize = 50;

/// Default number of test samples to keep
pub const DEFAULT_TEST_COUNT: usize = 20;

/// Default edge length of synthetic fallback images
pub const DEFAULT_SYNTHETIC_SIZE: u32 = 256;

/// Default RNG seed for the synthetic fallback
pub const DEFAULT_SYNTHETIC_SEED: u64 = 42;

/// How ground-truth annotation files are brought into the output tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationMode {
    /// Parse each MAT annotation and rasterize its boundary field to a
    /// single-channel PNG
    Rasterize,
    /// Copy the raw MAT annotation file unmodified
    CopyRaw,
}

impl Default for AnnotationMode {
    fn default() -> Self {
        Self::Rasterize
    }
}

impl std::fmt::Display for AnnotationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rasterize => write!(f, "rasterize"),
            Self::CopyRaw => write!(f, "copy-raw"),
        }
    }
}

/// Configuration for a dataset preparation run
#[derive(Debug, Clone, PartialEq)]
pub struct PrepareConfig {
    /// Root of the output tree (`images/` and `groundTruth/` are created here)
    pub data_dir: PathBuf,

    /// Archive URL (gzip-compressed tarball)
    pub archive_url: String,

    /// Number of training images/annotations to keep
    pub train_count: usize,

    /// Number of test images/annotations to keep
    pub test_count: usize,

    /// Annotation handling mode
    pub annotation_mode: AnnotationMode,

    /// Name of the numeric field to rasterize from each MAT annotation.
    /// When the field is absent, the first 2-D or 3-D numeric array is used.
    pub boundary_field: String,

    /// Edge length (pixels) of synthetic fallback images
    pub synthetic_size: u32,

    /// RNG seed for the synthetic fallback
    pub synthetic_seed: u64,

    /// Skip the download entirely and generate the synthetic dataset
    pub synthetic_only: bool,

    /// Keep the downloaded archive after extraction
    pub keep_archive: bool,

    /// Display download progress
    pub show_progress: bool,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            archive_url: DEFAULT_ARCHIVE_URL.to_string(),
            train_count: DEFAULT_TRAIN_COUNT,
            test_count: DEFAULT_TEST_COUNT,
            annotation_mode: AnnotationMode::default(),
            boundary_field: "boundary".to_string(),
            synthetic_size: DEFAULT_SYNTHETIC_SIZE,
            synthetic_seed: DEFAULT_SYNTHETIC_SEED,
            synthetic_only: false,
            keep_archive: false,
            show_progress: false,
        }
    }
}

impl PrepareConfig {
    /// Create a new configuration builder for fluent API construction
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bsds_fetch::PrepareConfig;
    ///
    /// let config = PrepareConfig::builder()
    ///     .train_count(10)
    ///     .test_count(4)
    ///     .synthetic_only(true)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(config.train_count, 10);
    /// ```
    #[must_use]
    pub fn builder() -> PrepareConfigBuilder {
        PrepareConfigBuilder::default()
    }

    /// Validate all configuration parameters
    ///
    /// # Errors
    /// - Zero synthetic image size
    /// - Empty or non-HTTP(S) archive URL when a download is requested
    pub fn validate(&self) -> crate::Result<()> {
        if self.synthetic_size == 0 {
            return Err(crate::error::DatasetError::config_value_error(
                "synthetic image size",
                self.synthetic_size,
                ">= 1",
            ));
        }

        if !self.synthetic_only {
            if self.archive_url.is_empty() {
                return Err(crate::error::DatasetError::invalid_config(
                    "Archive URL cannot be empty",
                ));
            }
            if !self.archive_url.starts_with("http://") && !self.archive_url.starts_with("https://")
            {
                return Err(crate::error::DatasetError::invalid_config(format!(
                    "Unsupported archive URL scheme: {}. Expected http:// or https://",
                    self.archive_url
                )));
            }
        }

        Ok(())
    }
}

/// Builder for `PrepareConfig`
#[derive(Debug, Default)]
pub struct PrepareConfigBuilder {
    config: PrepareConfig,
}

impl PrepareConfigBuilder {
    /// Set the output data directory
    #[must_use]
    pub fn data_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.config.data_dir = dir.into();
        self
    }

    /// Set the archive URL
    #[must_use]
    pub fn archive_url<S: Into<String>>(mut self, url: S) -> Self {
        self.config.archive_url = url.into();
        self
    }

    /// Set the number of training samples to keep
    #[must_use]
    pub fn train_count(mut self, count: usize) -> Self {
        self.config.train_count = count;
        self
    }

    /// Set the number of test samples to keep
    #[must_use]
    pub fn test_count(mut self, count: usize) -> Self {
        self.config.test_count = count;
        self
    }

    /// Set the annotation handling mode
    #[must_use]
    pub fn annotation_mode(mut self, mode: AnnotationMode) -> Self {
        self.config.annotation_mode = mode;
        self
    }

    /// Set the boundary field name looked up in MAT annotations
    #[must_use]
    pub fn boundary_field<S: Into<String>>(mut self, field: S) -> Self {
        self.config.boundary_field = field.into();
        self
    }

    /// Set the synthetic image edge length
    #[must_use]
    pub fn synthetic_size(mut self, size: u32) -> Self {
        self.config.synthetic_size = size;
        self
    }

    /// Set the synthetic RNG seed
    #[must_use]
    pub fn synthetic_seed(mut self, seed: u64) -> Self {
        self.config.synthetic_seed = seed;
        self
    }

    /// Skip the download and generate the synthetic dataset directly
    #[must_use]
    pub fn synthetic_only(mut self, enabled: bool) -> Self {
        self.config.synthetic_only = enabled;
        self
    }

    /// Keep the downloaded archive after extraction
    #[must_use]
    pub fn keep_archive(mut self, enabled: bool) -> Self {
        self.config.keep_archive = enabled;
        self
    }

    /// Display download progress
    #[must_use]
    pub fn show_progress(mut self, enabled: bool) -> Self {
        self.config.show_progress = enabled;
        self
    }

    /// Build the configuration, validating all parameters
    ///
    /// # Errors
    /// Returns an error if validation fails (see [`PrepareConfig::validate`])
    pub fn build(self) -> crate::Result<PrepareConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_original_constants() {
        let config = PrepareConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("data/BSDS500"));
        assert_eq!(config.archive_url, DEFAULT_ARCHIVE_URL);
        assert_eq!(config.train_count, 50);
        assert_eq!(config.test_count, 20);
        assert_eq!(config.synthetic_size, 256);
        assert_eq!(config.synthetic_seed, 42);
        assert_eq!(config.annotation_mode, AnnotationMode::Rasterize);
        assert!(!config.synthetic_only);
        assert!(!config.keep_archive);
    }

    #[test]
    fn test_builder_chaining() {
        let config = PrepareConfig::builder()
            .data_dir("/tmp/bsds")
            .train_count(5)
            .test_count(2)
            .annotation_mode(AnnotationMode::CopyRaw)
            .synthetic_seed(7)
            .build()
            .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/bsds"));
        assert_eq!(config.train_count, 5);
        assert_eq!(config.test_count, 2);
        assert_eq!(config.annotation_mode, AnnotationMode::CopyRaw);
        assert_eq!(config.synthetic_seed, 7);
    }

    #[test]
    fn test_validate_rejects_zero_size() {
        let result = PrepareConfig::builder().synthetic_size(0).build();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("synthetic image size"));
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let result = PrepareConfig::builder().archive_url("").build();
        assert!(result.is_err());

        let result = PrepareConfig::builder()
            .archive_url("ftp://example.com/archive.tgz")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_synthetic_only_skips_url_validation() {
        let config = PrepareConfig::builder()
            .archive_url("")
            .synthetic_only(true)
            .build()
            .unwrap();
        assert!(config.synthetic_only);
    }

    #[test]
    fn test_annotation_mode_display() {
        assert_eq!(AnnotationMode::Rasterize.to_string(), "rasterize");
        assert_eq!(AnnotationMode::CopyRaw.to_string(), "copy-raw");
    }
}
