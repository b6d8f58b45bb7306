//! Run summary reporting

use crate::layout::{DatasetLayout, Split};
use std::path::PathBuf;

/// Which path produced the prepared dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetSource {
    /// The real archive was downloaded and extracted
    Downloaded,
    /// The synthetic fallback was generated
    Synthetic,
}

impl std::fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Downloaded => write!(f, "downloaded"),
            Self::Synthetic => write!(f, "synthetic fallback"),
        }
    }
}

/// Final file counts of a preparation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSummary {
    /// Which path produced the dataset
    pub source: DatasetSource,
    /// Root of the output tree
    pub data_dir: PathBuf,
    /// Training images present
    pub train_images: usize,
    /// Test images present
    pub test_images: usize,
    /// Training annotations present
    pub train_annotations: usize,
    /// Test annotations present
    pub test_annotations: usize,
}

impl DatasetSummary {
    /// Count the files currently present in the output tree
    #[must_use]
    pub fn from_layout(layout: &DatasetLayout, source: DatasetSource) -> Self {
        Self {
            source,
            data_dir: layout.data_dir().to_path_buf(),
            train_images: DatasetLayout::count_files(&layout.images_dir(Split::Train)),
            test_images: DatasetLayout::count_files(&layout.images_dir(Split::Test)),
            train_annotations: DatasetLayout::count_files(&layout.ground_truth_dir(Split::Train)),
            test_annotations: DatasetLayout::count_files(&layout.ground_truth_dir(Split::Test)),
        }
    }
}

impl std::fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "BSDS500 dataset ready ({})", self.source)?;
        writeln!(f, "  Training images:      {}", self.train_images)?;
        writeln!(f, "  Test images:          {}", self.test_images)?;
        writeln!(f, "  Training annotations: {}", self.train_annotations)?;
        writeln!(f, "  Test annotations:     {}", self.test_annotations)?;
        writeln!(f, "Dataset structure:")?;
        writeln!(f, "  {}/images/train/", self.data_dir.display())?;
        writeln!(f, "  {}/images/test/", self.data_dir.display())?;
        writeln!(f, "  {}/groundTruth/train/", self.data_dir.display())?;
        write!(f, "  {}/groundTruth/test/", self.data_dir.display())
    }
}
