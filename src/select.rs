//! Bounded, sorted selection of files from the extracted tree
//!
//! The original dataset ships hundreds of samples; only a lexicographically
//! sorted prefix of each split is kept. A missing source split is not an
//! error, that split is simply left empty.

use crate::boundary;
use crate::config::{AnnotationMode, PrepareConfig};
use crate::error::{DatasetError, Result};
use crate::layout::{DatasetLayout, Split};
use std::fs;
use std::path::{Path, PathBuf};

/// List regular files in `dir`, sorted by file name, truncated to `limit`
///
/// Returns an empty list if the directory does not exist.
///
/// # Errors
/// Returns an error if the directory exists but cannot be read
pub fn sorted_prefix(dir: &Path, limit: usize) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        log::debug!("Source directory missing, skipping: {}", dir.display());
        return Ok(Vec::new());
    }

    let entries =
        fs::read_dir(dir).map_err(|e| DatasetError::file_io_error("list directory", dir, &e))?;

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    files.truncate(limit);
    Ok(files)
}

/// Copy the sorted prefix of source images for `split` into the output tree
///
/// Returns the number of images copied.
///
/// # Errors
/// Returns an error if listing or copying fails
pub fn copy_images(config: &PrepareConfig, layout: &DatasetLayout, split: Split) -> Result<usize> {
    let source = layout.source_images_dir(split);
    let dest = layout.images_dir(split);
    let count = count_for(config, split);

    let mut copied = 0usize;
    for src in sorted_prefix(&source, count)? {
        let Some(file_name) = src.file_name() else {
            continue;
        };
        let dst = dest.join(file_name);
        fs::copy(&src, &dst).map_err(|e| DatasetError::file_io_error("copy image", &src, &e))?;
        copied += 1;
    }

    log::info!("Copied {} {} images", copied, split);
    Ok(copied)
}

/// Bring the sorted prefix of boundary annotations for `split` into the
/// output tree, per the configured annotation mode
///
/// In [`AnnotationMode::Rasterize`] mode, files whose MAT content cannot be
/// parsed or rasterized are skipped; the run continues with the rest.
/// Returns the number of annotations produced.
///
/// # Errors
/// Returns an error if listing or copying fails
pub fn prepare_annotations(
    config: &PrepareConfig,
    layout: &DatasetLayout,
    split: Split,
) -> Result<usize> {
    let source = layout.source_boundaries_dir(split);
    let dest = layout.ground_truth_dir(split);
    let count = count_for(config, split);

    let mut produced = 0usize;
    for src in sorted_prefix(&source, count)? {
        let Some(file_name) = src.file_name() else {
            continue;
        };

        match config.annotation_mode {
            AnnotationMode::CopyRaw => {
                let dst = dest.join(file_name);
                fs::copy(&src, &dst)
                    .map_err(|e| DatasetError::file_io_error("copy annotation", &src, &e))?;
                produced += 1;
            },
            AnnotationMode::Rasterize => {
                match boundary::rasterize_file(&src, &config.boundary_field) {
                    Ok(mask) => {
                        let dst = dest.join(Path::new(file_name).with_extension("png"));
                        mask.save(&dst)?;
                        produced += 1;
                    },
                    Err(e) => {
                        // Skip unconvertible files without a per-file warning
                        log::debug!("Skipping annotation {}: {}", src.display(), e);
                    },
                }
            },
        }
    }

    log::info!("Prepared {} {} annotations", produced, split);
    Ok(produced)
}

fn count_for(config: &PrepareConfig, split: Split) -> usize {
    match split {
        Split::Train => config.train_count,
        Split::Test => config.test_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sorted_prefix_orders_and_bounds() {
        let temp = TempDir::new().unwrap();
        for name in ["c.jpg", "a.jpg", "b.jpg"] {
            fs::write(temp.path().join(name), b"x").unwrap();
        }
        fs::create_dir(temp.path().join("sub")).unwrap();

        let files = sorted_prefix(temp.path(), 2).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.jpg"]);
    }

    #[test]
    fn test_sorted_prefix_missing_dir_is_empty() {
        let temp = TempDir::new().unwrap();
        let files = sorted_prefix(&temp.path().join("missing"), 10).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_sorted_prefix_fewer_than_limit() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("only.jpg"), b"x").unwrap();
        let files = sorted_prefix(temp.path(), 50).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_copy_images_into_layout() {
        let temp = TempDir::new().unwrap();
        let layout = DatasetLayout::new(temp.path().join("BSDS500"));
        layout.create_output_tree().unwrap();

        let source = layout.source_images_dir(Split::Train);
        fs::create_dir_all(&source).unwrap();
        for name in ["100007.jpg", "100039.jpg", "100099.jpg"] {
            fs::write(source.join(name), b"jpeg").unwrap();
        }

        let config = PrepareConfig::builder()
            .train_count(2)
            .synthetic_only(true)
            .build()
            .unwrap();
        let copied = copy_images(&config, &layout, Split::Train).unwrap();

        assert_eq!(copied, 2);
        assert!(layout.images_dir(Split::Train).join("100007.jpg").exists());
        assert!(layout.images_dir(Split::Train).join("100039.jpg").exists());
        assert!(!layout.images_dir(Split::Train).join("100099.jpg").exists());
    }

    #[test]
    fn test_copy_raw_annotations() {
        let temp = TempDir::new().unwrap();
        let layout = DatasetLayout::new(temp.path().join("BSDS500"));
        layout.create_output_tree().unwrap();

        let source = layout.source_boundaries_dir(Split::Test);
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("100007.mat"), b"raw mat bytes").unwrap();

        let config = PrepareConfig::builder()
            .annotation_mode(AnnotationMode::CopyRaw)
            .synthetic_only(true)
            .build()
            .unwrap();
        let produced = prepare_annotations(&config, &layout, Split::Test).unwrap();

        assert_eq!(produced, 1);
        let dst = layout.ground_truth_dir(Split::Test).join("100007.mat");
        assert_eq!(fs::read(dst).unwrap(), b"raw mat bytes");
    }

    #[test]
    fn test_rasterize_skips_unparseable_annotations() {
        let temp = TempDir::new().unwrap();
        let layout = DatasetLayout::new(temp.path().join("BSDS500"));
        layout.create_output_tree().unwrap();

        let source = layout.source_boundaries_dir(Split::Train);
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("100007.mat"), b"definitely not a MAT file").unwrap();

        let config = PrepareConfig::builder().synthetic_only(true).build().unwrap();
        let produced = prepare_annotations(&config, &layout, Split::Train).unwrap();

        assert_eq!(produced, 0);
        assert_eq!(
            DatasetLayout::count_files(&layout.ground_truth_dir(Split::Train)),
            0
        );
    }
}
