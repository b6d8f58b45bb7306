//! Archive extraction
//!
//! Extracts the downloaded gzip-compressed tarball into the data directory.
//! Entries with absolute paths or `..` components are rejected so a
//! malformed archive cannot write outside the destination.

use crate::error::{DatasetError, Result};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::BufReader;
use std::path::{Component, Path};

/// Extract a `.tgz` archive into `dest`
///
/// Returns the number of entries unpacked.
///
/// # Errors
/// - The archive cannot be opened or is not valid gzip/tar data
/// - An entry path is absolute or escapes the destination
pub fn extract(archive_path: &Path, dest: &Path) -> Result<usize> {
    log::info!(
        "Extracting {} into {}",
        archive_path.display(),
        dest.display()
    );

    let file = File::open(archive_path)
        .map_err(|e| DatasetError::file_io_error("open archive", archive_path, &e))?;
    let decoder = GzDecoder::new(BufReader::new(file));
    let mut archive = tar::Archive::new(decoder);

    let mut unpacked = 0usize;
    let entries = archive
        .entries()
        .map_err(|e| DatasetError::archive(format!("read archive entries: {}", e)))?;

    for entry in entries {
        let mut entry =
            entry.map_err(|e| DatasetError::archive(format!("read archive entry: {}", e)))?;

        let entry_path = entry
            .path()
            .map_err(|e| DatasetError::archive(format!("decode entry path: {}", e)))?
            .into_owned();

        if entry_path.is_absolute()
            || entry_path
                .components()
                .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(DatasetError::archive(format!(
                "unsafe entry path in archive: {}",
                entry_path.display()
            )));
        }

        // unpack_in re-checks containment against the destination
        let written = entry.unpack_in(dest).map_err(|e| {
            DatasetError::archive(format!("unpack '{}': {}", entry_path.display(), e))
        })?;
        if written {
            unpacked += 1;
        }
    }

    log::info!("Extracted {} entries", unpacked);
    Ok(unpacked)
}
