//! Boundary annotation rasterization
//!
//! BSDS ground-truth annotations ship as MAT-File level 5 containers holding
//! a named numeric boundary field, either a 2-D plane or a stack of planes
//! from multiple annotators. Only the first plane is used. MAT data is
//! stored column-major, so the conversion transposes into the row-major
//! layout the `image` crate expects. Every nonzero source entry becomes a
//! full-intensity pixel.

use crate::error::{DatasetError, Result};
use image::{GrayImage, Luma};
use matfile::{MatFile, NumericData};
use ndarray::Array2;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Parse a MAT annotation file and rasterize its boundary field
///
/// Looks up `field` by name; when absent, the first 2-D or 3-D numeric
/// array in the container is used instead.
///
/// # Errors
/// - The file cannot be opened or is not a MAT 5 container
/// - No 2-D or 3-D numeric array is present
/// - The field's data is shorter than its declared dimensions
pub fn rasterize_file(path: &Path, field: &str) -> Result<GrayImage> {
    let file =
        File::open(path).map_err(|e| DatasetError::file_io_error("open annotation", path, &e))?;
    let mat = MatFile::parse(BufReader::new(file))
        .map_err(|e| DatasetError::conversion(format!("parse MAT file: {:?}", e)))?;

    let array = mat
        .find_by_name(field)
        .filter(|a| matches!(a.size().len(), 2 | 3))
        .or_else(|| {
            mat.arrays()
                .iter()
                .find(|a| matches!(a.size().len(), 2 | 3))
        })
        .ok_or_else(|| {
            DatasetError::conversion(format!("no 2-D or 3-D numeric field named '{}'", field))
        })?;

    let dims = array.size();
    let (rows, cols) = match dims.as_slice() {
        &[rows, cols] | &[rows, cols, _] => (rows, cols),
        _ => {
            return Err(DatasetError::conversion(format!(
                "unexpected field rank: {:?}",
                dims
            )))
        },
    };

    let values = real_to_f64(array.data());
    // First plane of a 3-D stack occupies the leading rows*cols elements
    let plane = plane_from_column_major(&values, rows, cols)?;
    Ok(mask_from_plane(&plane))
}

/// Collect the real part of any numeric MAT data as `f64`
fn real_to_f64(data: &NumericData) -> Vec<f64> {
    match data {
        NumericData::Int8 { real, .. } => real.iter().map(|&v| f64::from(v)).collect(),
        NumericData::UInt8 { real, .. } => real.iter().map(|&v| f64::from(v)).collect(),
        NumericData::Int16 { real, .. } => real.iter().map(|&v| f64::from(v)).collect(),
        NumericData::UInt16 { real, .. } => real.iter().map(|&v| f64::from(v)).collect(),
        NumericData::Int32 { real, .. } => real.iter().map(|&v| f64::from(v)).collect(),
        NumericData::UInt32 { real, .. } => real.iter().map(|&v| f64::from(v)).collect(),
        NumericData::Int64 { real, .. } => real.iter().map(|&v| v as f64).collect(),
        NumericData::UInt64 { real, .. } => real.iter().map(|&v| v as f64).collect(),
        NumericData::Single { real, .. } => real.iter().map(|&v| f64::from(v)).collect(),
        NumericData::Double { real, .. } => real.clone(),
    }
}

/// Reassemble a column-major value buffer into a row-major `(rows, cols)`
/// plane
///
/// # Errors
/// Returns an error if the buffer holds fewer than `rows * cols` values
pub(crate) fn plane_from_column_major(
    values: &[f64],
    rows: usize,
    cols: usize,
) -> Result<Array2<f64>> {
    let needed = rows * cols;
    if values.len() < needed {
        return Err(DatasetError::conversion(format!(
            "field data too short: {} values for {}x{}",
            values.len(),
            rows,
            cols
        )));
    }

    let mut plane = Array2::<f64>::zeros((rows, cols));
    for c in 0..cols {
        for r in 0..rows {
            if let Some(&v) = values.get(c * rows + r) {
                plane[[r, c]] = v;
            }
        }
    }
    Ok(plane)
}

/// Rasterize a plane to a single-channel image: nonzero entries become 255
pub(crate) fn mask_from_plane(plane: &Array2<f64>) -> GrayImage {
    let (rows, cols) = plane.dim();
    GrayImage::from_fn(cols as u32, rows as u32, |x, y| {
        if plane[[y as usize, x as usize]] != 0.0 {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}
