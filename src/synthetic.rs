//! Deterministic synthetic fallback dataset
//!
//! When the real download/extract path fails, a placeholder dataset of the
//! configured counts is generated instead: uniform random RGB images and
//! thresholded random noise as boundary masks. A fixed seed makes two runs
//! byte-identical, which keeps downstream smoke tests reproducible.

use crate::config::PrepareConfig;
use crate::error::{DatasetError, Result};
use crate::layout::{DatasetLayout, Split};
use image::{GrayImage, RgbImage};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Noise values strictly above this threshold become boundary pixels
const MASK_THRESHOLD: f64 = 0.8;

/// Generate the complete synthetic dataset into the output tree
///
/// Draws from a single RNG stream seeded with `config.synthetic_seed`,
/// producing per index one RGB JPEG and one matching single-channel PNG
/// mask, training split first.
///
/// # Errors
/// Returns an error if an image cannot be encoded or written
pub fn generate(config: &PrepareConfig, layout: &DatasetLayout) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(config.synthetic_seed);

    for split in Split::ALL {
        let count = match split {
            Split::Train => config.train_count,
            Split::Test => config.test_count,
        };
        generate_split(config, layout, split, count, &mut rng)?;
        log::info!("Generated {} synthetic {} samples", count, split);
    }

    Ok(())
}

fn generate_split(
    config: &PrepareConfig,
    layout: &DatasetLayout,
    split: Split,
    count: usize,
    rng: &mut StdRng,
) -> Result<()> {
    let size = config.synthetic_size;
    let images_dir = layout.images_dir(split);
    let masks_dir = layout.ground_truth_dir(split);

    for index in 0..count {
        let image = random_image(size, rng)?;
        image.save(images_dir.join(format!("{:06}.jpg", index)))?;

        let mask = random_mask(size, rng)?;
        mask.save(masks_dir.join(format!("{:06}.png", index)))?;
    }

    Ok(())
}

/// Uniform random RGB image of `size` x `size` pixels
fn random_image(size: u32, rng: &mut StdRng) -> Result<RgbImage> {
    let mut pixels = vec![0u8; size as usize * size as usize * 3];
    rng.fill(pixels.as_mut_slice());
    RgbImage::from_raw(size, size, pixels)
        .ok_or_else(|| DatasetError::conversion("synthetic image buffer size mismatch"))
}

/// Thresholded uniform noise mask: pixels are either 0 or 255
fn random_mask(size: u32, rng: &mut StdRng) -> Result<GrayImage> {
    let pixel_count = size as usize * size as usize;
    let mut pixels = Vec::with_capacity(pixel_count);
    for _ in 0..pixel_count {
        let noise: f64 = rng.gen();
        pixels.push(if noise > MASK_THRESHOLD { 255 } else { 0 });
    }
    GrayImage::from_raw(size, size, pixels)
        .ok_or_else(|| DatasetError::conversion("synthetic mask buffer size mismatch"))
}
