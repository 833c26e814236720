use std::path::Path;

use image::{DynamicImage, ImageReader};
use num_traits::ToPrimitive;

use crate::{error::ShadowError, grid::Grid};

/// Decode a raster image from disk.
pub fn read_image<P: AsRef<Path>>(path: P) -> crate::error::Result<DynamicImage> {
    let path = path.as_ref();
    let reader = ImageReader::open(path).map_err(|e| ShadowError::invalid_input(path, e))?;
    // sniff the format from content, extensions lie
    let reader = reader
        .with_guessed_format()
        .map_err(|e| ShadowError::invalid_input(path, e))?;
    reader
        .decode()
        .map_err(|e| ShadowError::invalid_input(path, e))
}

/// Read the first channel of a raster image as a grid of samples.
pub fn read_first_channel<P: AsRef<Path>>(path: P) -> crate::error::Result<Grid<f64>> {
    Ok(first_channel(&read_image(path)?))
}

/// Extract the first channel of an image in BGR channel order.
///
/// Gray (and gray + alpha) images give their luma, color images their blue channel.
/// Wider sample types are reduced to 8 bits first.
pub fn first_channel(image: &DynamicImage) -> Grid<f64> {
    let width = image.width() as usize;
    let height = image.height() as usize;

    let samples: Vec<f64> = match image.color().channel_count() {
        1 | 2 => image
            .to_luma8()
            .pixels()
            .map(|pixel| sample_to_f64(pixel.0[0]))
            .collect(),
        // BGR order, alpha dropped
        _ => image
            .to_rgb8()
            .pixels()
            .map(|pixel| sample_to_f64(pixel.0[2]))
            .collect(),
    };

    Grid::from_vec(width, height, samples)
}

#[inline]
fn sample_to_f64<S: ToPrimitive>(sample: S) -> f64 {
    sample.to_f64().unwrap_or_default()
}
