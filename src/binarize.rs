//! Loading source pictures and thresholding them into bit grids.
//!
//! A source is either a CSV matrix of numbers or a raster image. CSV sources default to a
//! threshold of `1`, raster sources to the mean of their first channel.
use std::path::Path;

use log::debug;

use crate::{
    error::{Result, ShadowError},
    grid::{Grid, GridRef},
    utils,
};

/// Threshold used for CSV sources when none is given.
pub const TABULAR_DEFAULT_THRESHOLD: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Comma-delimited numeric matrix
    Tabular,
    /// Anything the `image` crate can decode
    Raster,
}

impl SourceKind {
    /// Pick the loader from the file extension, `.csv` in any case is tabular.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => SourceKind::Tabular,
            _ => SourceKind::Raster,
        }
    }

    pub fn default_threshold(&self, samples: &Grid<f64>) -> f64 {
        match self {
            SourceKind::Tabular => TABULAR_DEFAULT_THRESHOLD,
            SourceKind::Raster => mean(samples.as_ref()),
        }
    }
}

/// Per-image thresholding knobs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BinarizeOptions {
    /// Explicit cutoff, derived from the data when `None`
    pub threshold: Option<i32>,
    /// Set bits where the sample is *below* the cutoff
    pub flip: bool,
}

/// Raw samples of a source together with the kind of loader that produced them.
#[derive(Debug, Clone)]
pub struct Samples {
    pub kind: SourceKind,
    pub grid: Grid<f64>,
}

impl Samples {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let kind = SourceKind::from_path(path);
        let grid = match kind {
            SourceKind::Tabular => utils::csv::read_csv_matrix(path)?,
            SourceKind::Raster => utils::image::read_first_channel(path)?,
        };
        debug!(
            "loaded {} as {:?}: {}x{}",
            path.display(),
            kind,
            grid.width(),
            grid.height()
        );
        Ok(Self { kind, grid })
    }

    /// Threshold the samples, using the explicit cutoff or the kind's default.
    pub fn binarize(&self, options: BinarizeOptions) -> Grid<bool> {
        let threshold = match options.threshold {
            Some(threshold) => f64::from(threshold),
            None => self.kind.default_threshold(&self.grid),
        };
        debug!("threshold {} (flip: {})", threshold, options.flip);
        binarize(&self.grid, threshold, options.flip)
    }
}

/// `value >= threshold` per cell, or `value < threshold` when flipped.
pub fn binarize(samples: &Grid<f64>, threshold: f64, flip: bool) -> Grid<bool> {
    if flip {
        samples.map(|value| *value < threshold)
    } else {
        samples.map(|value| *value >= threshold)
    }
}

/// Load and threshold one source.
pub fn load_bits<P: AsRef<Path>>(path: P, options: BinarizeOptions) -> Result<Grid<bool>> {
    Ok(Samples::load(path)?.binarize(options))
}

/// Load and threshold both sources, they must end up with the same shape.
pub fn load_bit_pair<L, R>(
    left: L,
    left_options: BinarizeOptions,
    right: R,
    right_options: BinarizeOptions,
) -> Result<(Grid<bool>, Grid<bool>)>
where
    L: AsRef<Path>,
    R: AsRef<Path>,
{
    let left = load_bits(left, left_options)?;
    let right = load_bits(right, right_options)?;
    ensure_same_shape(&left, &right)?;
    Ok((left, right))
}

pub fn ensure_same_shape<A: GridRef, B: GridRef>(left: &A, right: &B) -> Result {
    if left.shape() != right.shape() {
        return Err(ShadowError::ShapeMismatch {
            left: left.shape(),
            right: right.shape(),
        });
    }
    Ok(())
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
