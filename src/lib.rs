use std::path::PathBuf;

use crate::{
    binarize::{BinarizeOptions, load_bit_pair},
    config::ModelConfig,
    model::{ShadowModel, surface_to_csv},
};

pub mod binarize;
pub mod config;
pub mod encoding;
pub mod error;
pub mod grid;
pub mod model;
pub mod utils;

#[cfg(test)]
mod tests;

/// Document written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputKind {
    /// OpenSCAD script for the external modeler
    #[default]
    Scad,
    /// Normalized relief heights as CSV
    Surface,
}

/// One left/right picture pair and everything needed to turn it into a document.
#[derive(Debug, Clone)]
pub struct Job {
    pub left: PathBuf,
    pub right: PathBuf,
    pub left_options: BinarizeOptions,
    pub right_options: BinarizeOptions,
    pub config: ModelConfig,
    pub output: OutputKind,
}

/// Load, threshold and encode both pictures, returning the complete document
/// terminated by a newline.
pub fn run(job: &Job) -> error::Result<String> {
    job.config.validate()?;
    let (left, right) = load_bit_pair(
        &job.left,
        job.left_options,
        &job.right,
        job.right_options,
    )?;
    let model = ShadowModel::new(&left, &right, &job.config)?;

    match job.output {
        OutputKind::Scad => {
            let mut script = model.render();
            script.push('\n');
            Ok(script)
        }
        OutputKind::Surface => Ok(surface_to_csv(&model.relief_surface()?)),
    }
}
