//! Minimal reader for comma-delimited numeric matrices.
//!
//! Cells that are empty or fail to parse as a number read as `0.0`. Blank lines are
//! skipped and `#` starts a comment that runs to the end of the line.
use std::{fs, path::Path};

use crate::{error::ShadowError, grid::Grid};

const DELIMITER: char = ',';
const COMMENT: char = '#';
const FILL_VALUE: f64 = 0.0;

/// Read a CSV file into a row-major grid of samples.
pub fn read_csv_matrix<P: AsRef<Path>>(path: P) -> crate::error::Result<Grid<f64>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| ShadowError::invalid_input(path, e))?;
    parse_csv_matrix(&text).map_err(|reason| ShadowError::invalid_input(path, reason))
}

/// Parse CSV text into a grid. Errors carry a human readable reason.
pub fn parse_csv_matrix(text: &str) -> Result<Grid<f64>, String> {
    let mut width = None;
    let mut height = 0;
    let mut samples = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let line = match line.split_once(COMMENT) {
            Some((data, _)) => data,
            None => line,
        };
        if line.trim().is_empty() {
            continue;
        }

        let before = samples.len();
        samples.extend(line.split(DELIMITER).map(parse_cell));
        let cells = samples.len() - before;

        match width {
            None => width = Some(cells),
            Some(expected) if expected != cells => {
                return Err(format!(
                    "line {} has {} columns, expected {}",
                    line_no + 1,
                    cells,
                    expected
                ));
            }
            Some(_) => {}
        }
        height += 1;
    }

    match width {
        Some(width) => Ok(Grid::from_vec(width, height, samples)),
        None => Err(String::from("no data rows")),
    }
}

#[inline]
fn parse_cell(cell: &str) -> f64 {
    cell.trim().parse::<f64>().unwrap_or(FILL_VALUE)
}
