//! OpenSCAD output.
//!
//! The emitted script carries both bit grids and evaluates the relief itself, the host
//! only fills in the placeholders. [ShadowModel::relief_surface] runs the same steps on
//! the host for previews.
use std::fmt::Write;

use itertools::Itertools;
use log::info;

use crate::{
    binarize::ensure_same_shape,
    config::ModelConfig,
    encoding::{
        Surface,
        surface::{build_surface, normalize_surface},
    },
    error::Result,
    grid::{Grid, GridRef},
};

/// Script template, see [Placeholder] for the substituted tokens.
pub const TEMPLATE: &str = include_str!("shadow.scad");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    LeftImage,
    RightImage,
    ImageWidth,
    ImageHeight,
    UnitWidth,
    NozzleSize,
    BaseHeight,
    Border,
    BorderFill,
    OverallShape,
}

impl Placeholder {
    pub const ALL: [Placeholder; 10] = [
        Placeholder::LeftImage,
        Placeholder::RightImage,
        Placeholder::ImageWidth,
        Placeholder::ImageHeight,
        Placeholder::UnitWidth,
        Placeholder::NozzleSize,
        Placeholder::BaseHeight,
        Placeholder::Border,
        Placeholder::BorderFill,
        Placeholder::OverallShape,
    ];

    pub const fn token(self) -> &'static str {
        match self {
            Placeholder::LeftImage => "LEFT_IMG_GOES_HERE",
            Placeholder::RightImage => "RIGHT_IMG_GOES_HERE",
            Placeholder::ImageWidth => "IMG_WIDTH_GOES_HERE",
            Placeholder::ImageHeight => "IMG_HEIGHT_GOES_HERE",
            Placeholder::UnitWidth => "UNIT_WIDTH_GOES_HERE",
            Placeholder::NozzleSize => "NOZZLE_SIZE_GOES_HERE",
            Placeholder::BaseHeight => "BASE_HEIGHT_GOES_HERE",
            Placeholder::Border => "BORDER_GOES_HERE",
            Placeholder::BorderFill => "BORDER_FILL_GOES_HERE",
            Placeholder::OverallShape => "OVERALL_SHAPE_GOES_HERE",
        }
    }
}

/// Serialize a bit grid as `0`/`1` cells, each followed by `,`, one row per line.
///
/// The separator and newline after the last cell are dropped so the text can sit
/// between brackets.
pub fn grid_to_array_literal<G: GridRef<Inner = bool>>(grid: &G) -> String {
    let mut out = String::with_capacity(grid.width() * grid.height() * 2 + grid.height());
    for row in grid.rows() {
        for bit in row {
            out.push(if *bit { '1' } else { '0' });
            out.push(',');
        }
        out.push('\n');
    }
    if out.ends_with(",\n") {
        out.truncate(out.len() - 2);
    }
    out
}

/// Render a surface as CSV, one line per row.
pub fn surface_to_csv(surface: &Surface) -> String {
    let mut out = String::new();
    for row in surface.rows() {
        // writing into a String can't fail
        let _ = writeln!(out, "{}", row.iter().join(","));
    }
    out
}

/// A pair of same-shape bit grids and the parameters to build a relief from them.
#[derive(Debug, Clone)]
pub struct ShadowModel<'a> {
    left: &'a Grid<bool>,
    right: &'a Grid<bool>,
    config: &'a ModelConfig,
}

impl<'a> ShadowModel<'a> {
    pub fn new(
        left: &'a Grid<bool>,
        right: &'a Grid<bool>,
        config: &'a ModelConfig,
    ) -> Result<Self> {
        ensure_same_shape(left, right)?;
        config.validate()?;
        Ok(Self {
            left,
            right,
            config,
        })
    }

    pub fn placeholder_value(&self, placeholder: Placeholder) -> String {
        match placeholder {
            Placeholder::LeftImage => grid_to_array_literal(self.left),
            Placeholder::RightImage => grid_to_array_literal(self.right),
            Placeholder::ImageWidth => self.left.width().to_string(),
            Placeholder::ImageHeight => self.left.height().to_string(),
            Placeholder::UnitWidth => self.config.unit_width.to_string(),
            Placeholder::NozzleSize => self.config.printer_nozzle_size.to_string(),
            Placeholder::BaseHeight => self.config.base_height.to_string(),
            Placeholder::Border => self.config.border.to_string(),
            Placeholder::BorderFill => u8::from(self.config.border_fill).to_string(),
            Placeholder::OverallShape => self.config.overall_shape.to_string(),
        }
    }

    /// Fill every placeholder of [TEMPLATE].
    pub fn render(&self) -> String {
        let (width, height) = self.left.shape();
        info!(
            "rendering {}x{} model, unit width {}",
            width, height, self.config.unit_width
        );
        Placeholder::ALL
            .iter()
            .fold(TEMPLATE.to_owned(), |script, placeholder| {
                script.replace(placeholder.token(), &self.placeholder_value(*placeholder))
            })
    }

    /// Normalized relief heights, as the emitted script computes them.
    ///
    /// Both grids are inverted and padded with the configured border before encoding.
    pub fn relief_surface(&self) -> Result<Surface> {
        let prepare = |bits: &Grid<bool>| {
            bits.map(|bit| !*bit)
                .with_border(self.config.border, self.config.border_fill)
        };
        let left = prepare(self.left);
        let right = prepare(self.right);

        let surface = build_surface(
            &right,
            &left,
            self.config.unit_width,
            self.config.z_step_height(),
        )?;
        let normalized = normalize_surface(self.config.base_height, &surface);
        info!(
            "relief surface {}x{}",
            normalized.width(),
            normalized.height()
        );
        Ok(normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::OverallShape, encoding::UnitWidth, error::ShadowError};

    fn config(unit_width: usize, border: usize) -> ModelConfig {
        ModelConfig {
            unit_width: UnitWidth::new(unit_width).unwrap(),
            border,
            ..ModelConfig::default()
        }
    }

    #[test]
    fn test_array_literal_strips_final_separator() {
        let grid = Grid::from_rows(&[[false, true], [true, false]]);
        assert_eq!(grid_to_array_literal(&grid), "0,1,\n1,0");
    }

    #[test]
    fn test_array_literal_of_empty_grid() {
        let grid: Grid<bool> = Grid::new(0, 0);
        assert_eq!(grid_to_array_literal(&grid), "");
    }

    #[test]
    fn test_template_has_every_placeholder() {
        for placeholder in Placeholder::ALL {
            assert!(
                TEMPLATE.contains(placeholder.token()),
                "{} missing from template",
                placeholder.token()
            );
        }
    }

    #[test]
    fn test_render_blank_pair() {
        let blank: Grid<bool> = Grid::new(2, 2);
        let config = ModelConfig {
            base_height: 40.0,
            ..config(2, 0)
        };
        let script = ShadowModel::new(&blank, &blank, &config).unwrap().render();

        assert!(script.contains("left_image = [0,0,\n0,0];"));
        assert!(script.contains("right_image = [0,0,\n0,0];"));
        assert!(script.contains("pattern_width = 2;"));
        assert!(script.contains("pattern_height = 2;"));
        assert!(script.contains("unit_width = 2;"));
        assert!(script.contains("base_height = 40;"));
        assert!(script.contains("border = 0;"));
        assert!(script.contains("border_fill = 0;"));
        assert!(script.contains("printer_nozzle_size = 0.4;"));
        assert!(script.contains("overall_shape = \"square\";"));
        for placeholder in Placeholder::ALL {
            assert!(!script.contains(placeholder.token()));
        }
    }

    #[test]
    fn test_render_uses_each_grid_for_its_side() {
        let left = Grid::from_rows(&[[true, false, false]]);
        let right = Grid::from_rows(&[[false, false, true]]);
        let config = ModelConfig {
            overall_shape: OverallShape::Circle,
            ..config(20, 2)
        };
        let script = ShadowModel::new(&left, &right, &config).unwrap().render();
        assert!(script.contains("left_image = [1,0,0];"));
        assert!(script.contains("right_image = [0,0,1];"));
        assert!(script.contains("pattern_width = 3;"));
        assert!(script.contains("pattern_height = 1;"));
        assert!(script.contains("overall_shape = \"circle\";"));
    }

    #[test]
    fn test_mismatched_pair_is_rejected() {
        let left: Grid<bool> = Grid::new(2, 2);
        let right: Grid<bool> = Grid::new(2, 3);
        let config = ModelConfig::default();
        assert!(ShadowModel::new(&left, &right, &config).is_err());
    }

    #[test]
    fn test_oversized_border_is_rejected_before_padding() {
        let blank: Grid<bool> = Grid::new(2, 2);
        let config = config(2, usize::MAX);
        assert!(matches!(
            ShadowModel::new(&blank, &blank, &config),
            Err(ShadowError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_relief_surface_of_blank_pair_is_flat_base() {
        // blank pictures invert to all-set bits, inside a border of unset bits
        let blank: Grid<bool> = Grid::new(2, 2);
        let config = config(2, 1);
        let surface = ShadowModel::new(&blank, &blank, &config)
            .unwrap()
            .relief_surface()
            .unwrap();

        assert_eq!(surface.shape(), (4 * 2, 4));
        let min = surface.as_ref().iter().copied().reduce(f64::min).unwrap();
        assert_eq!(min, 40.0);
        // border rows carry no edges
        let top = surface.row(0);
        assert!(top.iter().all(|value| *value == top[0]));
        assert!(top[0] > 40.0);
    }

    #[test]
    fn test_surface_csv_lines() {
        let surface = Grid::from_rows(&[[1.0, 2.5], [40.0, 0.0]]);
        assert_eq!(surface_to_csv(&surface), "1,2.5\n40,0\n");
    }
}
