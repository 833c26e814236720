use itertools::{Itertools, MinMaxResult};
use log::debug;

use crate::{
    binarize::ensure_same_shape,
    encoding::{height::expand_heights, height::UnitWidth, transition::row_transitions},
    error::Result,
    grid::{Grid, GridRef},
};

/// Relief heights, one row per pixel row and `width * unit_width` samples per row.
pub type Surface = Grid<f64>;

/// Build the row-centered surface of two same-shape bit grids.
///
/// `right` supplies the bit after each boundary and `left` the bit before it. Each row is
/// expanded to its height profile, shifted so its midpoint sits at zero, and scaled by
/// `z_step_height`.
pub fn build_surface(
    right: &Grid<bool>,
    left: &Grid<bool>,
    unit_width: UnitWidth,
    z_step_height: f64,
) -> Result<Surface> {
    ensure_same_shape(left, right)?;
    let (width, height) = left.shape();
    let row_len = width * unit_width.get();

    let mut buffer = Vec::with_capacity(row_len * height);
    for row in 0..height {
        let start = row * width;
        let end = start + width;
        let transitions = row_transitions(left.as_ref(), right.as_ref(), start, end);
        let profile = expand_heights(unit_width, &transitions);
        let center = profile_center(&profile);
        buffer.extend(
            profile
                .iter()
                .map(|sample| (f64::from(*sample) - center) * z_step_height),
        );
    }

    Ok(Grid::from_vec(row_len, height, buffer))
}

/// Midpoint between the lowest and highest sample.
pub fn profile_center(profile: &[i32]) -> f64 {
    match profile.iter().minmax() {
        MinMaxResult::NoElements => 0.0,
        MinMaxResult::OneElement(value) => f64::from(*value),
        MinMaxResult::MinMax(min, max) => (f64::from(*min) + f64::from(*max)) / 2.0,
    }
}

/// Shift the whole surface so its lowest sample sits at `base_height`.
///
/// Empty surfaces come back unchanged.
pub fn normalize_surface(base_height: f64, surface: &Surface) -> Surface {
    let Some(min_height) = surface.as_ref().iter().copied().reduce(f64::min) else {
        return surface.clone();
    };
    debug!("normalizing surface, min {} base {}", min_height, base_height);
    // subtract first so the lowest sample lands on base_height without rounding
    surface.map(|value| value - min_height + base_height)
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    fn unit(width: usize) -> UnitWidth {
        UnitWidth::new(width).unwrap()
    }

    #[test]
    fn test_center_of_profiles() {
        assert_eq!(profile_center(&[]), 0.0);
        assert_eq!(profile_center(&[3]), 3.0);
        assert_eq!(profile_center(&[0, 1, 2, 2, 1, 0]), 1.0);
        assert_eq!(profile_center(&[0, -1, 0]), -0.5);
    }

    #[test]
    fn test_blank_grids_give_flat_rows() {
        let blank: Grid<bool> = Grid::new(3, 2);
        let surface = build_surface(&blank, &blank, unit(4), 2.0).unwrap();
        assert_eq!(surface.shape(), (12, 2));
        assert!(surface.as_ref().iter().all(|value| *value == 0.0));
    }

    #[test]
    fn test_rows_are_centered_and_scaled() {
        // a single rising edge: left pixel set, right empty
        let left = Grid::from_rows(&[[true, false]]);
        let right = Grid::from_rows(&[[false, false]]);
        let surface = build_surface(&right, &left, unit(2), 3.0).unwrap();
        // transitions: [Flat, Rising, Flat] -> profile [0, 0, 0, 1]
        assert_eq!(surface.as_ref(), &[-1.5, -1.5, -1.5, 1.5]);
    }

    #[test]
    fn test_shape_mismatch_is_reported() {
        let left: Grid<bool> = Grid::new(3, 2);
        let right: Grid<bool> = Grid::new(2, 3);
        assert!(build_surface(&right, &left, unit(2), 1.0).is_err());
    }

    #[test]
    fn test_normalized_minimum_is_base_height() {
        let mut rng = rand::rng();
        for _ in 0..50 {
            let width = rng.random_range(1..20);
            let height = rng.random_range(1..6);
            let buffer = (0..width * height)
                .map(|_| rng.random_range(-50.0..50.0))
                .collect();
            let surface = Grid::from_vec(width, height, buffer);
            let base = rng.random_range(0.0..100.0);

            let normalized = normalize_surface(base, &surface);
            let min = normalized
                .as_ref()
                .iter()
                .copied()
                .reduce(f64::min)
                .unwrap();
            assert_eq!(min, base);
            assert!(normalized.as_ref().iter().all(|value| *value >= base));
        }
    }

    #[test]
    fn test_normalize_empty_surface() {
        let empty: Surface = Grid::new(0, 0);
        assert_eq!(normalize_surface(40.0, &empty), empty);
    }
}
