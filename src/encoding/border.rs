use crate::{
    grid::{Grid, GridRef},
    utils::iterator::GridIterator,
};

/// Surround a flat row-major buffer with `border` cells of `fill` on every side.
///
/// The result is `(height + 2 * border) x (width + 2 * border)`, interior cells keep
/// their value.
///
/// # Panics
/// When `pixels.len() != height * width`.
pub fn pad_border<T: Copy>(
    pixels: &[T],
    height: usize,
    width: usize,
    border: usize,
    fill: T,
) -> Vec<T> {
    assert_eq!(pixels.len(), height * width, "buffers don't match sizes");
    let padded_width = width + 2 * border;
    let padded_height = height + 2 * border;

    GridIterator::new(padded_width, padded_height)
        .map(|(x, y, _)| {
            let inside = (border..border + width).contains(&x)
                && (border..border + height).contains(&y);
            if inside {
                pixels[(y - border) * width + (x - border)]
            } else {
                fill
            }
        })
        .collect()
}

/// Inverse of [pad_border], drops `border` cells from every side.
///
/// # Panics
/// When the grid is smaller than two borders in either dimension.
pub fn strip_border<T: Copy>(grid: &Grid<T>, border: usize) -> Grid<T> {
    let (width, height) = grid.shape();
    assert!(
        width >= 2 * border && height >= 2 * border,
        "border is larger than the grid"
    );
    let inner_width = width - 2 * border;
    let inner_height = height - 2 * border;

    let pixels = grid.as_ref();
    let buffer = GridIterator::new(inner_width, inner_height)
        .map(|(x, y, _)| pixels[(y + border) * width + (x + border)])
        .collect();
    Grid::from_vec(inner_width, inner_height, buffer)
}

impl<T: Copy> Grid<T> {
    /// Grid padded with `border` cells of `fill`, see [pad_border].
    pub fn with_border(&self, border: usize, fill: T) -> Grid<T> {
        let buffer = pad_border(self.as_ref(), self.height(), self.width(), border, fill);
        Grid::from_vec(
            self.width() + 2 * border,
            self.height() + 2 * border,
            buffer,
        )
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    fn random_bits(rng: &mut impl Rng, width: usize, height: usize) -> Grid<bool> {
        let buffer = (0..width * height).map(|_| rng.random::<bool>()).collect();
        Grid::from_vec(width, height, buffer)
    }

    #[test]
    fn test_pad_small_grid() {
        let padded = pad_border(&[1, 2, 3, 4, 5, 6], 2, 3, 1, 0);
        #[rustfmt::skip]
        let expected = vec![
            0, 0, 0, 0, 0,
            0, 1, 2, 3, 0,
            0, 4, 5, 6, 0,
            0, 0, 0, 0, 0,
        ];
        assert_eq!(padded, expected);
    }

    #[test]
    fn test_non_square_grid_uses_width_as_stride() {
        // 1 row, 3 columns; indexing by height would repeat the first cell
        let grid = Grid::from_rows(&[[true, false, true]]);
        let padded = grid.with_border(1, false);
        assert_eq!(padded.shape(), (5, 3));
        assert_eq!(padded.row(1), &[false, true, false, true, false]);
    }

    #[test]
    fn test_zero_border_is_identity() {
        let grid = Grid::from_rows(&[[true, false], [false, false]]);
        assert_eq!(grid.with_border(0, true), grid);
    }

    #[test]
    fn test_strip_recovers_original() {
        let mut rng = rand::rng();
        for _ in 0..50 {
            let width = rng.random_range(0..12);
            let height = rng.random_range(0..12);
            let border = rng.random_range(0..5);
            let fill = rng.random::<bool>();

            let grid = random_bits(&mut rng, width, height);
            let padded = grid.with_border(border, fill);
            assert_eq!(
                padded.shape(),
                (width + 2 * border, height + 2 * border)
            );
            assert_eq!(strip_border(&padded, border), grid);
        }
    }

    #[test]
    fn test_border_cells_equal_fill() {
        let grid: Grid<bool> = Grid::new(3, 2);
        let padded = grid.with_border(2, true);
        let filled = padded.as_ref().iter().filter(|bit| **bit).count();
        assert_eq!(filled, padded.as_ref().len() - 6);
    }
}
