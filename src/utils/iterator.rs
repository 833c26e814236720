/// A grid iterator that yields (x, y, cell_idx) tuples in row-major order.
///
/// Walks the grid without any `%` or `/`, so it reads like nested `for y`/`for x`
/// loops while still composing with iterator adapters.
#[derive(Debug, Clone, Copy)]
pub struct GridIterator {
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    cell_idx: usize,
}

impl GridIterator {
    #[inline]
    pub const fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            x: 0,
            y: 0,
            cell_idx: 0,
        }
    }

    #[inline]
    fn total(&self) -> usize {
        self.width * self.height
    }
}

impl Iterator for GridIterator {
    type Item = (usize, usize, usize);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.cell_idx >= self.total() {
            return None;
        }

        let result = (self.x, self.y, self.cell_idx);

        self.cell_idx += 1;
        self.x += 1;

        if self.x >= self.width {
            self.x = 0;
            self.y += 1;
        }

        Some(result)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total() - self.cell_idx;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GridIterator {
    #[inline]
    fn len(&self) -> usize {
        self.total() - self.cell_idx
    }
}
