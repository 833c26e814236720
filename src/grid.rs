/// `(width, height)` of a grid.
pub type GridShape = (usize, usize);

/// Trait defining ops available on grids with
/// lendable row-major inner buffer
pub trait GridRef: AsRef<[Self::Inner]> {
    type Inner;

    fn width(&self) -> usize;
    fn height(&self) -> usize;

    #[inline]
    fn shape(&self) -> GridShape {
        (self.width(), self.height())
    }

    #[inline]
    fn row(&self, y: usize) -> &[Self::Inner] {
        let start = y * self.width();
        &self.as_ref()[start..start + self.width()]
    }

    /// Iterate rows top to bottom. Yields nothing for zero-width grids.
    #[inline]
    fn rows(&self) -> std::slice::ChunksExact<'_, Self::Inner> {
        // chunks_exact panics on 0, an empty slice keeps the iterator empty
        let width = self.width().max(1);
        let buffer: &[Self::Inner] = if self.width() == 0 { &[] } else { self.as_ref() };
        buffer.chunks_exact(width)
    }
}

/// Grid with owned buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    buffer: Vec<T>,
}

impl<T> AsRef<[T]> for Grid<T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        &self.buffer
    }
}

impl<T> GridRef for Grid<T> {
    type Inner = T;

    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }
}

impl<T> Grid<T> {
    /// # Panics
    /// When `buffer.len() != width * height`.
    pub fn from_vec(width: usize, height: usize, buffer: Vec<T>) -> Self {
        assert_eq!(buffer.len(), width * height, "buffers don't match sizes");
        Self {
            width,
            height,
            buffer,
        }
    }

    /// Build a new grid of the same shape by mapping every cell.
    pub fn map<U, F>(&self, f: F) -> Grid<U>
    where
        F: FnMut(&T) -> U,
    {
        Grid {
            width: self.width,
            height: self.height,
            buffer: self.buffer.iter().map(f).collect(),
        }
    }
}

impl<T: Clone> Grid<T> {
    /// Build a grid from nested rows.
    ///
    /// # Panics
    /// When rows have different lengths.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Self {
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        let mut buffer = Vec::with_capacity(width * rows.len());
        for row in rows {
            assert_eq!(row.as_ref().len(), width, "rows don't match sizes");
            buffer.extend_from_slice(row.as_ref());
        }
        Self::from_vec(width, rows.len(), buffer)
    }
}

impl<T: Default + Clone> Grid<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self::from_vec(width, height, vec![T::default(); width * height])
    }
}
