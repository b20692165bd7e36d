use std::ops::Index;

/// A dense, row-major 2D array.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster<T> {
    rows: usize,
    cols: usize,
    values: Vec<T>,
}

impl<T> Raster<T> {
    /// Returns a `rows` x `cols` raster with `f(row, col)` at each
    /// cell.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut values = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                values.push(f(row, col));
            }
        }
        Self { rows, cols, values }
    }

    /// Wraps row-major `values`.
    ///
    /// # Panics
    ///
    /// If `values.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, values: Vec<T>) -> Self {
        assert_eq!(rows * cols, values.len(), "raster shape mismatch");
        Self { rows, cols, values }
    }

    /// Returns `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.values.get(row * self.cols + col)
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> Option<&[T]> {
        (row < self.rows).then(|| &self.values[row * self.cols..(row + 1) * self.cols])
    }

    /// Flattened, row-major view of every cell.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    /// Iterates `((row, col), value)` in row-major order.
    pub fn indexed(&self) -> impl Iterator<Item = ((usize, usize), &T)> + '_ {
        let cols = self.cols;
        self.values
            .iter()
            .enumerate()
            .map(move |(idx, val)| ((idx / cols, idx % cols), val))
    }

    pub fn into_vec(self) -> Vec<T> {
        self.values
    }
}

impl<T> Index<(usize, usize)> for Raster<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(col < self.cols, "column {col} out of bounds");
        &self.values[row * self.cols + col]
    }
}
