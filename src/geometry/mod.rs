/// A descriptor for the logical shape and wrap-around size of an index space
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Geometry {
    rows: usize,
    cols: usize,
    start: usize,
    buffer_size: usize,
    step: usize,
}

impl Geometry {
    pub fn new(rows: usize, cols: usize, start: usize, step: usize, buffer_size: usize) -> Geometry {
        Geometry {
            rows,
            cols,
            start,
            buffer_size,
            step,
        }
    }
    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    pub fn start(&self) -> usize {
        self.start
    }
    pub fn step(&self) -> usize {
        self.step
    }
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }
    pub fn num_elems(&self) -> usize {
        self.rows * self.cols
    }
    /// Splits a flattened row-major position into (row, column).
    pub fn row_col(&self, i: usize) -> (usize, usize) {
        (i / self.cols, i % self.cols)
    }
}
