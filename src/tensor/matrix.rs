use ndarray::{ArrayView2, ArrayViewMut2};

use crate::{MlErr, Result, config::Scalar, error::check_size, util::math};

/// The dimensions of a `Matrix`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    /// Creates a new `Shape`.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Returns the amount of elements a matrix of this shape holds, checking for overflow.
    pub fn numel(&self) -> Result<usize> {
        math::multiply(self.rows, self.cols, "matrix element count")
    }
}

impl From<(usize, usize)> for Shape {
    fn from((rows, cols): (usize, usize)) -> Self {
        Self { rows, cols }
    }
}

/// A row-major dense matrix owning a contiguous buffer of `rows * cols` scalars.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    shape: Shape,
    data: Vec<Scalar>,
}

impl Matrix {
    /// Creates a new zero-filled `Matrix`.
    ///
    /// # Arguments
    /// * `rows` - The amount of rows.
    /// * `cols` - The amount of columns.
    ///
    /// # Returns
    /// A new `Matrix` or `MlErr::Overflow` if `rows * cols` scalars do not fit in memory.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        let shape = Shape::new(rows, cols);
        let data = math::zeroed(shape.numel()?, "matrix buffer")?;

        Ok(Self { shape, data })
    }

    /// Creates a new `Matrix` taking ownership of a row-major buffer.
    ///
    /// # Arguments
    /// * `rows` - The amount of rows.
    /// * `cols` - The amount of columns.
    /// * `data` - The elements, row after row.
    ///
    /// # Returns
    /// A new `Matrix` or an error if `data` does not hold exactly `rows * cols` elements.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<Scalar>) -> Result<Self> {
        let shape = Shape::new(rows, cols);
        check_size("matrix buffer", data.len(), shape.numel()?)?;

        Ok(Self { shape, data })
    }

    /// Returns the amount of elements, recomputed from the current shape.
    pub fn numel(&self) -> usize {
        self.shape.rows * self.shape.cols
    }

    /// Returns the current shape.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn rows(&self) -> usize {
        self.shape.rows
    }

    pub fn cols(&self) -> usize {
        self.shape.cols
    }

    /// Changes the shape of the matrix without touching its buffer.
    ///
    /// # Arguments
    /// * `rows` - The new amount of rows.
    /// * `cols` - The new amount of columns.
    ///
    /// # Returns
    /// `MlErr::ShapeMismatch` if the new shape holds a different amount of elements, in which
    /// case the matrix is left untouched.
    pub fn reshape(&mut self, rows: usize, cols: usize) -> Result<()> {
        let shape = Shape::new(rows, cols);
        check_size("matrix reshape", shape.numel()?, self.numel())?;

        self.shape = shape;
        Ok(())
    }

    /// Sets every element to zero.
    pub fn zero_fill(&mut self) {
        self.data.fill(0.);
    }

    /// Fills the matrix with the given value.
    pub fn fill(&mut self, value: Scalar) {
        self.data.fill(value);
    }

    fn offset(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.shape.rows && col < self.shape.cols).then(|| row * self.shape.cols + col)
    }

    /// Returns the element at `(row, col)`, if in range.
    pub fn get(&self, row: usize, col: usize) -> Option<Scalar> {
        self.offset(row, col).map(|i| self.data[i])
    }

    /// Writes the element at `(row, col)`.
    ///
    /// # Returns
    /// `MlErr::ShapeMismatch` if the index is out of range.
    pub fn set(&mut self, row: usize, col: usize, value: Scalar) -> Result<()> {
        let Some(i) = self.offset(row, col) else {
            let (what, got, expected) = if row >= self.shape.rows {
                ("matrix row index", row, self.shape.rows)
            } else {
                ("matrix column index", col, self.shape.cols)
            };

            return Err(MlErr::ShapeMismatch {
                what,
                got,
                expected,
            });
        };

        self.data[i] = value;
        Ok(())
    }

    /// Returns the linear, row-major buffer.
    pub fn as_slice(&self) -> &[Scalar] {
        &self.data
    }

    /// Returns the linear, row-major buffer mutably.
    pub fn as_mut_slice(&mut self) -> &mut [Scalar] {
        &mut self.data
    }

    /// Consumes the matrix returning its buffer.
    pub fn into_vec(self) -> Vec<Scalar> {
        self.data
    }

    /// Gives a view of the buffer with the current shape.
    pub fn view(&self) -> Result<ArrayView2<'_, Scalar>> {
        let Shape { rows, cols } = self.shape;
        Ok(ArrayView2::from_shape((rows, cols), &self.data)?)
    }

    /// Gives a mutable view of the buffer with the current shape.
    pub fn view_mut(&mut self) -> Result<ArrayViewMut2<'_, Scalar>> {
        let Shape { rows, cols } = self.shape;
        Ok(ArrayViewMut2::from_shape((rows, cols), &mut self.data)?)
    }
}
