use ndarray::{ArrayViewD, ArrayViewMutD, IxDyn};

use super::Matrix;
use crate::{
    MlErr, Result,
    config::{Dims, Scalar},
    error::check_size,
    util::math,
};

/// An N-D row-major dense tensor owning a contiguous buffer of `product(dims)` scalars.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    dims: Dims,
    data: Vec<Scalar>,
}

/// Validates a shape, returning its element count.
fn checked_numel(dims: &[usize]) -> Result<usize> {
    if dims.is_empty() {
        return Err(MlErr::invalid("a tensor needs at least one dimension"));
    }

    math::product(dims, "tensor element count")
}

impl Tensor {
    /// Creates a new zero-filled `Tensor`.
    ///
    /// # Arguments
    /// * `dims` - The dimensions, outermost first. Must not be empty.
    ///
    /// # Returns
    /// A new `Tensor`, `MlErr::InvalidArgument` for an empty shape or `MlErr::Overflow` if the
    /// elements do not fit in memory.
    pub fn zeros<D: Into<Dims>>(dims: D) -> Result<Self> {
        let dims = dims.into();
        let data = math::zeroed(checked_numel(&dims)?, "tensor buffer")?;

        Ok(Self { dims, data })
    }

    /// Creates a new `Tensor` taking ownership of a row-major buffer.
    pub fn from_vec<D: Into<Dims>>(dims: D, data: Vec<Scalar>) -> Result<Self> {
        let dims = dims.into();
        check_size("tensor buffer", data.len(), checked_numel(&dims)?)?;

        Ok(Self { dims, data })
    }

    /// Returns the amount of elements, recomputed from the current dimensions.
    pub fn numel(&self) -> usize {
        self.dims.iter().product()
    }

    /// Returns the current dimensions.
    pub fn shape(&self) -> Dims {
        self.dims.clone()
    }

    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Changes the dimensions of the tensor without touching its buffer.
    ///
    /// The rank may change freely, only the element count must be preserved. On error the
    /// tensor is left untouched.
    pub fn reshape<D: Into<Dims>>(&mut self, dims: D) -> Result<()> {
        let dims = dims.into();
        check_size("tensor reshape", checked_numel(&dims)?, self.numel())?;

        self.dims = dims;
        Ok(())
    }

    /// Sets every element to zero.
    pub fn zero_fill(&mut self) {
        self.data.fill(0.);
    }

    /// Maps a multi-index to its position in the linear buffer.
    ///
    /// # Returns
    /// `None` if the index has the wrong rank or any component is out of range.
    pub fn offset(&self, index: &[usize]) -> Option<usize> {
        if index.len() != self.dims.len() {
            return None;
        }

        index
            .iter()
            .zip(&self.dims)
            .try_fold(0, |acc, (&i, &d)| (i < d).then(|| acc * d + i))
    }

    /// Returns the element at `index`, if in range.
    pub fn get(&self, index: &[usize]) -> Option<Scalar> {
        self.offset(index).map(|i| self.data[i])
    }

    /// Writes the element at `index`.
    ///
    /// # Returns
    /// `MlErr::ShapeMismatch` if the index has the wrong rank or is out of range.
    pub fn set(&mut self, index: &[usize], value: Scalar) -> Result<()> {
        check_size("tensor index rank", index.len(), self.rank())?;

        let i = self
            .offset(index)
            .ok_or_else(|| match index.iter().zip(&self.dims).find(|(i, d)| i >= d) {
                Some((&got, &expected)) => MlErr::ShapeMismatch {
                    what: "tensor index",
                    got,
                    expected,
                },
                None => MlErr::invalid("tensor index out of range"),
            })?;

        self.data[i] = value;
        Ok(())
    }

    pub fn as_slice(&self) -> &[Scalar] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [Scalar] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<Scalar> {
        self.data
    }

    /// Gives a view of the buffer with the current dimensions.
    pub fn view(&self) -> Result<ArrayViewD<'_, Scalar>> {
        Ok(ArrayViewD::from_shape(IxDyn(&self.dims), &self.data)?)
    }

    /// Gives a mutable view of the buffer with the current dimensions.
    pub fn view_mut(&mut self) -> Result<ArrayViewMutD<'_, Scalar>> {
        Ok(ArrayViewMutD::from_shape(
            IxDyn(&self.dims),
            &mut self.data,
        )?)
    }
}

impl From<Matrix> for Tensor {
    fn from(value: Matrix) -> Self {
        let shape = value.shape();

        Self {
            dims: vec![shape.rows, shape.cols],
            data: value.into_vec(),
        }
    }
}

impl TryFrom<Tensor> for Matrix {
    type Error = MlErr;

    fn try_from(value: Tensor) -> Result<Self> {
        check_size("matrix rank", value.rank(), 2)?;

        let (rows, cols) = (value.dims[0], value.dims[1]);
        Matrix::from_vec(rows, cols, value.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting(dims: &[usize]) -> Tensor {
        let n = dims.iter().product::<usize>();
        Tensor::from_vec(dims.to_vec(), (0..n).map(|x| x as Scalar).collect()).unwrap()
    }

    #[test]
    fn zeros() {
        let t = Tensor::zeros([2, 3, 4]).unwrap();

        assert_eq!(t.shape(), vec![2, 3, 4]);
        assert_eq!(t.numel(), 24);
        assert!(t.as_slice().iter().all(|&x| x == 0.));
    }

    #[test]
    fn empty_shape_is_rejected() {
        assert!(matches!(
            Tensor::zeros(Vec::<usize>::new()),
            Err(MlErr::InvalidArgument(_))
        ));
    }

    #[test]
    fn overflowing_shape_is_rejected() {
        assert!(matches!(
            Tensor::zeros([usize::MAX, 2, 1]),
            Err(MlErr::Overflow { .. })
        ));
    }

    #[test]
    fn shape_too_big_to_allocate() {
        assert!(matches!(
            Tensor::zeros([1, usize::MAX, 1]),
            Err(MlErr::Overflow { .. })
        ));
    }

    #[test]
    fn row_major_offsets() {
        let t = counting(&[2, 3, 4]);

        assert_eq!(t.offset(&[0, 0, 0]), Some(0));
        assert_eq!(t.offset(&[1, 2, 3]), Some(23));
        assert_eq!(t.get(&[1, 0, 2]), Some(14.));
        assert_eq!(t.offset(&[2, 0, 0]), None);
        assert_eq!(t.offset(&[0, 0]), None);
        assert_eq!(t.view().unwrap()[[1, 1, 1]], 17.);
    }

    #[test]
    fn set_out_of_range() {
        let mut t = Tensor::zeros([2, 2]).unwrap();

        t.set(&[1, 1], 5.).unwrap();
        assert_eq!(t.as_slice(), &[0., 0., 0., 5.]);
        assert!(matches!(
            t.set(&[0, 3], 1.),
            Err(MlErr::ShapeMismatch {
                got: 3,
                expected: 2,
                ..
            })
        ));
        assert!(t.set(&[0], 1.).is_err());
    }

    #[test]
    fn reshape_changes_rank_not_buffer() {
        let mut t = counting(&[2, 3, 4]);
        let before = t.as_slice().to_vec();

        t.reshape([6, 4]).unwrap();
        assert_eq!(t.shape(), vec![6, 4]);
        t.reshape([24]).unwrap();
        assert_eq!(t.as_slice(), before.as_slice());
    }

    #[test]
    fn failed_reshape_leaves_tensor_untouched() {
        let mut t = counting(&[2, 3]);
        let before = t.clone();

        assert!(matches!(
            t.reshape([7]),
            Err(MlErr::ShapeMismatch {
                got: 7,
                expected: 6,
                ..
            })
        ));
        assert!(t.reshape(Vec::<usize>::new()).is_err());
        assert_eq!(t, before);
    }

    #[test]
    fn zero_sized() {
        let mut t = Tensor::zeros([0, 5]).unwrap();

        assert_eq!(t.numel(), 0);
        t.zero_fill();
        assert_eq!(t.shape(), vec![0, 5]);
        t.reshape([5, 0]).unwrap();
        t.reshape([3, 0, 7]).unwrap();
        assert_eq!(t.shape(), vec![3, 0, 7]);
    }

    #[test]
    fn matrix_round_trip() {
        let m = Matrix::from_vec(2, 2, vec![1., 2., 3., 4.]).unwrap();
        let t = Tensor::from(m.clone());

        assert_eq!(t.shape(), vec![2, 2]);
        assert_eq!(Matrix::try_from(t).unwrap(), m);
        assert!(Matrix::try_from(Tensor::zeros([1, 2, 2]).unwrap()).is_err());
    }
}
