use ndarray::{Array1, ArrayView1};

use crate::{Result, config::Scalar};

pub trait Model {
    /// Returns the amount of parameters in the model.
    fn size(&self) -> usize;

    /// Computes the model's prediction for `x`.
    ///
    /// Parameters are left untouched, but every layer's forward cache is refreshed so that a
    /// backward pass may follow.
    fn predict(&mut self, x: ArrayView1<Scalar>) -> Result<Array1<Scalar>>;

    /// Zeros out every parameter gradient accumulator of the model.
    fn zero_grad(&mut self);
}
