use crate::{Result, tensor::Matrix};

/// A named trainable buffer of a layer paired with its gradient accumulator.
///
/// Backward passes add into `grad`, they never overwrite it. Resetting the accumulator between
/// optimization steps is up to whoever updates `value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    name: &'static str,
    value: Matrix,
    grad: Matrix,
}

impl Param {
    /// Creates a new `Param` with a zeroed gradient of the same shape as `value`.
    pub fn new(name: &'static str, value: Matrix) -> Result<Self> {
        let shape = value.shape();
        let grad = Matrix::zeros(shape.rows, shape.cols)?;

        Ok(Self { name, value, grad })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn value(&self) -> &Matrix {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut Matrix {
        &mut self.value
    }

    pub fn grad(&self) -> &Matrix {
        &self.grad
    }

    /// Borrows the value and the gradient at the same time.
    pub fn value_and_grad_mut(&mut self) -> (&mut Matrix, &mut Matrix) {
        (&mut self.value, &mut self.grad)
    }

    /// Returns the amount of scalars in the parameter.
    pub fn numel(&self) -> usize {
        self.value.numel()
    }

    /// Zeros out the gradient accumulator.
    pub fn zero_grad(&mut self) {
        self.grad.zero_fill();
    }
}
