use ndarray::{Array1, ArrayView1};

use super::Param;
use crate::{Result, config::Scalar, initialization::ParamGen};

/// A stage of a feedforward model.
///
/// `forward` caches whatever `backward` needs (the input snapshot, pre-activations) inside the
/// layer, overwriting the previous cache. A `backward` call therefore refers to the most recent
/// `forward` on the same layer; interleaving two forwards before a backward is a caller error
/// that cannot be detected.
pub trait Layer: Send {
    /// A short name for the kind of layer, used in errors and logs.
    fn name(&self) -> &'static str;

    /// The expected length of the input.
    fn input_dim(&self) -> usize;

    /// The length of the output.
    fn output_dim(&self) -> usize;

    /// Computes the output of the layer for `x`.
    ///
    /// # Errors
    /// `MlErr::ShapeMismatch` if `x.len() != self.input_dim()`.
    fn forward(&mut self, x: ArrayView1<Scalar>) -> Result<Array1<Scalar>>;

    /// Computes the gradient of the loss with respect to the input of the layer given the
    /// gradient with respect to its output, adding the parameter gradients into each
    /// parameter's accumulator.
    ///
    /// # Errors
    /// `MlErr::ShapeMismatch` if `d.len() != self.output_dim()` and
    /// `MlErr::MissingForwardCache` if the layer was never forwarded.
    fn backward(&mut self, d: ArrayView1<Scalar>) -> Result<Array1<Scalar>>;

    /// The trainable parameters of the layer, empty by default.
    fn params(&self) -> &[Param] {
        &[]
    }

    fn params_mut(&mut self) -> &mut [Param] {
        &mut []
    }

    /// Overwrites every parameter with values drawn from `param_gen`, in the order given by
    /// `params`.
    ///
    /// # Errors
    /// `MlErr::InvalidArgument` if the generator runs out of values.
    fn init(&mut self, param_gen: &mut dyn ParamGen) -> Result<()> {
        for param in self.params_mut() {
            param_gen.fill(param.value_mut().as_mut_slice())?;
        }

        Ok(())
    }

    /// Zeros out the gradient accumulator of every parameter.
    fn zero_grad(&mut self) {
        self.params_mut().iter_mut().for_each(Param::zero_grad);
    }

    /// Returns the amount of scalar parameters this layer has.
    fn size(&self) -> usize {
        self.params().iter().map(Param::numel).sum()
    }
}
