use log::{debug, trace, warn};
use ndarray::{Array1, ArrayView1};

use super::{
    Model,
    layers::{Layer, Param},
    loss::LossFn,
};
use crate::{MlErr, Result, config::Scalar, error::check_size, tensor::Matrix};

/// A sequential model: information flows forward when computing an output and backward when
/// computing the gradients of its layers.
pub struct Sequential {
    layers: Vec<Box<dyn Layer>>,
}

impl Sequential {
    /// Creates a new `Sequential`.
    ///
    /// Adjacent layer widths are not checked here, a mismatch surfaces on the first forward
    /// pass. See `validate` for an upfront check.
    ///
    /// # Arguments
    /// * `layers` - The layers the sequential is composed of, in forward order.
    ///
    /// # Returns
    /// A new `Sequential` instance.
    pub fn new<I>(layers: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn Layer>>,
    {
        Self {
            layers: layers.into_iter().collect(),
        }
    }

    pub fn layers(&self) -> &[Box<dyn Layer>] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Checks that every layer's output width matches the next layer's input width.
    pub fn validate(&self) -> Result<()> {
        for pair in self.layers.windows(2) {
            check_size("layer input", pair[1].input_dim(), pair[0].output_dim())?;
        }

        Ok(())
    }

    /// Makes a forward pass through the network.
    ///
    /// # Arguments
    /// * `x` - The input data.
    ///
    /// # Returns
    /// The prediction for the given input or an error if occurred.
    pub fn forward(&mut self, x: ArrayView1<Scalar>) -> Result<Array1<Scalar>> {
        let mut a = x.to_owned();

        for (i, layer) in self.layers.iter_mut().enumerate() {
            trace!(layer = i, kind = layer.name(); "forward");
            a = layer.forward(a.view())?;
        }

        Ok(a)
    }

    /// Makes a backward pass through the network, in reverse layer order.
    ///
    /// Must follow the `forward` call whose prediction `d` was computed from.
    ///
    /// # Arguments
    /// * `d` - The gradient of the loss with respect to the prediction.
    ///
    /// # Returns
    /// The gradient of the loss with respect to the model's input.
    pub fn backward(&mut self, mut d: Array1<Scalar>) -> Result<Array1<Scalar>> {
        for (i, layer) in self.layers.iter_mut().enumerate().rev() {
            trace!(layer = i, kind = layer.name(); "backward");
            d = layer.backward(d.view())?;
        }

        Ok(d)
    }

    /// Runs a training step and keeps the gradient with respect to the input.
    ///
    /// # Returns
    /// A tuple of the loss and the gradient of the loss with respect to `x`.
    pub fn train_step_with_input_grad<L>(
        &mut self,
        x: ArrayView1<Scalar>,
        y: ArrayView1<Scalar>,
        loss_fn: &L,
    ) -> Result<(Scalar, Array1<Scalar>)>
    where
        L: LossFn + ?Sized,
    {
        let y_pred = self.forward(x)?;
        let loss = loss_fn.forward(y_pred.view(), y)?;
        let d_last = loss_fn.backward(y_pred.view(), y)?;
        let dx = self.backward(d_last)?;

        if loss.is_finite() {
            debug!(loss = loss; "train step");
        } else {
            warn!(loss = loss; "train step produced a non finite loss");
        }

        Ok((loss, dx))
    }

    /// Runs a training step: forward, loss, and backward through every layer.
    ///
    /// The parameter gradients are added into each parameter's accumulator; updating the
    /// parameters is left to the caller.
    ///
    /// # Arguments
    /// * `x` - The input.
    /// * `y` - The target.
    /// * `loss_fn` - The loss function.
    ///
    /// # Returns
    /// The loss of the prediction made in the forward pass.
    pub fn train_step<L>(
        &mut self,
        x: ArrayView1<Scalar>,
        y: ArrayView1<Scalar>,
        loss_fn: &L,
    ) -> Result<Scalar>
    where
        L: LossFn + ?Sized,
    {
        self.train_step_with_input_grad(x, y, loss_fn)
            .map(|(loss, _)| loss)
    }

    /// Runs a training step for each sample of a batch, summing the parameter gradients.
    ///
    /// Either the whole batch is folded into the gradient accumulators or none of it is: if any
    /// sample fails, the accumulators are restored to what they held before the call.
    ///
    /// # Arguments
    /// * `loss_fn` - The loss function.
    /// * `batch` - The `(x, y)` samples.
    ///
    /// # Returns
    /// The mean loss over the batch, or `MlErr::InvalidArgument` for an empty batch.
    pub fn backprop<'a, L, I>(&mut self, loss_fn: &L, batch: I) -> Result<Scalar>
    where
        L: LossFn + ?Sized,
        I: IntoIterator<Item = (ArrayView1<'a, Scalar>, ArrayView1<'a, Scalar>)>,
    {
        let saved: Vec<Matrix> = self.params().map(|p| p.grad().clone()).collect();

        let mut total_loss = 0.;
        let mut num_samples = 0;

        for (x, y) in batch {
            match self.train_step(x, y, loss_fn) {
                Ok(loss) => total_loss += loss,
                Err(e) => {
                    warn!(sample = num_samples; "batch failed, restoring gradients");
                    self.restore_grads(saved);
                    return Err(e);
                }
            }

            num_samples += 1;
        }

        if num_samples == 0 {
            return Err(MlErr::invalid("cannot backpropagate an empty batch"));
        }

        Ok(total_loss / num_samples as Scalar)
    }

    fn restore_grads(&mut self, saved: Vec<Matrix>) {
        for (param, grad) in self.params_mut().zip(saved) {
            let (_, g) = param.value_and_grad_mut();
            *g = grad;
        }
    }

    /// Iterates every parameter of the model, in layer order.
    pub fn params(&self) -> impl Iterator<Item = &Param> {
        self.layers.iter().flat_map(|layer| layer.params())
    }

    /// Iterates every parameter of the model mutably, in layer order.
    pub fn params_mut(&mut self) -> impl Iterator<Item = &mut Param> {
        self.layers
            .iter_mut()
            .flat_map(|layer| layer.params_mut().iter_mut())
    }
}

impl Model for Sequential {
    fn size(&self) -> usize {
        self.layers.iter().map(|layer| layer.size()).sum()
    }

    fn predict(&mut self, x: ArrayView1<Scalar>) -> Result<Array1<Scalar>> {
        self.forward(x)
    }

    fn zero_grad(&mut self) {
        self.layers.iter_mut().for_each(|layer| layer.zero_grad());
    }
}
