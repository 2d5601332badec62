use ndarray::{Array1, ArrayView1};

use super::Layer;
use crate::{
    MlErr, Result,
    arch::activations::{ActFn, ActivationFn},
    config::Scalar,
    error::check_size,
};

/// A parameterless layer applying an activation function to each element of its input.
#[derive(Clone, Debug)]
pub struct Activation<A = ActFn> {
    dim: usize,
    act_fn: A,

    // Forward metadata
    z: Option<Array1<Scalar>>,
}

impl<A: ActivationFn> Activation<A> {
    /// Creates a new `Activation` layer.
    ///
    /// # Arguments
    /// * `dim` - The width of both the input and the output.
    /// * `act_fn` - The function to apply.
    pub fn new(dim: usize, act_fn: A) -> Self {
        Self {
            dim,
            act_fn,
            z: None,
        }
    }

    pub fn act_fn(&self) -> &A {
        &self.act_fn
    }
}

impl<A: ActivationFn + Send> Layer for Activation<A> {
    fn name(&self) -> &'static str {
        "activation"
    }

    fn input_dim(&self) -> usize {
        self.dim
    }

    fn output_dim(&self) -> usize {
        self.dim
    }

    fn forward(&mut self, x: ArrayView1<Scalar>) -> Result<Array1<Scalar>> {
        check_size("activation input", x.len(), self.dim)?;

        let a = x.mapv(|z| self.act_fn.forward(z));
        self.z = Some(x.to_owned());
        Ok(a)
    }

    fn backward(&mut self, d: ArrayView1<Scalar>) -> Result<Array1<Scalar>> {
        check_size("activation output gradient", d.len(), self.dim)?;

        let Some(z) = &self.z else {
            return Err(MlErr::MissingForwardCache { layer: "activation" });
        };

        let mut dx = d.to_owned();
        dx.zip_mut_with(z, |d, &z| *d *= self.act_fn.derivative(z));
        Ok(dx)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ndarray::array;

    use super::*;
    use crate::arch::activations::{Identity, Relu};

    #[test]
    fn identity_passes_gradients_through() {
        let mut layer = Activation::new(3, Identity);

        let a = layer.forward(array![1., -2., 3.].view()).unwrap();
        assert_eq!(a, array![1., -2., 3.]);

        let dx = layer.backward(array![0.5, 0.25, -1.].view()).unwrap();
        assert_eq!(dx, array![0.5, 0.25, -1.]);
        assert_eq!(layer.size(), 0);
    }

    #[test]
    fn relu_gates_by_pre_activation() {
        let mut layer = Activation::new(3, ActFn::relu());

        let a = layer.forward(array![1., -2., 3.].view()).unwrap();
        assert_eq!(a, array![1., 0., 3.]);

        let dx = layer.backward(array![1., 1., 1.].view()).unwrap();
        assert_eq!(dx, array![1., 0., 1.]);
    }

    #[test]
    fn shared_act_fn() {
        let relu: Arc<dyn ActivationFn + Send + Sync> = Arc::new(Relu);
        let mut first = Activation::new(1, Arc::clone(&relu));
        let mut second = Activation::new(1, relu);

        assert_eq!(first.forward(array![-1.].view()).unwrap(), array![0.]);
        assert_eq!(second.forward(array![2.].view()).unwrap(), array![2.]);
    }

    #[test]
    fn errors() {
        let mut layer = Activation::new(2, Identity);

        assert!(matches!(
            layer.backward(array![1., 1.].view()),
            Err(MlErr::MissingForwardCache { .. })
        ));
        assert!(matches!(
            layer.forward(array![1.].view()),
            Err(MlErr::ShapeMismatch {
                got: 1,
                expected: 2,
                ..
            })
        ));
    }
}
