use crate::config::Scalar;

/// An elementwise activation function with an analytic derivative.
///
/// Implementors hold no mutable state, so a single value may be shared by any number of layers.
pub trait ActivationFn {
    /// Applies the function to a single pre-activation.
    fn forward(&self, x: Scalar) -> Scalar;

    /// Evaluates the derivative at the same pre-activation given to `forward`.
    fn derivative(&self, x: Scalar) -> Scalar;
}

impl<T: ActivationFn + ?Sized> ActivationFn for std::sync::Arc<T> {
    fn forward(&self, x: Scalar) -> Scalar {
        (**self).forward(x)
    }

    fn derivative(&self, x: Scalar) -> Scalar {
        (**self).derivative(x)
    }
}
