use super::ActivationFn;
use crate::config::Scalar;

/// The hyperbolic tangent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tanh;

impl ActivationFn for Tanh {
    fn forward(&self, x: Scalar) -> Scalar {
        x.tanh()
    }

    fn derivative(&self, x: Scalar) -> Scalar {
        1. - x.tanh().powi(2)
    }
}
