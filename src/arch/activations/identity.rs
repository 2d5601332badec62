use super::ActivationFn;
use crate::config::Scalar;

/// The identity function, `ϕ(x) = x`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Identity;

impl ActivationFn for Identity {
    fn forward(&self, x: Scalar) -> Scalar {
        x
    }

    fn derivative(&self, _x: Scalar) -> Scalar {
        1.
    }
}
