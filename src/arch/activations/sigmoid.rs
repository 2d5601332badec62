use super::ActivationFn;
use crate::config::Scalar;

/// The logistic function scaled by an amplitude, `ϕ(x) = amp / (1 + e^-x)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sigmoid {
    amp: Scalar,
}

impl Sigmoid {
    /// Creates a new `Sigmoid`.
    ///
    /// # Arguments
    /// * `amp` - The upper bound of the function's image.
    pub fn new(amp: Scalar) -> Self {
        Self { amp }
    }

    pub fn amp(&self) -> Scalar {
        self.amp
    }

    fn logistic(x: Scalar) -> Scalar {
        1. / (1. + (-x).exp())
    }
}

impl Default for Sigmoid {
    fn default() -> Self {
        Self::new(1.)
    }
}

impl ActivationFn for Sigmoid {
    fn forward(&self, x: Scalar) -> Scalar {
        self.amp * Self::logistic(x)
    }

    // Written in terms of the logistic value, `e^-x / (1 + e^-x)^2` is `inf / inf` for very
    // negative inputs.
    fn derivative(&self, x: Scalar) -> Scalar {
        let s = Self::logistic(x);
        self.amp * s * (1. - s)
    }
}
