use super::ActivationFn;
use crate::config::Scalar;

/// The rectified linear unit, `ϕ(x) = max(x, 0)`.
///
/// The derivative at 0 is taken to be 0.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Relu;

impl ActivationFn for Relu {
    fn forward(&self, x: Scalar) -> Scalar {
        x.max(0.)
    }

    fn derivative(&self, x: Scalar) -> Scalar {
        if x > 0. { 1. } else { 0. }
    }
}

/// A rectified linear unit that lets a fraction of negative inputs through.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LeakyRelu {
    alpha: Scalar,
}

impl LeakyRelu {
    /// Creates a new `LeakyRelu`.
    ///
    /// # Arguments
    /// * `alpha` - The slope for negative inputs.
    pub fn new(alpha: Scalar) -> Self {
        Self { alpha }
    }

    pub fn alpha(&self) -> Scalar {
        self.alpha
    }
}

impl Default for LeakyRelu {
    fn default() -> Self {
        Self::new(0.01)
    }
}

impl ActivationFn for LeakyRelu {
    fn forward(&self, x: Scalar) -> Scalar {
        if x > 0. { x } else { self.alpha * x }
    }

    fn derivative(&self, x: Scalar) -> Scalar {
        if x > 0. { 1. } else { self.alpha }
    }
}
