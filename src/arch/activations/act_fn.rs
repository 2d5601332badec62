use super::{ActivationFn, Identity, LeakyRelu, Relu, Sigmoid, Tanh};
use crate::config::Scalar;

/// Any of the activation functions shipped with the crate, stored by value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ActFn {
    Identity(Identity),
    Sigmoid(Sigmoid),
    Relu(Relu),
    LeakyRelu(LeakyRelu),
    Tanh(Tanh),
}
use ActFn as A;

impl ActFn {
    pub fn identity() -> Self {
        A::Identity(Identity)
    }

    pub fn sigmoid(amp: Scalar) -> Self {
        A::Sigmoid(Sigmoid::new(amp))
    }

    pub fn relu() -> Self {
        A::Relu(Relu)
    }

    pub fn leaky_relu(alpha: Scalar) -> Self {
        A::LeakyRelu(LeakyRelu::new(alpha))
    }

    pub fn tanh() -> Self {
        A::Tanh(Tanh)
    }
}

impl ActivationFn for ActFn {
    fn forward(&self, x: Scalar) -> Scalar {
        match self {
            A::Identity(a) => a.forward(x),
            A::Sigmoid(a) => a.forward(x),
            A::Relu(a) => a.forward(x),
            A::LeakyRelu(a) => a.forward(x),
            A::Tanh(a) => a.forward(x),
        }
    }

    fn derivative(&self, x: Scalar) -> Scalar {
        match self {
            A::Identity(a) => a.derivative(x),
            A::Sigmoid(a) => a.derivative(x),
            A::Relu(a) => a.derivative(x),
            A::LeakyRelu(a) => a.derivative(x),
            A::Tanh(a) => a.derivative(x),
        }
    }
}
