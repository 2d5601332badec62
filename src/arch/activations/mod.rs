mod act_fn;
mod activation;
mod identity;
mod relu;
mod sigmoid;
mod tanh;

pub use act_fn::ActFn;
pub use activation::ActivationFn;
pub use identity::Identity;
pub use relu::{LeakyRelu, Relu};
pub use sigmoid::Sigmoid;
pub use tanh::Tanh;
