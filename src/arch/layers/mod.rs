mod activation;
mod dense;
mod layer;
mod param;

pub use activation::Activation;
pub use dense::Dense;
pub use layer::Layer;
pub use param::Param;
