mod matrix;
#[allow(clippy::module_inception)]
mod tensor;

pub use matrix::{Matrix, Shape};
pub use tensor::Tensor;
