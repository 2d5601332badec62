pub mod activations;
mod builder;
pub mod layers;
pub mod loss;
mod model;
mod sequential;

pub use model::Model;
pub use sequential::Sequential;
