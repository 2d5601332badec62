//! Numeric types shared across the whole crate.

/// The crate's name, as published.
pub const PROJECT_NAME: &str = env!("CARGO_PKG_NAME");

/// The crate's version, as published.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The single floating point width used for every element, loss and gradient.
pub type Scalar = f64;

/// The dimensions of an N-D buffer, outermost first.
pub type Dims = Vec<usize>;
