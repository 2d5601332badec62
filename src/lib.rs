pub mod arch;
pub mod config;
pub mod error;
pub mod initialization;
pub mod specs;
pub mod tensor;
pub mod util;

pub use error::{MlErr, Result};
