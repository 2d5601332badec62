use crate::{Result, config::Scalar};

/// A source of initial values for a model's parameters.
///
/// Layers call `fill` once per parameter, weights before biases, so a generator that replays
/// stored values sees them in the same order they were saved in.
pub trait ParamGen {
    /// Overwrites the whole of `out` with the next values of the generator.
    ///
    /// # Errors
    /// `MlErr::InvalidArgument` if the generator cannot produce `out.len()` more values.
    fn fill(&mut self, out: &mut [Scalar]) -> Result<()>;
}
