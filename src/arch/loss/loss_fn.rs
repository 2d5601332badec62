use ndarray::{Array1, ArrayView1};

use crate::{MlErr, Result, config::Scalar, error::check_size};

/// A loss function comparing a prediction to its target.
pub trait LossFn {
    /// Computes the scalar loss.
    ///
    /// # Errors
    /// `MlErr::ShapeMismatch` if the vectors have different lengths and
    /// `MlErr::InvalidArgument` if they are empty.
    fn forward(&self, y_pred: ArrayView1<Scalar>, y: ArrayView1<Scalar>) -> Result<Scalar>;

    /// Computes the gradient of the loss with respect to `y_pred`, aggregated the same way
    /// `forward` aggregates the loss.
    fn backward(&self, y_pred: ArrayView1<Scalar>, y: ArrayView1<Scalar>)
    -> Result<Array1<Scalar>>;
}

/// Validates the operands of a loss function.
pub(super) fn check_operands(y_pred: ArrayView1<Scalar>, y: ArrayView1<Scalar>) -> Result<()> {
    check_size("loss target", y.len(), y_pred.len())?;

    if y_pred.is_empty() {
        return Err(MlErr::invalid("the loss of an empty prediction is undefined"));
    }

    Ok(())
}
