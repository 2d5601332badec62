use ndarray::{Array1, ArrayView1, Zip};

use super::{LossFn, loss_fn::check_operands};
use crate::{MlErr, Result, config::Scalar};

/// Binary cross-entropy loss, averaged over the elements of the prediction.
///
/// Every prediction must lie in the open interval `(0, 1)`, as produced by a sigmoid of unit
/// amplitude. Predictions outside of it are rejected instead of producing infinities or NaN.
#[derive(Default, Clone, Copy, Debug)]
pub struct BinaryCrossEntropy;

impl BinaryCrossEntropy {
    pub fn new() -> Self {
        Self
    }
}

fn check_domain(y_pred: ArrayView1<Scalar>) -> Result<()> {
    if let Some(p) = y_pred.iter().find(|&&p| !(p > 0. && p < 1.)) {
        return Err(MlErr::invalid(format!(
            "binary cross-entropy needs predictions in (0, 1), got {p}"
        )));
    }

    Ok(())
}

impl LossFn for BinaryCrossEntropy {
    fn forward(&self, y_pred: ArrayView1<Scalar>, y: ArrayView1<Scalar>) -> Result<Scalar> {
        check_operands(y_pred, y)?;
        check_domain(y_pred)?;

        let n = y_pred.len() as Scalar;
        let total = Zip::from(&y_pred)
            .and(&y)
            .fold(0., |acc, &p, &t| acc - (t * p.ln() + (1. - t) * (1. - p).ln()));

        Ok(total / n)
    }

    fn backward(
        &self,
        y_pred: ArrayView1<Scalar>,
        y: ArrayView1<Scalar>,
    ) -> Result<Array1<Scalar>> {
        check_operands(y_pred, y)?;
        check_domain(y_pred)?;

        let n = y_pred.len() as Scalar;
        Ok(Zip::from(&y_pred)
            .and(&y)
            .map_collect(|&p, &t| (p - t) / (p * (1. - p) * n)))
    }
}
