use ndarray::{Array1, ArrayView1};

use super::{LossFn, loss_fn::check_operands};
use crate::{Result, config::Scalar};

/// Mean squared error loss function, averaged over the elements of the prediction.
#[derive(Default, Clone, Copy, Debug)]
pub struct Mse;

impl Mse {
    /// Returns a new `Mse`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for Mse {
    fn forward(&self, y_pred: ArrayView1<Scalar>, y: ArrayView1<Scalar>) -> Result<Scalar> {
        check_operands(y_pred, y)?;

        let n = y_pred.len() as Scalar;
        Ok((&y_pred - &y).mapv(|e| e.powi(2)).sum() / n)
    }

    fn backward(
        &self,
        y_pred: ArrayView1<Scalar>,
        y: ArrayView1<Scalar>,
    ) -> Result<Array1<Scalar>> {
        check_operands(y_pred, y)?;

        let n = y_pred.len() as Scalar;
        Ok((&y_pred - &y) * (2. / n))
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;
    use crate::MlErr;

    #[test]
    fn single_element() {
        let (y_pred, y) = (array![3.], array![1.]);

        assert_eq!(Mse.forward(y_pred.view(), y.view()).unwrap(), 4.);
        assert_eq!(Mse.backward(y_pred.view(), y.view()).unwrap(), array![4.]);
    }

    #[test]
    fn averages() {
        let (y_pred, y) = (array![1., 2., 3., 4.], array![1., 0., 3., 0.]);

        assert_eq!(Mse.forward(y_pred.view(), y.view()).unwrap(), 5.);
        assert_eq!(
            Mse.backward(y_pred.view(), y.view()).unwrap(),
            array![0., 1., 0., 2.]
        );
    }

    #[test]
    fn errors() {
        let empty = Array1::<Scalar>::zeros(0);
        assert!(matches!(
            Mse.forward(empty.view(), empty.view()),
            Err(MlErr::InvalidArgument(_))
        ));

        let (y_pred, y) = (array![1., 2.], array![1.]);
        assert!(matches!(
            Mse.backward(y_pred.view(), y.view()),
            Err(MlErr::ShapeMismatch {
                got: 1,
                expected: 2,
                ..
            })
        ));
    }
}
