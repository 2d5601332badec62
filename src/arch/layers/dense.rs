use ndarray::{Array1, ArrayView1, ArrayView2, ArrayViewMut2, Axis, linalg};

use super::{Layer, Param};
use crate::{
    MlErr, Result,
    arch::activations::{ActFn, ActivationFn},
    config::Scalar,
    error::check_size,
    tensor::Matrix,
};

const WEIGHTS: usize = 0;
const BIASES: usize = 1;

/// A fully connected layer, `a = ϕ(xW + b)`.
///
/// The weights are stored as an `(input, output)` row-major matrix, so `W[i][j]` connects the
/// `i`-th input to the `j`-th output. Both the bias and the activation are optional.
#[derive(Clone, Debug)]
pub struct Dense {
    dim: (usize, usize),
    act_fn: Option<ActFn>,
    params: Vec<Param>,

    // Forward metadata
    x: Option<Array1<Scalar>>,
    z: Option<Array1<Scalar>>,
}

/// Views a parameter buffer as a `dim` matrix, whatever shape the caller reshaped it to.
fn layout(m: &Matrix, dim: (usize, usize)) -> Result<ArrayView2<'_, Scalar>> {
    check_size("dense weights", m.numel(), dim.0 * dim.1)?;
    Ok(ArrayView2::from_shape(dim, m.as_slice())?)
}

fn layout_mut(m: &mut Matrix, dim: (usize, usize)) -> Result<ArrayViewMut2<'_, Scalar>> {
    check_size("dense weight gradients", m.numel(), dim.0 * dim.1)?;
    Ok(ArrayViewMut2::from_shape(dim, m.as_mut_slice())?)
}

impl Dense {
    /// Creates a new `Dense` layer with zeroed weights and biases.
    ///
    /// # Arguments
    /// * `dim` - The input and output widths.
    /// * `act_fn` - The activation applied to the weighted sums, if any.
    ///
    /// # Returns
    /// A new `Dense` instance or `MlErr::Overflow` if the weight matrix is too big.
    pub fn new(dim: (usize, usize), act_fn: Option<ActFn>) -> Result<Self> {
        let weights = Matrix::zeros(dim.0, dim.1)?;
        let biases = Matrix::zeros(1, dim.1)?;
        Self::with_params(dim, weights, Some(biases), act_fn)
    }

    /// Creates a new `Dense` layer with zeroed weights and no bias.
    pub fn without_bias(dim: (usize, usize), act_fn: Option<ActFn>) -> Result<Self> {
        let weights = Matrix::zeros(dim.0, dim.1)?;
        Self::with_params(dim, weights, None, act_fn)
    }

    /// Creates a new `Dense` layer from existing parameters.
    ///
    /// # Arguments
    /// * `dim` - The input and output widths.
    /// * `weights` - An `(input, output)` matrix.
    /// * `biases` - A `(1, output)` matrix, or `None` for a layer without bias.
    /// * `act_fn` - The activation applied to the weighted sums, if any.
    ///
    /// # Returns
    /// A new `Dense` instance or `MlErr::ShapeMismatch` if the parameters don't match `dim`.
    pub fn with_params(
        dim: (usize, usize),
        weights: Matrix,
        biases: Option<Matrix>,
        act_fn: Option<ActFn>,
    ) -> Result<Self> {
        check_size("dense weight rows", weights.rows(), dim.0)?;
        check_size("dense weight columns", weights.cols(), dim.1)?;

        let mut params = vec![Param::new("weights", weights)?];

        if let Some(biases) = biases {
            check_size("dense bias rows", biases.rows(), 1)?;
            check_size("dense bias columns", biases.cols(), dim.1)?;
            params.push(Param::new("biases", biases)?);
        }

        Ok(Self {
            dim,
            act_fn,
            params,
            x: None,
            z: None,
        })
    }

    pub fn dim(&self) -> (usize, usize) {
        self.dim
    }

    pub fn act_fn(&self) -> Option<&ActFn> {
        self.act_fn.as_ref()
    }

    pub fn weights(&self) -> &Param {
        &self.params[WEIGHTS]
    }

    pub fn biases(&self) -> Option<&Param> {
        self.params.get(BIASES)
    }
}

impl Layer for Dense {
    fn name(&self) -> &'static str {
        "dense"
    }

    fn input_dim(&self) -> usize {
        self.dim.0
    }

    fn output_dim(&self) -> usize {
        self.dim.1
    }

    fn forward(&mut self, x: ArrayView1<Scalar>) -> Result<Array1<Scalar>> {
        let (dim_in, dim_out) = self.dim;
        check_size("dense input", x.len(), dim_in)?;

        let mut z = match self.params.get(BIASES) {
            Some(b) => {
                check_size("dense biases", b.numel(), dim_out)?;
                Array1::from(b.value().as_slice().to_vec())
            }
            None => Array1::zeros(dim_out),
        };

        let w = layout(self.params[WEIGHTS].value(), self.dim)?;
        linalg::general_mat_vec_mul(1.0, &w.t(), &x, 1.0, &mut z);

        let a = match &self.act_fn {
            Some(act_fn) => z.mapv(|z| act_fn.forward(z)),
            None => z.clone(),
        };

        self.x = Some(x.to_owned());
        self.z = Some(z);
        Ok(a)
    }

    fn backward(&mut self, d: ArrayView1<Scalar>) -> Result<Array1<Scalar>> {
        let (dim_in, dim_out) = self.dim;
        check_size("dense output gradient", d.len(), dim_out)?;

        let Self {
            act_fn,
            params,
            x,
            z,
            ..
        } = self;

        let (Some(x), Some(z)) = (x.as_ref(), z.as_ref()) else {
            return Err(MlErr::MissingForwardCache { layer: "dense" });
        };

        let mut delta = d.to_owned();
        if let Some(act_fn) = act_fn {
            delta.zip_mut_with(z, |d, &z| *d *= act_fn.derivative(z));
        }

        let (weights, biases) = params.split_at_mut(BIASES);
        let (w, dw) = weights[WEIGHTS].value_and_grad_mut();
        let w = layout(w, (dim_in, dim_out))?;
        let mut dw = layout_mut(dw, (dim_in, dim_out))?;

        if let Some(b) = biases.first() {
            check_size("dense bias gradients", b.grad().numel(), dim_out)?;
        }

        // dW += x ⊗ δ
        linalg::general_mat_mul(
            1.0,
            &x.view().insert_axis(Axis(1)),
            &delta.view().insert_axis(Axis(0)),
            1.0,
            &mut dw,
        );

        if let Some(b) = biases.first_mut() {
            let (_, db) = b.value_and_grad_mut();
            for (db, d) in db.as_mut_slice().iter_mut().zip(&delta) {
                *db += d;
            }
        }

        let mut dx = Array1::zeros(dim_in);
        linalg::general_mat_vec_mul(1.0, &w, &delta, 0.0, &mut dx);

        Ok(dx)
    }

    fn params(&self) -> &[Param] {
        &self.params
    }

    fn params_mut(&mut self) -> &mut [Param] {
        &mut self.params
    }
}
