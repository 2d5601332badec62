use std::{cell::RefCell, rc::Rc};

use rand::Rng;
use rand_distr::{Distribution, Normal, Uniform};

use super::ParamGen;
use crate::{MlErr, Result, config::Scalar};

/// Fills parameters with samples of a probability distribution.
///
/// The random number generator is shared so that the generators of every layer of a model draw
/// from a single seeded stream.
pub struct RandParamGen<R, D> {
    rng: Rc<RefCell<R>>,
    distribution: D,
}

impl<R: Rng, D: Distribution<Scalar>> RandParamGen<R, D> {
    pub fn new(rng: Rc<RefCell<R>>, distribution: D) -> Self {
        Self { rng, distribution }
    }
}

impl<R: Rng, D: Distribution<Scalar>> ParamGen for RandParamGen<R, D> {
    fn fill(&mut self, out: &mut [Scalar]) -> Result<()> {
        let mut rng = self.rng.borrow_mut();
        out.iter_mut()
            .for_each(|v| *v = self.distribution.sample(&mut *rng));

        Ok(())
    }
}

/// The amount of inputs and outputs of the layer being initialized, which scale the
/// distributions below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fan {
    pub fan_in: usize,
    pub fan_out: usize,
}

impl From<(usize, usize)> for Fan {
    fn from((fan_in, fan_out): (usize, usize)) -> Self {
        Self { fan_in, fan_out }
    }
}

/// `U[low, high)`, failing unless `low < high`.
pub fn uniform(low: Scalar, high: Scalar) -> Result<Uniform<Scalar>> {
    Ok(Uniform::new(low, high)?)
}

/// `U[low, high]`, failing unless `low <= high`.
pub fn uniform_inclusive(low: Scalar, high: Scalar) -> Result<Uniform<Scalar>> {
    Ok(Uniform::new_inclusive(low, high)?)
}

/// `N(mean, std_dev²)`, failing unless both are finite and `std_dev` is not negative.
pub fn normal(mean: Scalar, std_dev: Scalar) -> Result<Normal<Scalar>> {
    if !mean.is_finite() || !std_dev.is_finite() {
        return Err(MlErr::invalid(format!(
            "normal distribution needs finite parameters, got N({mean}, {std_dev}²)"
        )));
    }

    Ok(Normal::new(mean, std_dev)?)
}

fn symmetric_uniform(bound: Scalar) -> Result<Uniform<Scalar>> {
    uniform(-bound, bound)
}

/// Glorot uniform, `U(-√(6 / (in + out)), √(6 / (in + out)))`.
pub fn xavier_uniform(fan: Fan) -> Result<Uniform<Scalar>> {
    symmetric_uniform((6. / (fan.fan_in + fan.fan_out) as Scalar).sqrt())
}

/// `U(-√(3 / in), √(3 / in))`.
pub fn lecun_uniform(fan: Fan) -> Result<Uniform<Scalar>> {
    symmetric_uniform((3. / fan.fan_in as Scalar).sqrt())
}

/// He normal, `N(0, 2 / in)`.
pub fn kaiming(fan: Fan) -> Result<Normal<Scalar>> {
    normal(0., (2. / fan.fan_in as Scalar).sqrt())
}

/// Glorot normal, `N(0, 2 / (in + out))`.
pub fn xavier(fan: Fan) -> Result<Normal<Scalar>> {
    normal(0., (2. / (fan.fan_in + fan.fan_out) as Scalar).sqrt())
}

/// `N(0, 1 / in)`.
pub fn lecun(fan: Fan) -> Result<Normal<Scalar>> {
    normal(0., (1. / fan.fan_in as Scalar).sqrt())
}
