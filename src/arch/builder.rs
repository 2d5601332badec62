use std::{cell::RefCell, rc::Rc};

use log::debug;
use rand::{Rng, SeedableRng, rngs::StdRng};

use super::{
    Model, Sequential,
    activations::ActFn,
    layers::{Activation, Dense, Layer},
    loss::{BinaryCrossEntropy, LossFn, Mse},
};
use crate::{
    Result,
    error::check_size,
    initialization::{
        ConstParamGen, Fan, ParamGen, RandParamGen, ValuesParamGen, kaiming, lecun, lecun_uniform,
        normal, uniform, uniform_inclusive, xavier, xavier_uniform,
    },
    specs::{ActFnSpec, LayerSpec, LossFnSpec, ModelSpec, ParamGenSpec},
};

impl From<ActFnSpec> for ActFn {
    fn from(spec: ActFnSpec) -> Self {
        match spec {
            ActFnSpec::Identity => ActFn::identity(),
            ActFnSpec::Sigmoid { amp } => ActFn::sigmoid(amp),
            ActFnSpec::Relu => ActFn::relu(),
            ActFnSpec::LeakyRelu { alpha } => ActFn::leaky_relu(alpha),
            ActFnSpec::Tanh => ActFn::tanh(),
        }
    }
}

impl LossFnSpec {
    /// Creates the loss function this spec describes.
    pub fn build(self) -> Box<dyn LossFn> {
        match self {
            LossFnSpec::Mse => Box::new(Mse),
            LossFnSpec::BinaryCrossEntropy => Box::new(BinaryCrossEntropy),
        }
    }
}

/// Creates a parameter generator for a layer.
///
/// # Arguments
/// * `spec` - The generator's specification.
/// * `rng` - The random number generator shared by every layer of the model.
/// * `fan` - The fan-in and fan-out of the layer.
/// * `size` - The amount of parameters of the layer.
fn param_gen<R: Rng + 'static>(
    spec: &ParamGenSpec,
    rng: &Rc<RefCell<R>>,
    fan: Fan,
    size: usize,
) -> Result<Box<dyn ParamGen>> {
    let rng = Rc::clone(rng);

    let param_gen: Box<dyn ParamGen> = match *spec {
        ParamGenSpec::Const { value } => Box::new(ConstParamGen(value)),
        ParamGenSpec::Values { ref values } => {
            check_size("layer initial values", values.len(), size)?;
            Box::new(ValuesParamGen::new(values.clone()))
        }
        ParamGenSpec::Uniform { low, high } => Box::new(RandParamGen::new(rng, uniform(low, high)?)),
        ParamGenSpec::UniformInclusive { low, high } => {
            Box::new(RandParamGen::new(rng, uniform_inclusive(low, high)?))
        }
        ParamGenSpec::XavierUniform => Box::new(RandParamGen::new(rng, xavier_uniform(fan)?)),
        ParamGenSpec::LecunUniform => Box::new(RandParamGen::new(rng, lecun_uniform(fan)?)),
        ParamGenSpec::Normal { mean, std_dev } => {
            Box::new(RandParamGen::new(rng, normal(mean, std_dev)?))
        }
        ParamGenSpec::Kaiming => Box::new(RandParamGen::new(rng, kaiming(fan)?)),
        ParamGenSpec::Xavier => Box::new(RandParamGen::new(rng, xavier(fan)?)),
        ParamGenSpec::Lecun => Box::new(RandParamGen::new(rng, lecun(fan)?)),
    };

    Ok(param_gen)
}

impl LayerSpec {
    fn build<R: Rng + 'static>(&self, rng: &Rc<RefCell<R>>) -> Result<Box<dyn Layer>> {
        match self {
            LayerSpec::Dense {
                dim,
                act_fn,
                bias,
                init,
            } => {
                let act_fn = act_fn.map(ActFn::from);
                let mut dense = if *bias {
                    Dense::new(*dim, act_fn)?
                } else {
                    Dense::without_bias(*dim, act_fn)?
                };

                let mut init_gen = param_gen(init, rng, Fan::from(*dim), dense.size())?;
                dense.init(init_gen.as_mut())?;
                Ok(Box::new(dense))
            }
            LayerSpec::Activation { dim, act_fn } => {
                Ok(Box::new(Activation::new(*dim, ActFn::from(*act_fn))))
            }
        }
    }
}

impl ModelSpec {
    /// Assembles the model this spec describes.
    ///
    /// # Arguments
    /// * `seed` - A seed for the parameter initialization, `None` to seed from the OS.
    ///
    /// # Returns
    /// The model, with its parameters initialized and its gradients zeroed.
    pub fn build(&self, seed: Option<u64>) -> Result<Sequential> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let rng = Rc::new(RefCell::new(rng));

        let ModelSpec::Sequential { layers } = self;
        let layers = layers
            .iter()
            .map(|layer| layer.build(&rng))
            .collect::<Result<Vec<_>>>()?;

        let model = Sequential::new(layers);
        debug!(layers = model.len(), params = model.size(); "built sequential model");
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;
    use crate::MlErr;

    fn spec(init: ParamGenSpec) -> ModelSpec {
        ModelSpec::Sequential {
            layers: vec![
                LayerSpec::Dense {
                    dim: (2, 3),
                    act_fn: Some(ActFnSpec::Sigmoid { amp: 1. }),
                    bias: true,
                    init: init.clone(),
                },
                LayerSpec::Dense {
                    dim: (3, 1),
                    act_fn: None,
                    bias: false,
                    init,
                },
            ],
        }
    }

    #[test]
    fn build_const() {
        let mut model = spec(ParamGenSpec::Const { value: 0.5 }).build(None).unwrap();

        assert_eq!(model.len(), 2);
        assert_eq!(model.size(), 9 + 3);
        assert!(model.params().all(|p| p.value().as_slice().iter().all(|&v| v == 0.5)));
        assert!(model.params().all(|p| p.grad().as_slice().iter().all(|&g| g == 0.)));

        // sigmoid(0.5 + 0.5 + 0.5) * 0.5 * 3
        let expected = 1.5 / (1. + (-1.5_f64).exp());
        let y = model.predict(array![1., 1.].view()).unwrap();
        assert!((y[0] - expected).abs() < 1e-12);
    }

    #[test]
    fn build_is_reproducible_with_a_seed() {
        let a = spec(ParamGenSpec::XavierUniform).build(Some(7)).unwrap();
        let b = spec(ParamGenSpec::XavierUniform).build(Some(7)).unwrap();

        let a: Vec<_> = a.params().map(|p| p.value().clone()).collect();
        let b: Vec<_> = b.params().map(|p| p.value().clone()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn build_reports_invalid_initializers() {
        let res = spec(ParamGenSpec::Uniform { low: 1., high: 0. }).build(Some(0));
        assert!(matches!(res, Err(MlErr::InvalidArgument(_))));
    }

    #[test]
    fn fan_scaled_init_needs_inputs() {
        let spec = ModelSpec::Sequential {
            layers: vec![LayerSpec::Dense {
                dim: (0, 2),
                act_fn: None,
                bias: true,
                init: ParamGenSpec::Kaiming,
            }],
        };

        assert!(matches!(
            spec.build(Some(0)),
            Err(MlErr::InvalidArgument(_))
        ));
    }

    #[test]
    fn build_from_stored_values() {
        let spec = ModelSpec::Sequential {
            layers: vec![LayerSpec::Dense {
                dim: (2, 1),
                act_fn: None,
                bias: true,
                init: ParamGenSpec::Values {
                    values: vec![2., -1., 0.5],
                },
            }],
        };
        let mut model = spec.build(None).unwrap();

        // 2 * 3 - 1 * 4 + 0.5
        let y = model.predict(array![3., 4.].view()).unwrap();
        assert_eq!(y, array![2.5]);
    }

    #[test]
    fn stored_values_must_cover_the_layer() {
        let res = spec(ParamGenSpec::Values {
            values: vec![0.; 9],
        })
        .build(None);

        // enough for the first layer, too many for the second
        assert!(matches!(
            res,
            Err(MlErr::ShapeMismatch {
                got: 9,
                expected: 3,
                ..
            })
        ));
    }

    #[test]
    fn loss_spec() {
        let loss_fn = LossFnSpec::Mse.build();
        let loss = loss_fn.forward(array![1.].view(), array![3.].view()).unwrap();
        assert_eq!(loss, 4.);

        let loss_fn = LossFnSpec::BinaryCrossEntropy.build();
        assert!(loss_fn.forward(array![1.].view(), array![1.].view()).is_err());
    }
}
