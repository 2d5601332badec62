//! Serializable descriptions of models, used to assemble them from configuration files.

use serde::{Deserialize, Serialize};

use crate::{Result, config::Scalar};

/// The specification for the `ActFn` enum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActFnSpec {
    Identity,
    Sigmoid { amp: Scalar },
    Relu,
    LeakyRelu { alpha: Scalar },
    Tanh,
}

/// The specification for a `ParamGen`.
///
/// Fan-in and fan-out based variants take them from the dimensions of the layer they
/// initialize. `Values` lists every parameter of the layer, weights first, row by row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamGenSpec {
    Const {
        value: Scalar,
    },
    Values {
        values: Vec<Scalar>,
    },
    Uniform {
        low: Scalar,
        high: Scalar,
    },
    UniformInclusive {
        low: Scalar,
        high: Scalar,
    },
    #[default]
    XavierUniform,
    LecunUniform,
    Normal {
        mean: Scalar,
        std_dev: Scalar,
    },
    Kaiming,
    Xavier,
    Lecun,
}

fn default_bias() -> bool {
    true
}

/// The specification for a `Layer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerSpec {
    Dense {
        dim: (usize, usize),
        act_fn: Option<ActFnSpec>,
        #[serde(default = "default_bias")]
        bias: bool,
        #[serde(default)]
        init: ParamGenSpec,
    },
    Activation {
        dim: usize,
        act_fn: ActFnSpec,
    },
}

/// The specification for the `Model` trait.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelSpec {
    Sequential { layers: Vec<LayerSpec> },
}

impl ModelSpec {
    /// Parses a `ModelSpec` from its JSON representation.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Serializes the spec to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// The specification for the `LossFn` trait.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossFnSpec {
    Mse,
    BinaryCrossEntropy,
}
