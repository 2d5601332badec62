mod constant;
mod param_gen;
mod random;

pub use constant::{ConstParamGen, ValuesParamGen};
pub use param_gen::ParamGen;
pub use random::{
    Fan, RandParamGen, kaiming, lecun, lecun_uniform, normal, uniform, uniform_inclusive, xavier,
    xavier_uniform,
};
