use std::{
    error::Error,
    fmt::{self, Display},
};

use ndarray::ShapeError;
use rand_distr::{NormalError, uniform::Error as UniformError};

/// The result type used in the entire crate.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The crate's error type.
#[derive(Debug)]
pub enum MlErr {
    /// A size computation would exceed the representable range.
    Overflow { what: &'static str },
    /// An argument is invalid for domain reasons (negative dimension, empty vector, ...).
    InvalidArgument(String),
    /// Two sizes that must agree do not.
    ShapeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    /// A layer was asked for its backward pass before any forward pass.
    MissingForwardCache { layer: &'static str },
    /// An ndarray view could not be laid over a buffer.
    Layout(ShapeError),
    /// A model specification could not be parsed.
    Spec(serde_json::Error),
}

impl MlErr {
    /// Returns an `InvalidArgument` error with the given message.
    pub fn invalid<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlErr::Overflow { what } => {
                write!(f, "size overflow while computing {what}")
            }
            MlErr::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            MlErr::ShapeMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "shape mismatch for {what}: got {got}, expected {expected}"
            ),
            MlErr::MissingForwardCache { layer } => write!(
                f,
                "backward called on a {layer} layer that has not been forwarded yet"
            ),
            MlErr::Layout(e) => write!(f, "layout error: {e}"),
            MlErr::Spec(e) => write!(f, "invalid spec: {e}"),
        }
    }
}

impl Error for MlErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Layout(e) => Some(e),
            Self::Spec(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ShapeError> for MlErr {
    fn from(value: ShapeError) -> Self {
        Self::Layout(value)
    }
}

impl From<serde_json::Error> for MlErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Spec(value)
    }
}

impl From<NormalError> for MlErr {
    fn from(value: NormalError) -> Self {
        Self::InvalidArgument(value.to_string())
    }
}

impl From<UniformError> for MlErr {
    fn from(value: UniformError) -> Self {
        Self::InvalidArgument(value.to_string())
    }
}

/// Fails with `ShapeMismatch` unless `got == expected`.
pub(crate) fn check_size(what: &'static str, got: usize, expected: usize) -> Result<()> {
    if got != expected {
        return Err(MlErr::ShapeMismatch {
            what,
            got,
            expected,
        });
    }

    Ok(())
}
