use super::ParamGen;
use crate::{MlErr, Result, config::Scalar};

/// Fills every parameter with the same value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstParamGen(pub Scalar);

impl ParamGen for ConstParamGen {
    fn fill(&mut self, out: &mut [Scalar]) -> Result<()> {
        out.fill(self.0);
        Ok(())
    }
}

/// Replays a fixed list of values, e.g. the parameters of a previously trained model.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuesParamGen {
    values: Vec<Scalar>,
    next: usize,
}

impl ValuesParamGen {
    pub fn new(values: Vec<Scalar>) -> Self {
        Self { values, next: 0 }
    }

    /// Returns the amount of values not handed out yet.
    pub fn remaining(&self) -> usize {
        self.values.len() - self.next
    }
}

impl ParamGen for ValuesParamGen {
    /// Fails without writing anything if fewer than `out.len()` values are left.
    fn fill(&mut self, out: &mut [Scalar]) -> Result<()> {
        if out.len() > self.remaining() {
            return Err(MlErr::invalid(format!(
                "{} stored parameter values left, {} requested",
                self.remaining(),
                out.len()
            )));
        }

        let end = self.next + out.len();
        out.copy_from_slice(&self.values[self.next..end]);
        self.next = end;
        Ok(())
    }
}
