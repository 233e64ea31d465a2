use log::debug;
use ml_core::{Gradient, Variable};
use parking_lot::Mutex;

use super::{Result, ServerErr};
use crate::optimization::Updater;

/// The canonical parameters and the strategy that updates them.
///
/// The store itself does no locking around the parameters, the `StoreHandle`
/// serializes writes against reads.
#[derive(Debug)]
pub struct ParameterStore<U: Updater> {
    params: Box<[Variable]>,
    // Only ever reached through `get_mut`, the mutex just lifts `Sync` off `U`.
    updater: Mutex<U>,
}

impl<U: Updater> ParameterStore<U> {
    /// Creates a new `ParameterStore`.
    ///
    /// # Arguments
    /// * `params` - The canonical variables, in the order agreed with the workers.
    /// * `updater` - The update strategy.
    ///
    /// # Returns
    /// A new `ParameterStore` instance.
    pub fn new(params: Vec<Variable>, updater: U) -> Self {
        Self {
            params: params.into_boxed_slice(),
            updater: Mutex::new(updater),
        }
    }

    /// Returns the canonical variables.
    pub fn params(&self) -> &[Variable] {
        &self.params
    }

    /// Returns the amount of variables held.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Encodes the current values of every variable.
    pub fn encode(&self) -> Vec<u8> {
        let guards: Vec<_> = self.params.iter().map(Variable::read).collect();
        comms::encode_vectors(&guards.iter().map(|g| &**g).collect::<Vec<_>>())
    }

    /// Copies the current values of every variable.
    pub fn snapshot(&self) -> Vec<Vec<f64>> {
        self.params.iter().map(Variable::to_vec).collect()
    }

    /// Checks that `vecs` has exactly the shape of the canonical parameters.
    ///
    /// # Arguments
    /// * `vecs` - The decoded vectors of a write.
    ///
    /// # Returns
    /// A `ServerErr::DimensionMismatch` describing the first disagreement.
    pub fn validate(&self, vecs: &[Vec<f64>]) -> Result<()> {
        if vecs.len() != self.params.len() {
            return Err(ServerErr::DimensionMismatch {
                what: "vector count".into(),
                got: vecs.len(),
                expected: self.params.len(),
            });
        }

        for (var, v) in self.params.iter().zip(vecs) {
            if v.len() != var.len() {
                return Err(ServerErr::DimensionMismatch {
                    what: format!("variable {}", var.name()),
                    got: v.len(),
                    expected: var.len(),
                });
            }
        }

        Ok(())
    }

    /// Validates `vecs` and applies them as a gradient through the updater.
    ///
    /// The vectors are paired with the canonical variables by position.
    ///
    /// # Arguments
    /// * `vecs` - The decoded vectors of a write.
    ///
    /// # Returns
    /// A `ServerErr::DimensionMismatch` without touching the parameters if the
    /// shapes disagree.
    pub fn apply(&mut self, vecs: Vec<Vec<f64>>) -> Result<()> {
        self.validate(&vecs)?;

        let mut grad: Gradient = self.params.iter().cloned().zip(vecs).collect();
        self.updater.get_mut().update(&mut grad);

        debug!(variables = self.params.len(); "applied gradient");
        Ok(())
    }
}
