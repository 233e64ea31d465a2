use std::collections::HashMap;

use super::Transformer;
use crate::{Gradient, Variable};

/// Scales the entries of selected variables, leaving the rest unchanged.
#[derive(Debug, Default)]
pub struct Biaser {
    scales: HashMap<Variable, f64>,
}

impl Biaser {
    pub fn new(scales: HashMap<Variable, f64>) -> Self {
        Self { scales }
    }

    /// Creates a `Biaser` applying the same `scale` to every variable in `vars`.
    pub fn uniform(vars: &[Variable], scale: f64) -> Self {
        Self::new(vars.iter().map(|var| (var.clone(), scale)).collect())
    }
}

impl Transformer for Biaser {
    fn transform(&mut self, grad: &mut Gradient) {
        for (var, &scale) in &self.scales {
            if let Some(g) = grad.get_mut(var) {
                g.iter_mut().for_each(|x| *x *= scale);
            }
        }
    }
}
