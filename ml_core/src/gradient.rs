use std::collections::{HashMap, hash_map};

use crate::Variable;

/// A (possibly partial) gradient, mapping variables to vectors of their
/// dimension.
///
/// Variables without an entry receive no update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gradient(HashMap<Variable, Vec<f64>>);

impl Gradient {
    /// Creates a new empty `Gradient`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a `Gradient` with a zero vector for every variable in `vars`.
    ///
    /// # Arguments
    /// * `vars` - The variables to cover.
    pub fn zeros(vars: &[Variable]) -> Self {
        vars.iter()
            .map(|var| (var.clone(), vec![0.; var.len()]))
            .collect()
    }

    /// Sets the entry for `var`.
    ///
    /// # Arguments
    /// * `var` - The variable the vector belongs to.
    /// * `grad` - The gradient vector.
    ///
    /// # Returns
    /// The previous entry, if any.
    ///
    /// # Panics
    /// If `grad` doesn't have the dimension of `var`.
    pub fn insert(&mut self, var: Variable, grad: Vec<f64>) -> Option<Vec<f64>> {
        assert_eq!(
            grad.len(),
            var.len(),
            "gradient length doesn't match variable {}",
            var.name()
        );

        self.0.insert(var, grad)
    }

    pub fn get(&self, var: &Variable) -> Option<&[f64]> {
        self.0.get(var).map(Vec::as_slice)
    }

    pub fn get_mut(&mut self, var: &Variable) -> Option<&mut [f64]> {
        self.0.get_mut(var).map(Vec::as_mut_slice)
    }

    pub fn remove(&mut self, var: &Variable) -> Option<Vec<f64>> {
        self.0.remove(var)
    }

    pub fn contains(&self, var: &Variable) -> bool {
        self.0.contains_key(var)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &[f64])> {
        self.0.iter().map(|(var, grad)| (var, grad.as_slice()))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&Variable, &mut [f64])> {
        self.0.iter_mut().map(|(var, grad)| (var, grad.as_mut_slice()))
    }

    /// Adds `other` into `self` elementwise.
    ///
    /// Entries of `other` for variables missing in `self` are copied over.
    pub fn add(&mut self, other: &Gradient) {
        for (var, grad) in &other.0 {
            match self.0.entry(var.clone()) {
                hash_map::Entry::Occupied(mut entry) => entry
                    .get_mut()
                    .iter_mut()
                    .zip(grad)
                    .for_each(|(acc, g)| *acc += g),
                hash_map::Entry::Vacant(entry) => {
                    entry.insert(grad.clone());
                }
            }
        }
    }

    /// Multiplies every entry by `scale`.
    pub fn scale(&mut self, scale: f64) {
        self.0
            .values_mut()
            .flat_map(|grad| grad.iter_mut())
            .for_each(|g| *g *= scale);
    }

    /// Applies `var += scale * grad` for every entry.
    ///
    /// # Arguments
    /// * `scale` - The factor, a descent step uses `-step_size`.
    pub fn add_to_vars(&self, scale: f64) {
        for (var, grad) in &self.0 {
            var.write()
                .iter_mut()
                .zip(grad)
                .for_each(|(x, g)| *x += scale * g);
        }
    }
}

impl FromIterator<(Variable, Vec<f64>)> for Gradient {
    fn from_iter<I: IntoIterator<Item = (Variable, Vec<f64>)>>(iter: I) -> Self {
        let mut grad = Self::new();
        for (var, vec) in iter {
            grad.insert(var, vec);
        }
        grad
    }
}
