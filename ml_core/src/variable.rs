use std::{
    fmt,
    hash::{Hash, Hasher},
    ptr,
    sync::Arc,
};

use parking_lot::{
    MappedRwLockReadGuard, MappedRwLockWriteGuard, RwLock, RwLockReadGuard, RwLockWriteGuard,
};

use crate::MlError;

struct Inner {
    name: String,
    len: usize,
    values: RwLock<Box<[f64]>>,
}

/// A named vector of trainable parameters.
///
/// A `Variable` is a handle: clones refer to the same underlying storage and
/// compare equal, two variables built from the same values don't. Its length
/// is fixed at construction, only the values change.
#[derive(Clone)]
pub struct Variable(Arc<Inner>);

impl Variable {
    /// Creates a new `Variable`.
    ///
    /// # Arguments
    /// * `name` - A human readable name, only used for diagnostics.
    /// * `values` - The initial values.
    ///
    /// # Returns
    /// A new `Variable` instance.
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self(Arc::new(Inner {
            name: name.into(),
            len: values.len(),
            values: RwLock::new(values.into_boxed_slice()),
        }))
    }

    /// Creates a new `Variable` filled with zeros.
    ///
    /// # Arguments
    /// * `name` - A human readable name.
    /// * `len` - The dimension of the variable.
    pub fn zeros(name: impl Into<String>, len: usize) -> Self {
        Self::new(name, vec![0.; len])
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Returns the dimension of the variable.
    pub fn len(&self) -> usize {
        self.0.len
    }

    pub fn is_empty(&self) -> bool {
        self.0.len == 0
    }

    /// Locks the values for reading.
    pub fn read(&self) -> MappedRwLockReadGuard<'_, [f64]> {
        RwLockReadGuard::map(self.0.values.read(), |values| &**values)
    }

    /// Locks the values for writing.
    ///
    /// The guard only exposes a slice, so the dimension can't be altered.
    pub fn write(&self) -> MappedRwLockWriteGuard<'_, [f64]> {
        RwLockWriteGuard::map(self.0.values.write(), |values| &mut **values)
    }

    /// Copies the current values into a new vector.
    pub fn to_vec(&self) -> Vec<f64> {
        self.read().to_vec()
    }

    /// Overwrites the values with `src`.
    ///
    /// # Arguments
    /// * `src` - The new values, must have the variable's dimension.
    ///
    /// # Returns
    /// A `MlError::ShapeMismatch` if the lengths differ, in which case the
    /// values are left untouched.
    pub fn copy_from(&self, src: &[f64]) -> Result<(), MlError> {
        self.check_len(src.len())?;
        self.write().copy_from_slice(src);
        Ok(())
    }

    /// Performs `self += scale * delta` elementwise.
    ///
    /// # Arguments
    /// * `delta` - A vector of the variable's dimension.
    /// * `scale` - The factor applied to `delta`.
    ///
    /// # Returns
    /// A `MlError::ShapeMismatch` if the lengths differ.
    pub fn add_scaled(&self, delta: &[f64], scale: f64) -> Result<(), MlError> {
        self.check_len(delta.len())?;

        self.write()
            .iter_mut()
            .zip(delta)
            .for_each(|(x, d)| *x += scale * d);

        Ok(())
    }

    /// Checks that a buffer of length `got` fits this variable.
    pub fn check_len(&self, got: usize) -> Result<(), MlError> {
        if got != self.len() {
            return Err(MlError::ShapeMismatch {
                what: self.0.name.clone(),
                got,
                expected: self.len(),
            });
        }

        Ok(())
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Variable {}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        ptr::hash(Arc::as_ptr(&self.0), state);
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variable")
            .field("name", &self.0.name)
            .field("len", &self.0.len)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_not_value() {
        let a = Variable::new("a", vec![1., 2.]);
        let b = Variable::new("a", vec![1., 2.]);

        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn clones_share_storage() {
        let a = Variable::zeros("a", 3);
        let alias = a.clone();

        alias.write()[1] = 5.;
        assert_eq!(a.to_vec(), [0., 5., 0.]);
    }

    #[test]
    fn copy_from_rejects_wrong_length() {
        let a = Variable::new("a", vec![1., 2.]);

        let err = a.copy_from(&[3.]).unwrap_err();
        assert_eq!(
            err,
            MlError::ShapeMismatch {
                what: "a".into(),
                got: 1,
                expected: 2
            }
        );
        assert_eq!(a.to_vec(), [1., 2.]);
    }

    #[test]
    fn add_scaled() {
        let a = Variable::new("a", vec![1., 2.]);
        a.add_scaled(&[1., 1.], -0.5).unwrap();
        assert_eq!(a.to_vec(), [0.5, 1.5]);
    }
}
