use crate::{Gradient, SampleSet, Subset};

/// Anything able to compute the total error gradient of a batch of samples.
///
/// Implementations usually own a reusable result buffer, so the returned
/// gradient borrows the gradienter and is only valid until the next call.
/// A gradienter is never invoked concurrently with itself.
pub trait Gradienter<S: SampleSet + ?Sized> {
    /// Computes the gradient for `batch` against the current variable values.
    ///
    /// # Arguments
    /// * `batch` - A view of the samples to differentiate.
    ///
    /// # Returns
    /// The gradient, covering some or all of the trained variables.
    fn gradient(&mut self, batch: &Subset<'_, S>) -> &Gradient;
}
