use ml_core::{Gradient, optimization::Transformer};

use super::Updater;

/// Runs the gradient through a `Transformer` (momentum, AdaGrad, ...) and
/// then descends along the result.
#[derive(Debug)]
pub struct TransformedDescent<T: Transformer> {
    step_size: f64,
    transformer: T,
}

impl<T: Transformer> TransformedDescent<T> {
    /// Creates a new `TransformedDescent` updater.
    ///
    /// # Arguments
    /// * `step_size` - The descent step applied to the transformed gradient.
    /// * `transformer` - The gradient post-processing strategy.
    ///
    /// # Returns
    /// A new `TransformedDescent` instance.
    pub fn new(step_size: f64, transformer: T) -> Self {
        Self {
            step_size,
            transformer,
        }
    }
}

impl<T: Transformer> Updater for TransformedDescent<T> {
    fn update(&mut self, grad: &mut Gradient) {
        self.transformer.transform(grad);
        grad.add_to_vars(-self.step_size);
    }
}
