use ml_core::Gradient;

use super::Updater;

/// Plain SGD, `param -= step_size * grad`.
#[derive(Debug)]
pub struct GradientDescent {
    step_size: f64,
}

impl GradientDescent {
    /// Creates a new `GradientDescent` updater.
    ///
    /// # Arguments
    /// * `step_size` - The small coefficient that modulates the amount of training per update.
    ///
    /// # Returns
    /// A new `GradientDescent` instance.
    pub fn new(step_size: f64) -> Self {
        Self { step_size }
    }
}

impl Updater for GradientDescent {
    fn update(&mut self, grad: &mut Gradient) {
        grad.add_to_vars(-self.step_size);
    }
}
