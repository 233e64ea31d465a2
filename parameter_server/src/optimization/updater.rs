use ml_core::Gradient;

/// Defines the strategy for updating the canonical parameters from a gradient.
///
/// `update` is never called more than once at a time on the same instance and
/// owns the parameters while it runs. It may modify the gradient freely.
pub trait Updater: Send {
    /// Applies `grad` to the variables it references.
    ///
    /// # Arguments
    /// * `grad` - A possibly partial gradient, variables without an entry
    ///   are left untouched.
    fn update(&mut self, grad: &mut Gradient);
}

impl<U: Updater + ?Sized> Updater for Box<U> {
    fn update(&mut self, grad: &mut Gradient) {
        (**self).update(grad);
    }
}
