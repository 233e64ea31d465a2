use crate::Gradient;

/// Post-processes gradients before they are applied, e.g. momentum or
/// preconditioning.
pub trait Transformer: Send {
    /// Transforms `grad` in place.
    ///
    /// # Arguments
    /// * `grad` - The gradient to transform, owned by the caller for the call.
    fn transform(&mut self, grad: &mut Gradient);
}

impl<T: Transformer + ?Sized> Transformer for Box<T> {
    fn transform(&mut self, grad: &mut Gradient) {
        (**self).transform(grad);
    }
}
