use super::Transformer;
use crate::Gradient;

/// Clamps every gradient component to `[-cap, cap]`.
#[derive(Debug)]
pub struct GradientCapper {
    cap: f64,
}

impl GradientCapper {
    pub fn new(cap: f64) -> Self {
        Self { cap }
    }
}

impl Transformer for GradientCapper {
    fn transform(&mut self, grad: &mut Gradient) {
        let cap = self.cap;

        grad.iter_mut()
            .flat_map(|(_, g)| g.iter_mut())
            .for_each(|g| *g = g.clamp(-cap, cap));
    }
}
