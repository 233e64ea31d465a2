use super::Transformer;
use crate::Gradient;

/// The norm a `GradientClipper` measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientNorm {
    L2,
    Inf,
}

/// Scales the whole gradient down so its norm doesn't exceed a threshold.
#[derive(Debug)]
pub struct GradientClipper {
    threshold: f64,
    norm: GradientNorm,
}

impl GradientClipper {
    /// Creates a new `GradientClipper`.
    ///
    /// # Arguments
    /// * `threshold` - The maximum norm.
    /// * `norm` - Which norm to measure.
    pub fn new(threshold: f64, norm: GradientNorm) -> Self {
        Self { threshold, norm }
    }

    fn norm(&self, grad: &Gradient) -> f64 {
        let components = grad.iter().flat_map(|(_, g)| g.iter());

        match self.norm {
            GradientNorm::L2 => components.map(|g| g * g).sum::<f64>().sqrt(),
            GradientNorm::Inf => components.fold(0., |max, g| g.abs().max(max)),
        }
    }
}

impl Transformer for GradientClipper {
    fn transform(&mut self, grad: &mut Gradient) {
        let norm = self.norm(grad);

        if norm > self.threshold {
            grad.scale(self.threshold / norm);
        }
    }
}
