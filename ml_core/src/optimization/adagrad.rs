use super::Transformer;
use crate::Gradient;

/// AdaGrad: divides every component by the root of its squared history.
#[derive(Debug)]
pub struct AdaGrad {
    damping: f64,
    squared_history: Gradient,
}

impl AdaGrad {
    /// Creates a new `AdaGrad` transformer.
    ///
    /// # Arguments
    /// * `damping` - Added to the denominator to avoid dividing by zero.
    ///
    /// # Returns
    /// A new `AdaGrad` instance.
    pub fn new(damping: f64) -> Self {
        Self {
            damping,
            squared_history: Gradient::new(),
        }
    }
}

impl Transformer for AdaGrad {
    fn transform(&mut self, grad: &mut Gradient) {
        let damping = self.damping;

        for (var, g) in grad.iter_mut() {
            if !self.squared_history.contains(var) {
                self.squared_history.insert(var.clone(), vec![0.; g.len()]);
            }

            let Some(history) = self.squared_history.get_mut(var) else {
                continue;
            };

            g.iter_mut().zip(history.iter_mut()).for_each(|(g, h)| {
                *h += *g * *g;
                *g /= h.sqrt() + damping;
            });
        }
    }
}
