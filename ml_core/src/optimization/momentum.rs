use super::Transformer;
use crate::Gradient;

/// Classical momentum: `v = momentum * v + g` and the gradient is replaced
/// by `v`.
#[derive(Debug)]
pub struct Momentum {
    momentum: f64,
    velocity: Option<Gradient>,
}

impl Momentum {
    /// Creates a new `Momentum` transformer.
    ///
    /// # Arguments
    /// * `momentum` - The decay applied to the velocity on every call.
    ///
    /// # Returns
    /// A new `Momentum` instance.
    pub fn new(momentum: f64) -> Self {
        Self {
            momentum,
            velocity: None,
        }
    }
}

impl Transformer for Momentum {
    fn transform(&mut self, grad: &mut Gradient) {
        match &mut self.velocity {
            Some(velocity) => {
                velocity.scale(self.momentum);
                velocity.add(grad);
            }
            None => self.velocity = Some(grad.clone()),
        }

        let Some(velocity) = &self.velocity else {
            return;
        };

        for (var, v) in velocity.iter() {
            if let Some(g) = grad.get_mut(var) {
                g.copy_from_slice(v);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Variable;

    #[test]
    fn accumulates_velocity() {
        let a = Variable::zeros("a", 1);
        let mut momentum = Momentum::new(0.5);

        let mut grad: Gradient = [(a.clone(), vec![2.])].into_iter().collect();
        momentum.transform(&mut grad);
        assert_eq!(grad.get(&a), Some(&[2.][..]));

        let mut grad: Gradient = [(a.clone(), vec![1.])].into_iter().collect();
        momentum.transform(&mut grad);
        assert_eq!(grad.get(&a), Some(&[2.][..]));
    }
}
