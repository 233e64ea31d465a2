use rand::RngCore;

use super::ParamGen;

/// A parameter generator that always generates the same value.
pub struct ConstParamGen {
    value: f64,
}

impl ConstParamGen {
    /// Creates a new `ConstParamGen` parameter generator.
    ///
    /// # Arguments
    /// * `value` - The value to always generate.
    ///
    /// # Returns
    /// A new `ConstParamGen` instance.
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl ParamGen for ConstParamGen {
    fn sample(&mut self, _rng: &mut dyn RngCore, n: usize) -> Vec<f64> {
        vec![self.value; n]
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn empty() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(ConstParamGen::new(1.).sample(&mut rng, 0).is_empty());
    }

    #[test]
    fn exact() {
        const SIZE: usize = 10;

        let mut rng = StdRng::seed_from_u64(0);
        let sample = ConstParamGen::new(1.).sample(&mut rng, SIZE);

        assert_eq!(sample, vec![1.; SIZE]);
    }
}
