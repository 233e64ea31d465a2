use rand::RngCore;
use rand_distr::{Distribution, Normal, Uniform};

use super::{ParamGen, RandErr, Result};

/// A parameter generator that follows a certain probabilistic distribution.
#[derive(Debug)]
pub struct RandParamGen<D: Distribution<f64>> {
    distribution: D,
}

impl<D: Distribution<f64>> RandParamGen<D> {
    /// Creates a new `RandParamGen` parameter generator.
    ///
    /// # Arguments
    /// * `distribution` - The distribution to sample the random numbers from.
    pub fn new(distribution: D) -> Self {
        Self { distribution }
    }
}

impl RandParamGen<Uniform<f64>> {
    /// Creates a new `RandParamGen` parameter generator with a uniform distribution.
    ///
    /// # Arguments
    /// * `low` - The inclusive lower limit.
    /// * `high` - The exclusive upper limit.
    ///
    /// # Returns
    /// An error if the range is invalid (low >= high).
    pub fn uniform(low: f64, high: f64) -> Result<Self> {
        Ok(Self::new(Uniform::new(low, high)?))
    }
}

impl RandParamGen<Normal<f64>> {
    /// Creates a new `RandParamGen` parameter generator with a normal distribution.
    ///
    /// # Arguments
    /// * `mean` - The mean of the distribution.
    /// * `std_dev` - The standard deviation of the distribution.
    ///
    /// # Returns
    /// An error if `std_dev` is negative or not finite (Nan or infinite).
    pub fn normal(mean: f64, std_dev: f64) -> Result<Self> {
        if !(std_dev >= 0.) {
            return Err(RandErr::new(format!(
                "standard deviation must be non negative, got {std_dev}"
            )));
        }

        Ok(Self::new(Normal::new(mean, std_dev)?))
    }
}

impl<D: Distribution<f64>> ParamGen for RandParamGen<D> {
    fn sample(&mut self, rng: &mut dyn RngCore, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.distribution.sample(rng)).collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn uniform_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut param_gen = RandParamGen::uniform(-0.5, 0.5).unwrap();

        let sample = param_gen.sample(&mut rng, 1000);

        assert_eq!(sample.len(), 1000);
        assert!(sample.iter().all(|x| (-0.5..0.5).contains(x)));
    }

    #[test]
    fn invalid_uniform_range() {
        assert!(RandParamGen::uniform(1., -1.).is_err());
    }

    #[test]
    fn invalid_normal_std_dev() {
        assert!(RandParamGen::normal(0., f64::NAN).is_err());
        assert!(RandParamGen::normal(0., f64::INFINITY).is_err());
    }

    #[test]
    fn negative_normal_std_dev() {
        let err = RandParamGen::normal(0., -1.).unwrap_err();
        assert!(err.to_string().contains("non negative"), "{err}");
    }

    #[test]
    fn zero_normal_std_dev_is_constant() {
        let mut param_gen = RandParamGen::normal(3., 0.).unwrap();
        let sample = param_gen.sample(&mut StdRng::seed_from_u64(1), 4);

        assert_eq!(sample, [3.; 4]);
    }

    #[test]
    fn seeded_generation_is_repeatable() {
        let mut param_gen = RandParamGen::normal(0., 1.).unwrap();

        let a = param_gen.sample(&mut StdRng::seed_from_u64(5), 8);
        let b = param_gen.sample(&mut StdRng::seed_from_u64(5), 8);

        assert_eq!(a, b);
    }
}
