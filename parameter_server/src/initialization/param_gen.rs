use rand::RngCore;

/// Generates the initial values of a variable.
pub trait ParamGen {
    /// Draws `n` values.
    ///
    /// # Arguments
    /// * `rng` - The random source shared by every generator of a server.
    /// * `n` - The amount of values to generate.
    fn sample(&mut self, rng: &mut dyn RngCore, n: usize) -> Vec<f64>;
}
