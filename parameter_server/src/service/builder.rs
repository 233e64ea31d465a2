use comms::specs::{DistributionSpec, OptimizerSpec, ParamGenSpec, ServerSpec};
use ml_core::{
    Variable,
    optimization::{AdaGrad, Momentum},
};
use rand::{SeedableRng, rngs::StdRng};

use super::ParameterServer;
use crate::{
    initialization::{ConstParamGen, ParamGen, RandParamGen, Result},
    optimization::{GradientDescent, TransformedDescent, Updater},
    storage::ParameterStore,
};

/// Builds `ParameterServer`s given a specification.
#[derive(Debug, Default)]
pub struct ServerBuilder;

impl ServerBuilder {
    /// Creates a new `ServerBuilder`.
    ///
    /// # Returns
    /// A new `ServerBuilder` instance.
    pub fn new() -> Self {
        Self
    }

    /// Builds a new `ParameterServer` following a spec.
    ///
    /// # Arguments
    /// * `spec` - The specification of the parameter server.
    ///
    /// # Returns
    /// A new server or a `RandErr` if the specification has
    /// invalid `RandParamGen` construction values.
    pub fn build(&self, spec: &ServerSpec) -> Result<ParameterServer<Box<dyn Updater>>> {
        let params = self.resolve_params(spec)?;
        let updater = self.resolve_updater(spec.optimizer);

        Ok(ParameterServer::new(ParameterStore::new(params, updater)))
    }

    /// Generates a random number generator given (or not) a seed.
    ///
    /// # Arguments
    /// * `seed` - An optional seed for the rng.
    fn generate_rng(&self, seed: Option<u64>) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// Creates the canonical variables in the order they are listed.
    fn resolve_params(&self, spec: &ServerSpec) -> Result<Vec<Variable>> {
        let mut rng = self.generate_rng(spec.seed);

        spec.variables
            .iter()
            .map(|var| {
                let values = self.resolve_param_gen(&var.init, &mut rng)?;
                Ok(Variable::new(&var.name, values))
            })
            .collect()
    }

    /// Generates the initial values of a single variable.
    ///
    /// # Arguments
    /// * `spec` - The initialization spec of the variable.
    /// * `rng` - The rng shared by all the variables.
    fn resolve_param_gen(&self, spec: &ParamGenSpec, rng: &mut StdRng) -> Result<Vec<f64>> {
        let values = match *spec {
            ParamGenSpec::Const { value, len } => ConstParamGen::new(value).sample(rng, len),
            ParamGenSpec::Rand {
                distribution,
                len,
            } => match distribution {
                DistributionSpec::Uniform { low, high } => {
                    RandParamGen::uniform(low, high)?.sample(rng, len)
                }
                DistributionSpec::Normal { mean, std_dev } => {
                    RandParamGen::normal(mean, std_dev)?.sample(rng, len)
                }
            },
            ParamGenSpec::Values { ref values } => values.clone(),
        };

        Ok(values)
    }

    /// Resolves the `Updater` for this server.
    fn resolve_updater(&self, spec: OptimizerSpec) -> Box<dyn Updater> {
        match spec {
            OptimizerSpec::GradientDescent { step_size } => {
                Box::new(GradientDescent::new(step_size))
            }
            OptimizerSpec::Momentum {
                step_size,
                momentum,
            } => Box::new(TransformedDescent::new(step_size, Momentum::new(momentum))),
            OptimizerSpec::AdaGrad { step_size, damping } => {
                Box::new(TransformedDescent::new(step_size, AdaGrad::new(damping)))
            }
        }
    }
}
