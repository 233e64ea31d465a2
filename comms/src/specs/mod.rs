mod server;

pub use server::{DistributionSpec, OptimizerSpec, ParamGenSpec, ServerSpec, VariableSpec};
