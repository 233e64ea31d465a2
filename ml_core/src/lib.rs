//! The numeric building blocks shared by the parameter server and its
//! workers: parameter variables, gradients, sample sets and the gradient
//! post-processing strategies.

mod data;
mod error;
mod gradient;
mod gradienter;
mod hash_split;
pub mod optimization;
mod sgd;
mod variable;

pub use data::{SampleSet, SampleSetMut, Subset, SubsetMut};
pub use error::MlError;
pub use gradient::Gradient;
pub use gradienter::Gradienter;
pub use hash_split::{SampleHasher, hash_split, hash_vectors};
pub use sgd::sgd;
pub use variable::Variable;
