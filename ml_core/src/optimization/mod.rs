mod adagrad;
mod biaser;
mod capper;
mod clipper;
mod momentum;
mod transformer;

pub use adagrad::AdaGrad;
pub use biaser::Biaser;
pub use capper::GradientCapper;
pub use clipper::{GradientClipper, GradientNorm};
pub use momentum::Momentum;
pub use transformer::Transformer;
