mod gradient_descent;
mod transformed;
mod updater;

pub use gradient_descent::GradientDescent;
pub use transformed::TransformedDescent;
pub use updater::Updater;
