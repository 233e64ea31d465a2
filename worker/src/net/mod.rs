mod client;
mod error;

pub use client::ParamClient;
pub use error::{ClientErr, Result};
