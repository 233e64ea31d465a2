mod error;
mod handle;
mod store;

pub use error::{Result, ServerErr};
pub use handle::StoreHandle;
pub use store::ParameterStore;
