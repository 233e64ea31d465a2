mod config;
pub mod initialization;
pub mod optimization;
pub mod service;
pub mod storage;

pub use config::ServerConfig;
pub use service::{ParameterServer, ServerBuilder};
pub use storage::{ParameterStore, ServerErr, StoreHandle};
