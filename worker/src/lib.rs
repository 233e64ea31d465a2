mod config;
mod error;
mod metrics;
pub mod net;
mod worker;

pub use config::WorkerConfig;
pub use error::{Result, WorkerErr};
pub use metrics::WorkerMetrics;
pub use net::{ClientErr, ParamClient};
pub use worker::{Observer, SyncObserver, Worker};
