use std::{error::Error, fmt, io};

use crate::net::ClientErr;

/// The worker module's result type.
pub type Result<T> = std::result::Result<T, WorkerErr>;

/// Synchronization failures, the first one stops the training loop.
#[derive(Debug)]
pub enum WorkerErr {
    /// Pushing the accumulated gradient failed, the gradient is lost.
    WriteParams(ClientErr),
    /// Pulling the canonical parameters failed.
    ReadParams(ClientErr),
}

impl fmt::Display for WorkerErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerErr::WriteParams(e) => write!(f, "failed to write parameters: {e}"),
            WorkerErr::ReadParams(e) => write!(f, "failed to read parameters: {e}"),
        }
    }
}

impl Error for WorkerErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WorkerErr::WriteParams(e) | WorkerErr::ReadParams(e) => Some(e),
        }
    }
}

/// Boundary conversion for binaries / I/O APIs.
impl From<WorkerErr> for io::Error {
    fn from(value: WorkerErr) -> Self {
        io::Error::other(value)
    }
}
