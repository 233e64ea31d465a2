use std::num::NonZeroUsize;

/// Immutable training bounds for a worker instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerConfig {
    batch_size: NonZeroUsize,
    sync_interval: NonZeroUsize,
}

impl WorkerConfig {
    /// Creates a new worker configuration.
    ///
    /// # Args
    /// * `batch_size` - The maximum amount of samples per minibatch.
    /// * `sync_interval` - The amount of steps between synchronizations.
    ///
    /// # Returns
    /// A `WorkerConfig` instance.
    pub fn new(batch_size: NonZeroUsize, sync_interval: NonZeroUsize) -> Self {
        Self {
            batch_size,
            sync_interval,
        }
    }

    /// Returns the maximum amount of samples per minibatch.
    pub fn batch_size(&self) -> NonZeroUsize {
        self.batch_size
    }

    /// Returns the amount of steps between synchronizations.
    pub fn sync_interval(&self) -> NonZeroUsize {
        self.sync_interval
    }
}
