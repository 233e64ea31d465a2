use std::time::Duration;

#[derive(Debug, Default, Clone)]
pub struct WorkerMetrics {
    pub sync_time: Duration,

    pub steps: u64,
    pub samples: u64,
    pub epochs: u64,
    pub writes: u64,
    pub syncs: u64,
}

impl WorkerMetrics {
    #[inline]
    pub fn bump_step(&mut self) {
        self.steps += 1;
    }

    #[inline]
    pub fn add_samples(&mut self, n: usize) {
        self.samples += n as u64;
    }

    #[inline]
    pub fn bump_epoch(&mut self) {
        self.epochs += 1;
    }

    #[inline]
    pub fn bump_write(&mut self) {
        self.writes += 1;
    }

    #[inline]
    pub fn add_sync(&mut self, elapsed: Duration) {
        self.syncs += 1;
        self.sync_time += elapsed;
    }
}
