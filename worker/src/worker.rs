use std::{ops::Range, time::Instant};

use log::{debug, info, warn};
use ml_core::{Gradient, Gradienter, SampleSet, SampleSetMut, Subset, Variable};
use rand::{SeedableRng, rngs::StdRng};
use tokio_util::sync::CancellationToken;

use crate::{Result, WorkerConfig, WorkerErr, WorkerMetrics, net::ParamClient};

/// A per minibatch callback, it receives the upcoming minibatch and the
/// previous one, which is `None` on the very first call.
///
/// The previous minibatch is a view of the range it covered over the current
/// order of the sample set, which may have been reshuffled since.
pub type Observer<'a, S> = dyn FnMut(&Subset<'_, S>, Option<&Subset<'_, S>>) + Send + 'a;

/// A callback run after every successful synchronization, typically to log
/// the training progress.
pub type SyncObserver<'a> = dyn FnMut(&WorkerMetrics) + Send + 'a;

/// A training worker, it computes gradients against a local replica of the
/// parameters and periodically synchronizes that replica with the server.
pub struct Worker<S, G> {
    config: WorkerConfig,
    gradienter: G,
    client: ParamClient,
    vars: Vec<Variable>,
    samples: S,
    minibatch: Range<usize>,
    cursor: usize,
    accumulated: Option<Gradient>,
    rng: StdRng,
    metrics: WorkerMetrics,
}

impl<S, G> Worker<S, G>
where
    S: SampleSetMut,
    G: Gradienter<S>,
{
    /// Creates a new `Worker` and selects its first minibatch.
    ///
    /// # Arguments
    /// * `config` - The batch size and the synchronization interval.
    /// * `gradienter` - Computes gradients over `vars`.
    /// * `client` - The connection to the parameter server.
    /// * `vars` - The local variables, in the server's order.
    /// * `samples` - The training set, reshuffled at every epoch.
    ///
    /// # Returns
    /// A new `Worker` instance.
    pub fn new(
        config: WorkerConfig,
        gradienter: G,
        client: ParamClient,
        vars: Vec<Variable>,
        samples: S,
    ) -> Self {
        Self::with_rng(
            config,
            gradienter,
            client,
            vars,
            samples,
            StdRng::from_os_rng(),
        )
    }

    /// Creates a new `Worker` that shuffles with `rng`.
    ///
    /// Same as [`Worker::new`] but with a caller provided source of
    /// randomness, so the visiting order can be reproduced.
    pub fn with_rng(
        config: WorkerConfig,
        gradienter: G,
        client: ParamClient,
        vars: Vec<Variable>,
        samples: S,
        rng: StdRng,
    ) -> Self {
        let mut worker = Self {
            config,
            gradienter,
            client,
            vars,
            samples,
            minibatch: 0..0,
            cursor: 0,
            accumulated: None,
            rng,
            metrics: WorkerMetrics::default(),
        };

        worker.start_epoch();
        worker
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    /// Returns the local variables.
    pub fn vars(&self) -> &[Variable] {
        &self.vars
    }

    pub fn metrics(&self) -> &WorkerMetrics {
        &self.metrics
    }

    /// Returns the gradient accumulated since the last synchronization.
    pub fn accumulated(&self) -> Option<&Gradient> {
        self.accumulated.as_ref()
    }

    /// Returns a read view of the current minibatch.
    pub fn batch(&self) -> Subset<'_, S> {
        self.samples.subset(self.minibatch.clone())
    }

    /// Moves on to the next minibatch, reshuffling the whole set when the
    /// current epoch is over.
    fn cycle_minibatch(&mut self) {
        let prev = self.minibatch.len();

        if self.cursor + prev >= self.samples.len() {
            self.start_epoch();
            return;
        }

        self.cursor += prev;
        self.select_minibatch();
    }

    fn start_epoch(&mut self) {
        self.cursor = 0;
        self.samples.shuffle(&mut self.rng);
        self.metrics.bump_epoch();
        self.select_minibatch();
    }

    fn select_minibatch(&mut self) {
        let end = (self.cursor + self.config.batch_size().get()).min(self.samples.len());
        self.minibatch = self.cursor..end;
    }

    /// Computes the gradient of the current minibatch, adds it to the
    /// accumulated gradient and cycles to the next minibatch.
    pub fn step(&mut self) {
        let batch = self.samples.subset(self.minibatch.clone());
        let len = batch.len();
        let grad = self.gradienter.gradient(&batch);

        match &mut self.accumulated {
            Some(acc) => acc.add(grad),
            None => self.accumulated = Some(grad.clone()),
        }

        self.metrics.bump_step();
        self.metrics.add_samples(len);
        self.cycle_minibatch();
    }

    /// Pushes the accumulated gradient, if any, and pulls the canonical
    /// parameters into the local variables.
    ///
    /// The accumulated gradient is consumed as soon as the write is issued,
    /// a failed write is never retried since the server may have applied it.
    ///
    /// # Returns
    /// The first error of the round trips.
    pub async fn sync(&mut self) -> Result<()> {
        let start = Instant::now();

        if let Some(grad) = self.accumulated.take() {
            self.client
                .write_params(&grad, &self.vars)
                .await
                .map_err(WorkerErr::WriteParams)?;

            self.metrics.bump_write();
        }

        self.client
            .read_params(&self.vars)
            .await
            .map_err(WorkerErr::ReadParams)?;

        self.metrics.add_sync(start.elapsed());
        debug!(
            steps = self.metrics.steps,
            syncs = self.metrics.syncs;
            "synchronized parameters"
        );

        Ok(())
    }

    /// Trains until `cancel` fires or a synchronization fails.
    ///
    /// Every iteration calls `observer` with the upcoming and the previous
    /// minibatch, checks `cancel`, runs a `step` and every sync interval
    /// steps a `sync`, followed by `on_sync`. A sync in flight is abandoned
    /// when `cancel` fires.
    ///
    /// # Arguments
    /// * `observer` - An optional per minibatch callback.
    /// * `on_sync` - An optional per synchronization callback.
    /// * `cancel` - Stops the loop.
    ///
    /// # Returns
    /// `Ok(())` once cancelled, or the first synchronization error.
    pub async fn run(
        &mut self,
        mut observer: Option<&mut Observer<'_, S>>,
        mut on_sync: Option<&mut SyncObserver<'_>>,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let sync_interval = self.config.sync_interval().get();
        let mut last: Option<Range<usize>> = None;
        let mut steps = 0usize;

        loop {
            if let Some(observer) = observer.as_deref_mut() {
                let next = self.batch();
                let prev = last.clone().map(|range| self.samples.subset(range));
                observer(&next, prev.as_ref());
            }

            if cancel.is_cancelled() {
                info!(steps = self.metrics.steps; "training cancelled");
                return Ok(());
            }

            last = Some(self.minibatch.clone());
            self.step();
            steps += 1;

            if steps % sync_interval != 0 {
                continue;
            }

            tokio::select! {
                res = self.sync() => {
                    if let Err(e) = res {
                        warn!("stopping training: {e}");
                        return Err(e);
                    }
                }
                _ = cancel.cancelled() => {
                    info!(steps = self.metrics.steps; "training cancelled during sync");
                    return Ok(());
                }
            }

            if let Some(on_sync) = on_sync.as_deref_mut() {
                on_sync(&self.metrics);
            }
        }
    }
}
