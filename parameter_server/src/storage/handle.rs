use std::sync::Arc;

use parking_lot::RwLock;

use super::{ParameterStore, Result};
use crate::optimization::Updater;

/// The shared, thread safe access point to a `ParameterStore`.
///
/// Reads run concurrently with each other, a write excludes every other
/// access while the gradient is applied. Decoding happens before the lock is
/// taken so the critical sections stay short.
pub struct StoreHandle<U: Updater>(Arc<RwLock<ParameterStore<U>>>);

impl<U: Updater> Clone for StoreHandle<U> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<U: Updater> StoreHandle<U> {
    /// Creates a new `StoreHandle`.
    ///
    /// # Arguments
    /// * `store` - The underlying parameter store.
    ///
    /// # Returns
    /// A new `StoreHandle` instance.
    pub fn new(store: ParameterStore<U>) -> Self {
        Self(Arc::new(RwLock::new(store)))
    }

    /// Encodes a consistent snapshot of the canonical parameters.
    pub fn read_params(&self) -> Vec<u8> {
        self.0.read().encode()
    }

    /// Decodes `payload` and applies it as a gradient.
    ///
    /// # Arguments
    /// * `payload` - The encoded gradient vectors.
    ///
    /// # Returns
    /// A `ServerErr` if the payload is malformed or its shape doesn't match.
    pub fn write_params(&self, payload: &[u8]) -> Result<()> {
        let vecs = comms::decode_vectors(payload)?;
        self.0.write().apply(vecs)
    }

    /// Copies the canonical parameter values.
    pub fn snapshot(&self) -> Vec<Vec<f64>> {
        self.0.read().snapshot()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use ml_core::Variable;

    use super::*;
    use crate::{optimization::GradientDescent, storage::ServerErr};

    fn create_test_handle(values: Vec<f64>, step_size: f64) -> StoreHandle<GradientDescent> {
        let params = vec![Variable::new("w", values)];
        StoreHandle::new(ParameterStore::new(params, GradientDescent::new(step_size)))
    }

    #[test]
    fn write_then_read() {
        let handle = create_test_handle(vec![1., 2.], 0.1);

        handle
            .write_params(&comms::encode_vectors(&[[1., 1.]]))
            .unwrap();

        let read = comms::decode_vectors(&handle.read_params()).unwrap();
        assert_eq!(read, [vec![0.9, 1.9]]);
    }

    #[test]
    fn zero_step_leaves_values() {
        let handle = create_test_handle(vec![3., -4.], 0.);

        handle
            .write_params(&comms::encode_vectors(&[[100., 100.]]))
            .unwrap();

        assert_eq!(handle.snapshot(), [vec![3., -4.]]);
    }

    #[test]
    fn truncated_payload_is_rejected() {
        let handle = create_test_handle(vec![1.], 1.);

        let err = handle.write_params(&[0, 0, 0, 1]).unwrap_err();
        assert!(matches!(err, ServerErr::Codec(_)));
        assert_eq!(handle.snapshot(), [vec![1.]]);
    }

    #[test]
    fn concurrent_writes_are_serialized() {
        const THREADS: usize = 8;
        const WRITES: usize = 100;

        let handle = create_test_handle(vec![0.; 4], 1.);
        let payload = comms::encode_vectors(&[[-1.; 4]]);

        thread::scope(|s| {
            for _ in 0..THREADS {
                s.spawn(|| {
                    for _ in 0..WRITES {
                        handle.write_params(&payload).unwrap();
                        let read = comms::decode_vectors(&handle.read_params()).unwrap();
                        assert!(read[0].windows(2).all(|w| w[0] == w[1]));
                    }
                });
            }
        });

        assert_eq!(handle.snapshot(), [vec![(THREADS * WRITES) as f64; 4]]);
    }
}
