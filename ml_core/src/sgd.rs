use std::num::NonZeroUsize;

use rand::Rng;

use crate::{Gradienter, SampleSetMut};

/// Runs plain minibatch SGD locally for a fixed amount of epochs.
///
/// Every epoch shuffles `samples` in place and walks it in contiguous batches
/// of at most `batch_size`, descending along each batch gradient right away.
///
/// # Arguments
/// * `gradienter` - Computes the batch gradients.
/// * `samples` - The training set, reordered by this call.
/// * `step_size` - The descent step.
/// * `epochs` - The amount of full sweeps over `samples`.
/// * `batch_size` - The maximum batch length.
/// * `rng` - The source of randomness for the shuffles.
pub fn sgd<S, G, R>(
    gradienter: &mut G,
    samples: &mut S,
    step_size: f64,
    epochs: usize,
    batch_size: NonZeroUsize,
    rng: &mut R,
) where
    S: SampleSetMut,
    G: Gradienter<S>,
    R: Rng + ?Sized,
{
    let batch_size = batch_size.get();

    for _ in 0..epochs {
        samples.shuffle(rng);

        let len = samples.len();
        for start in (0..len).step_by(batch_size) {
            let end = (start + batch_size).min(len);
            let batch = samples.subset(start..end);

            gradienter.gradient(&batch).add_to_vars(-step_size);
        }
    }
}
