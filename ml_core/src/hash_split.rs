use std::cmp::Ordering;

use sha2::{Digest, Sha256};

use crate::{SampleSet, SampleSetMut, Subset};

/// The amount of leading hash bytes compared against the split cutoff.
const CUTOFF_LEN: usize = 8;

/// A `SampleSet` able to hash each of its samples.
///
/// Hashes are expected to be uniformly distributed, `hash_vectors` is a
/// ready made choice for numeric samples.
pub trait SampleHasher: SampleSetMut {
    /// Returns the hash of the sample at `idx`.
    fn sample_hash(&self, idx: usize) -> Vec<u8>;
}

/// Hashes a list of vectors, typically the inputs and outputs of a sample.
///
/// Runs of equal values are collapsed before hashing and every vector is
/// terminated by a separator, so `[[1, 2]]` and `[[1], [2]]` differ.
///
/// # Arguments
/// * `vecs` - The vectors that make up a sample.
///
/// # Returns
/// A 32 byte SHA-256 digest.
pub fn hash_vectors<V: AsRef<[f64]>>(vecs: &[V]) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut last = 0.;
    let mut count = 0u8;

    for vec in vecs {
        for &x in vec.as_ref() {
            if x == last && count < u8::MAX {
                count += 1;
                continue;
            }

            if count > 0 {
                push_run(&mut buf, count, last);
            }
            last = x;
            count = 1;
        }

        if count > 0 {
            push_run(&mut buf, count, last);
            count = 0;
        }
        buf.push(0);
    }

    Sha256::digest(&buf).to_vec()
}

fn push_run(buf: &mut Vec<u8>, count: u8, value: f64) {
    buf.push(count);
    buf.extend_from_slice(&value.to_bits().to_be_bytes());
}

/// Deterministically partitions `set` by the hashes of its samples.
///
/// Samples whose hash falls below a cutoff derived from `left_ratio` are
/// moved to the front of `set`, so the same sample always lands on the same
/// side regardless of the set's order or size. A ratio of 0 or less leaves
/// everything on the right and a ratio of 1 or more everything on the left,
/// in both cases without reordering.
///
/// # Arguments
/// * `set` - The samples, reordered in place.
/// * `left_ratio` - The expected fraction of samples on the left.
///
/// # Returns
/// The left and right views, both over `set`.
pub fn hash_split<H>(set: &mut H, left_ratio: f64) -> (Subset<'_, H>, Subset<'_, H>)
where
    H: SampleHasher + ?Sized,
{
    let len = set.len();

    let split = if left_ratio <= 0. {
        0
    } else if left_ratio >= 1. {
        len
    } else {
        let cutoff = hash_cutoff(left_ratio);
        let mut split = 0;

        for i in 0..len {
            if compare_hashes(&set.sample_hash(i), &cutoff) == Ordering::Less {
                set.swap(split, i);
                split += 1;
            }
        }

        split
    };

    let set: &H = set;
    (set.subset(0..split), set.subset(split..len))
}

/// Writes `ratio` as a base 256 fraction.
fn hash_cutoff(mut ratio: f64) -> [u8; CUTOFF_LEN] {
    let mut cutoff = [0; CUTOFF_LEN];

    for byte in &mut cutoff {
        ratio *= 256.;
        let value = ratio.trunc();
        ratio -= value;
        *byte = value.min(255.) as u8;
    }

    cutoff
}

/// Compares two hashes as big-endian numbers, padding the shorter one with
/// trailing zeros.
fn compare_hashes(a: &[u8], b: &[u8]) -> Ordering {
    let len = a.len().max(b.len());

    (0..len)
        .map(|i| {
            let x = a.get(i).copied().unwrap_or(0);
            let y = b.get(i).copied().unwrap_or(0);
            x.cmp(&y)
        })
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}
