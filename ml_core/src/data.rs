use std::ops::Range;

use rand::Rng;

/// An ordered collection of opaque training samples.
pub trait SampleSet {
    /// The sample type, its meaning is up to the `Gradienter`.
    type Sample;

    /// Returns the amount of samples in the set.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the sample at `idx`.
    ///
    /// # Panics
    /// If `idx` is out of bounds.
    fn sample(&self, idx: usize) -> &Self::Sample;

    /// Creates a read view over the contiguous range `range` of this set.
    ///
    /// # Panics
    /// If `range` is not within `0..self.len()`.
    fn subset(&self, range: Range<usize>) -> Subset<'_, Self> {
        Subset::new(self, range)
    }

    /// Iterates over the samples in order.
    fn iter(&self) -> impl Iterator<Item = &Self::Sample> {
        (0..self.len()).map(move |idx| self.sample(idx))
    }
}

/// A `SampleSet` whose order can be changed.
pub trait SampleSetMut: SampleSet {
    /// Swaps the samples at `i` and `j`.
    fn swap(&mut self, i: usize, j: usize);

    /// Creates a mutable view over the contiguous range `range` of this set.
    ///
    /// Swaps through the view are swaps in the parent.
    ///
    /// # Panics
    /// If `range` is not within `0..self.len()`.
    fn subset_mut(&mut self, range: Range<usize>) -> SubsetMut<'_, Self> {
        SubsetMut::new(self, range)
    }

    /// Shuffles the whole set in place (Fisher–Yates).
    fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let len = self.len();
        for i in 0..len {
            let j = rng.random_range(i..len);
            self.swap(i, j);
        }
    }
}

fn check_range(range: &Range<usize>, len: usize) {
    assert!(
        range.start <= range.end && range.end <= len,
        "subset {range:?} out of bounds for a set of {len} samples"
    );
}

/// A read view over a contiguous range of a `SampleSet`.
///
/// The view shares the parent's storage. It refers to positions, not to
/// samples: once the parent is reordered, a view rebuilt over the same range
/// sees whatever samples were moved into it.
#[derive(Debug)]
pub struct Subset<'a, S: ?Sized> {
    parent: &'a S,
    range: Range<usize>,
}

impl<'a, S: SampleSet + ?Sized> Subset<'a, S> {
    /// Creates a new `Subset`.
    ///
    /// # Arguments
    /// * `parent` - The set to view.
    /// * `range` - The positions of `parent` the view covers.
    ///
    /// # Panics
    /// If `range` is not within `0..parent.len()`.
    pub fn new(parent: &'a S, range: Range<usize>) -> Self {
        check_range(&range, parent.len());
        Self { parent, range }
    }

    /// Returns the positions this view covers in its parent.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }
}

impl<S: ?Sized> Clone for Subset<'_, S> {
    fn clone(&self) -> Self {
        Self {
            parent: self.parent,
            range: self.range.clone(),
        }
    }
}

impl<S: SampleSet + ?Sized> SampleSet for Subset<'_, S> {
    type Sample = S::Sample;

    fn len(&self) -> usize {
        self.range.len()
    }

    fn sample(&self, idx: usize) -> &Self::Sample {
        assert!(idx < self.len(), "sample {idx} out of bounds");
        self.parent.sample(self.range.start + idx)
    }
}

/// A mutable view over a contiguous range of a `SampleSet`.
#[derive(Debug)]
pub struct SubsetMut<'a, S: ?Sized> {
    parent: &'a mut S,
    range: Range<usize>,
}

impl<'a, S: SampleSet + ?Sized> SubsetMut<'a, S> {
    /// Creates a new `SubsetMut`.
    ///
    /// # Panics
    /// If `range` is not within `0..parent.len()`.
    pub fn new(parent: &'a mut S, range: Range<usize>) -> Self {
        check_range(&range, parent.len());
        Self { parent, range }
    }

    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }
}

impl<S: SampleSet + ?Sized> SampleSet for SubsetMut<'_, S> {
    type Sample = S::Sample;

    fn len(&self) -> usize {
        self.range.len()
    }

    fn sample(&self, idx: usize) -> &Self::Sample {
        assert!(idx < self.len(), "sample {idx} out of bounds");
        self.parent.sample(self.range.start + idx)
    }
}

impl<S: SampleSetMut + ?Sized> SampleSetMut for SubsetMut<'_, S> {
    fn swap(&mut self, i: usize, j: usize) {
        let len = self.len();
        assert!(i < len && j < len, "swap ({i}, {j}) out of bounds");

        let start = self.range.start;
        self.parent.swap(start + i, start + j);
    }
}

impl<T> SampleSet for [T] {
    type Sample = T;

    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn sample(&self, idx: usize) -> &T {
        &self[idx]
    }
}

impl<T> SampleSetMut for [T] {
    fn swap(&mut self, i: usize, j: usize) {
        <[T]>::swap(self, i, j);
    }
}

impl<T> SampleSet for Vec<T> {
    type Sample = T;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn sample(&self, idx: usize) -> &T {
        &self[idx]
    }
}

impl<T> SampleSetMut for Vec<T> {
    fn swap(&mut self, i: usize, j: usize) {
        <[T]>::swap(self, i, j);
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn subset_reads_parent_positions() {
        let set: Vec<u32> = (0..10).collect();
        let view = set.subset(3..6);

        assert_eq!(SampleSet::len(&view), 3);
        assert_eq!(view.iter().copied().collect::<Vec<_>>(), [3, 4, 5]);

        let nested = view.subset(1..3);
        assert_eq!(nested.iter().copied().collect::<Vec<_>>(), [4, 5]);
    }

    #[test]
    fn subset_mut_swaps_alias_parent() {
        let mut set: Vec<u32> = (0..5).collect();

        let mut view = set.subset_mut(1..4);
        view.swap(0, 2);

        assert_eq!(set, [0, 3, 2, 1, 4]);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut set: Vec<u32> = (0..100).collect();

        set.shuffle(&mut rng);
        assert_ne!(set, (0..100).collect::<Vec<_>>());

        set.sort_unstable();
        assert_eq!(set, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn shuffle_through_view_stays_inside() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut set: Vec<u32> = (0..10).collect();

        set.subset_mut(5..10).shuffle(&mut rng);

        assert_eq!(&set[..5], [0, 1, 2, 3, 4]);
        let mut tail = set[5..].to_vec();
        tail.sort_unstable();
        assert_eq!(tail, [5, 6, 7, 8, 9]);
    }

    #[test]
    #[should_panic]
    fn subset_out_of_bounds() {
        let set = vec![1, 2, 3];
        let _ = set.subset(2..4);
    }
}
