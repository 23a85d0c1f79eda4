use std::sync::{Mutex, PoisonError};

use tilesw_core_rs::num::Score;

use super::AlignmentSeed;

/// Tracker of the single best-scoring cell of the whole conceptual matrix.
///
/// A candidate replaces the current best when it scores strictly higher, or when it scores the
/// same and lies earlier in absolute row-major order. Within a tile this is exactly the strict `>`
/// rule applied in scan order; across tiles it makes the winner independent of both the tile
/// dimension and the order in which tiles report their candidates.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Best<S: Score> {
    best: AlignmentSeed<S>,
}

impl<S: Score> Best<S> {
    pub fn new() -> Self {
        Self {
            best: AlignmentSeed {
                row: 0,
                col: 0,
                score: S::zero(),
            },
        }
    }

    /// Whether `candidate` should replace `current`.
    #[inline(always)]
    pub fn improves(current: &AlignmentSeed<S>, candidate: &AlignmentSeed<S>) -> bool {
        candidate.score > current.score
            || (candidate.score == current.score
                && candidate.score > S::zero()
                && (candidate.row, candidate.col) < (current.row, current.col))
    }

    /// Fold a candidate into the tracker. Returns true if the best value changed.
    #[inline(always)]
    pub fn update(&mut self, candidate: AlignmentSeed<S>) -> bool {
        if Self::improves(&self.best, &candidate) {
            self.best = candidate;
            true
        } else {
            false
        }
    }

    pub fn get(&self) -> &AlignmentSeed<S> {
        &self.best
    }

    /// The best seed, or None if no cell scored above zero.
    pub fn finalize(self) -> Option<AlignmentSeed<S>> {
        if self.best.score > S::zero() {
            Some(self.best)
        } else {
            None
        }
    }
}

impl<S: Score> Default for Best<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// `Best` behind a critical section, shared by tiles running concurrently in a wavefront.
#[derive(Debug, Default)]
pub struct SharedBest<S: Score> {
    inner: Mutex<Best<S>>,
}

impl<S: Score> SharedBest<S> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Best::new()),
        }
    }

    pub fn update(&self, candidate: AlignmentSeed<S>) -> bool {
        // The tracker holds plain data, a poisoned lock can't leave it half-updated
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .update(candidate)
    }

    pub fn into_inner(self) -> Best<S> {
        self.inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(score: i32, row: usize, col: usize) -> AlignmentSeed<i32> {
        AlignmentSeed { row, col, score }
    }

    #[test]
    fn test_strict_improvement() {
        let mut best = Best::new();
        assert!(!best.update(seed(0, 1, 1)));
        assert!(best.update(seed(3, 2, 5)));
        assert!(!best.update(seed(2, 1, 1)));
        assert!(best.update(seed(4, 9, 9)));
        assert_eq!(best.finalize(), Some(seed(4, 9, 9)));
    }

    #[test]
    fn test_ties_prefer_row_major_order() {
        let mut best = Best::new();
        assert!(best.update(seed(5, 3, 7)));
        // Later in row-major order: ignored
        assert!(!best.update(seed(5, 3, 8)));
        assert!(!best.update(seed(5, 4, 1)));
        // Earlier in row-major order: replaces
        assert!(best.update(seed(5, 3, 2)));
        assert!(best.update(seed(5, 1, 9)));
        assert_eq!(best.get(), &seed(5, 1, 9));
    }

    #[test]
    fn test_empty() {
        assert_eq!(Best::<i32>::new().finalize(), None);
    }

    #[test]
    fn test_shared_is_order_independent() {
        let candidates = [seed(5, 4, 4), seed(7, 6, 2), seed(7, 2, 6), seed(1, 1, 1)];

        let forward = SharedBest::new();
        candidates.iter().for_each(|x| {
            forward.update(*x);
        });
        let backward = SharedBest::new();
        candidates.iter().rev().for_each(|x| {
            backward.update(*x);
        });

        assert_eq!(forward.into_inner(), backward.into_inner());
    }
}
