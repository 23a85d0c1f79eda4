use derive_getters::Dissolve;

#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};

use crate::num::Score;

/// Linear scoring scheme: a constant reward/penalty for every aligned pair of symbols and a
/// constant penalty for every gap position.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Dissolve)]
pub struct Scoring<S: Score> {
    pub matched: S,
    pub mismatch: S,
    pub gap: S,
}

impl<S: Score> Scoring<S> {
    pub fn new(matched: S, mismatch: S, gap: S) -> Self {
        Self {
            matched,
            mismatch,
            gap,
        }
    }

    /// Score for a pair of aligned symbols.
    #[inline(always)]
    pub fn symbols(&self, s1: u8, s2: u8) -> S {
        if s1 == s2 { self.matched } else { self.mismatch }
    }

    /// Score for a single gap position.
    #[inline(always)]
    pub fn gap(&self) -> S {
        self.gap
    }
}

impl<S: Score> Default for Scoring<S> {
    /// Match = 3, mismatch = -3, gap = -2
    fn default() -> Self {
        let one = S::one();
        let two = one + one;
        let three = two + one;
        Scoring {
            matched: three,
            mismatch: S::zero() - three,
            gap: S::zero() - two,
        }
    }
}
