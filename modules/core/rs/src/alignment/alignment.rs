use std::borrow::Cow;
use std::ops::Range;

use derive_getters::{Dissolve, Getters};
use eyre::{ensure, Result};
use itertools::Itertools;

use crate::num::Score;
use crate::scoring::Scoring;

use super::op::Op;
use super::GAP;

/// A local alignment between two sequences.
///
/// Both aligned strings have the same length, use [`GAP`] for gap positions and are stored in the
/// forward (start-to-end) orientation. `seq1` / `seq2` are the half-open, 0-based ranges of the
/// input sequences covered by the alignment.
#[derive(Clone, Eq, PartialEq, Debug, Getters, Dissolve)]
pub struct Alignment<S: Score> {
    score: S,
    aligned1: Vec<u8>,
    aligned2: Vec<u8>,
    seq1: Range<usize>,
    seq2: Range<usize>,
}

impl<S: Score> Alignment<S> {
    pub fn new(
        score: S,
        aligned1: Vec<u8>,
        aligned2: Vec<u8>,
        seq1: Range<usize>,
        seq2: Range<usize>,
    ) -> Result<Self> {
        ensure!(
            aligned1.len() == aligned2.len(),
            "Aligned sequences must have equal length, got {} and {}",
            aligned1.len(),
            aligned2.len()
        );
        ensure!(
            aligned1
                .iter()
                .zip(&aligned2)
                .all(|(a, b)| *a != GAP || *b != GAP),
            "Alignment must not contain gap-gap columns"
        );
        let residues1 = aligned1.iter().filter(|x| **x != GAP).count();
        let residues2 = aligned2.iter().filter(|x| **x != GAP).count();
        ensure!(
            residues1 == seq1.len() && residues2 == seq2.len(),
            "Aligned residues ({residues1}, {residues2}) don't match the aligned ranges ({seq1:?}, {seq2:?})"
        );

        Ok(Self {
            score,
            aligned1,
            aligned2,
            seq1,
            seq2,
        })
    }

    /// An empty alignment with zero score.
    /// Returned when the sequences share no positive-scoring pair.
    pub fn empty() -> Self {
        Self {
            score: S::zero(),
            aligned1: Vec::new(),
            aligned2: Vec::new(),
            seq1: 0..0,
            seq2: 0..0,
        }
    }

    /// Checks if the alignment is empty.
    pub fn is_empty(&self) -> bool {
        self.aligned1.is_empty()
    }

    /// Number of alignment columns.
    pub fn len(&self) -> usize {
        self.aligned1.len()
    }

    /// Aligned first sequence as text. Non UTF-8 symbols are replaced.
    pub fn aligned1_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.aligned1)
    }

    /// Aligned second sequence as text. Non UTF-8 symbols are replaced.
    pub fn aligned2_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.aligned2)
    }

    /// Alignment columns as operations.
    pub fn ops(&self) -> impl Iterator<Item = Op> + '_ {
        self.aligned1.iter().zip(&self.aligned2).map(|(a, b)| {
            // Guaranteed by the constructor
            Op::classify(*a, *b).unwrap_or_else(|| unreachable!("gap-gap column"))
        })
    }

    /// Returns the RLE representation of the alignment, e.g. `3=1X2v`.
    pub fn rle(&self) -> String {
        self.ops()
            .dedup_with_count()
            .map(|(len, op)| format!("{len}{}", op.symbol()))
            .join("")
    }

    /// Recompute the score by summing match/mismatch/gap contributions over all columns.
    /// No clamping is applied, so for a valid local alignment this equals `score()`.
    pub fn replay(&self, scoring: &Scoring<S>) -> S {
        self.aligned1
            .iter()
            .zip(&self.aligned2)
            .fold(S::zero(), |acc, (a, b)| {
                if *a == GAP || *b == GAP {
                    acc + scoring.gap()
                } else {
                    acc + scoring.symbols(*a, *b)
                }
            })
    }

    /// Three-line human readable representation: seq1, a match line, seq2.
    pub fn prettify(&self) -> String {
        let marks: String = self
            .ops()
            .map(|op| match op {
                Op::Match => '|',
                Op::Mismatch => '*',
                Op::GapFirst | Op::GapSecond => ' ',
            })
            .collect();
        format!("{}\n{}\n{}", self.aligned1_str(), marks, self.aligned2_str())
    }
}
