use tilesw_core_rs::num::Score;
use tilesw_core_rs::Scoring;

use super::{recurrence, Kernel, LocalMax};
use crate::pairwise::sw::matrix::TileMatrix;

/// Reference kernel: evaluates the tile interior cell by cell in row-major order.
#[derive(Copy, Clone, Debug, Default)]
pub struct NestedLoop;

impl<S: Score> Kernel<S> for NestedLoop {
    fn fill(
        &mut self,
        matrix: &mut TileMatrix<S>,
        seq1: &[u8],
        seq2: &[u8],
        extent: (usize, usize),
        scoring: &Scoring<S>,
    ) -> Option<LocalMax<S>> {
        let dim = matrix.dim();
        let (rows, cols) = extent;
        debug_assert!(seq1.len() == dim && seq2.len() == dim);

        let mut best = None;
        for i in 1..=dim {
            for j in 1..=dim {
                if i > rows || j > cols {
                    matrix.set(i, j, S::zero());
                    continue;
                }

                let score = recurrence(
                    matrix.at(i - 1, j - 1),
                    matrix.at(i - 1, j),
                    matrix.at(i, j - 1),
                    seq1[j - 1],
                    seq2[i - 1],
                    scoring,
                );
                matrix.set(i, j, score);
                LocalMax::fold(&mut best, score, i, j);
            }
        }
        best
    }
}
