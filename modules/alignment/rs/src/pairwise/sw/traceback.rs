use eyre::Result;

use tilesw_core_rs::alignment::{Alignment, GAP};
use tilesw_core_rs::num::Score;

use super::algo::{Kernel, Processor};
use super::boundary::BoundaryStore;
use super::grid::TileCoord;
use super::matrix::TileMatrix;
use super::storage::AlignmentSeed;

/// Result of a traceback together with the number of tiles it had to recompute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Traceback<S: Score> {
    pub alignment: Alignment<S>,
    pub recomputed: usize,
}

/// Walks the optimal path backwards from `seed` without the full DP matrix.
///
/// Only one tile is resident at a time. When the path leaves it, the owning tile is recomputed
/// from the completed boundary store. Moves are tried in the order diagonal, left, up, and the
/// walk stops at the matrix edge or on the first zero cell.
pub struct Backtracker<'a, 'b, S: Score> {
    processor: &'a Processor<'a, S>,
    store: &'a BoundaryStore<S>,
    kernel: &'b mut dyn Kernel<S>,
    matrix: &'b mut TileMatrix<S>,
    resident: Option<TileCoord>,
    recomputed: usize,
}

impl<'a, 'b, S: Score> Backtracker<'a, 'b, S> {
    pub fn new(
        processor: &'a Processor<'a, S>,
        store: &'a BoundaryStore<S>,
        kernel: &'b mut dyn Kernel<S>,
        matrix: &'b mut TileMatrix<S>,
    ) -> Self {
        debug_assert!(store.is_complete());
        Self {
            processor,
            store,
            kernel,
            matrix,
            resident: None,
            recomputed: 0,
        }
    }

    /// Make `tile` the resident tile, recomputing it if needed.
    fn load(&mut self, tile: TileCoord) {
        if self.resident == Some(tile) {
            return;
        }
        self.processor
            .compute(&mut *self.kernel, tile, self.store, self.matrix);
        self.resident = Some(tile);
        self.recomputed += 1;
        log::debug!("Traceback reloaded tile {tile}");
    }

    /// Score of an absolute cell as seen from the resident tile (its row/column 0 included).
    fn score(&self, row: usize, col: usize) -> S {
        let tile = match self.resident {
            Some(tile) => tile,
            None => panic!("Traceback has no resident tile"),
        };
        let (i, j) = self.processor.grid().to_local(tile, row, col);
        self.matrix.at(i, j)
    }

    pub fn trace(mut self, seed: AlignmentSeed<S>) -> Result<Traceback<S>> {
        let processor = self.processor;
        let (seq1, seq2) = (processor.seq1(), processor.seq2());
        let (grid, scoring) = (*processor.grid(), *processor.scoring());
        debug_assert!(grid.in_bounds(seed.row, seed.col));

        let (mut aligned1, mut aligned2) = (Vec::new(), Vec::new());
        let (mut row, mut col) = (seed.row, seed.col);
        while row >= 1 && col >= 1 {
            self.load(grid.owner(row, col));

            let (s1, s2) = (seq1.at(col - 1), seq2.at(row - 1));
            let current = self.score(row, col);
            if current == self.score(row - 1, col - 1) + scoring.symbols(s1, s2) {
                aligned1.push(s1);
                aligned2.push(s2);
                row -= 1;
                col -= 1;
            } else if current == self.score(row, col - 1) + scoring.gap() {
                aligned1.push(s1);
                aligned2.push(GAP);
                col -= 1;
            } else {
                let up = self.score(row - 1, col);
                if current != up + scoring.gap() {
                    panic!(
                        "Traceback is stuck at ({row}, {col}): score {current} can't be derived \
                         from any neighbour"
                    );
                }
                aligned1.push(GAP);
                aligned2.push(s2);
                row -= 1;
            }

            if row < 1 || col < 1 || self.score(row, col) == S::zero() {
                break;
            }
        }

        aligned1.reverse();
        aligned2.reverse();
        let alignment =
            Alignment::new(seed.score, aligned1, aligned2, col..seed.col, row..seed.row)?;
        Ok(Traceback {
            alignment,
            recomputed: self.recomputed,
        })
    }
}
