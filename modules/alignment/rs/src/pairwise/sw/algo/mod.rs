pub use nested::NestedLoop;
pub use pipeline::RowPipeline;

use eyre::{ensure, Result};

use tilesw_core_rs::num::Score;
use tilesw_core_rs::{Scoring, Sequence};

use super::boundary::{BoundaryRecord, BoundaryStore};
use super::grid::{Grid, TileCoord};
use super::matrix::TileMatrix;
use super::storage::AlignmentSeed;

mod nested;
mod pipeline;

/// The local alignment recurrence for a single cell. Every kernel and the traceback go through it.
#[inline(always)]
pub fn recurrence<S: Score>(diag: S, up: S, left: S, s1: u8, s2: u8, scoring: &Scoring<S>) -> S {
    let diag = diag + scoring.symbols(s1, s2);
    let gap = (up + scoring.gap()).max(left + scoring.gap());
    S::zero().max(diag.max(gap))
}

/// Maximum of a tile interior in tile-local coordinates.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct LocalMax<S: Score> {
    pub score: S,
    pub i: usize,
    pub j: usize,
}

impl<S: Score> LocalMax<S> {
    /// Strict `>` fold: among equal values the first one offered is kept. Zero never qualifies.
    #[inline(always)]
    pub fn fold(current: &mut Option<Self>, score: S, i: usize, j: usize) {
        let better = match current {
            Some(x) => score > x.score,
            None => score > S::zero(),
        };
        if better {
            *current = Some(Self { score, i, j });
        }
    }
}

/// Computes the interior of a tile whose boundary (row 0 and column 0) is already loaded.
///
/// `seq1` and `seq2` are the `dim` padded symbols of the tile's columns and rows. Only the first
/// `extent.0` rows and `extent.1` columns lie inside the true sequences; the remaining interior
/// cells are set to zero and never reported. Returns the first maximal positive cell in row-major
/// order.
pub trait Kernel<S: Score>: Send {
    fn fill(
        &mut self,
        matrix: &mut TileMatrix<S>,
        seq1: &[u8],
        seq2: &[u8],
        extent: (usize, usize),
        scoring: &Scoring<S>,
    ) -> Option<LocalMax<S>>;
}

/// How a tile interior is evaluated. Both strategies produce identical matrices.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash)]
pub enum Strategy {
    /// Plain row-major double loop
    #[default]
    NestedLoop,
    /// One stage per tile row connected by bounded FIFOs of the given depth
    RowPipeline { fifo_depth: usize },
}

impl Strategy {
    pub const DEFAULT_FIFO_DEPTH: usize = 3;

    /// Row pipeline with the default FIFO depth.
    pub fn row_pipeline() -> Self {
        Strategy::RowPipeline {
            fifo_depth: Self::DEFAULT_FIFO_DEPTH,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Strategy::RowPipeline { fifo_depth } = self {
            ensure!(*fifo_depth > 0, "Row pipeline FIFO depth must be greater than zero");
        }
        Ok(())
    }

    pub fn kernel<S: Score>(&self) -> Box<dyn Kernel<S>> {
        match self {
            Strategy::NestedLoop => Box::new(NestedLoop),
            Strategy::RowPipeline { fifo_depth } => Box::new(RowPipeline::new(*fifo_depth)),
        }
    }
}

/// Tile processor: loads a tile's boundary from the store, runs a kernel over it and reports the
/// tile's best cell in absolute coordinates. Holds no state of its own, so the same tile can be
/// recomputed at any time after its predecessors were stored.
pub struct Processor<'a, S: Score> {
    grid: &'a Grid,
    seq1: &'a Sequence,
    seq2: &'a Sequence,
    scoring: &'a Scoring<S>,
}

impl<'a, S: Score> Processor<'a, S> {
    pub fn new(
        grid: &'a Grid,
        seq1: &'a Sequence,
        seq2: &'a Sequence,
        scoring: &'a Scoring<S>,
    ) -> Self {
        debug_assert_eq!(seq1.len(), *grid.len1());
        debug_assert_eq!(seq2.len(), *grid.len2());
        Self {
            grid,
            seq1,
            seq2,
            scoring,
        }
    }

    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    pub fn seq1(&self) -> &'a Sequence {
        self.seq1
    }

    pub fn seq2(&self) -> &'a Sequence {
        self.seq2
    }

    pub fn scoring(&self) -> &'a Scoring<S> {
        self.scoring
    }

    /// Recompute `tile` into `matrix` from the stored boundaries of its predecessors.
    pub fn compute(
        &self,
        kernel: &mut dyn Kernel<S>,
        tile: TileCoord,
        store: &BoundaryStore<S>,
        matrix: &mut TileMatrix<S>,
    ) -> Option<AlignmentSeed<S>> {
        if matrix.dim() != *self.grid.dim() {
            matrix.reset(*self.grid.dim());
        }
        matrix.load_boundary(store.top_input(tile), store.left_input(tile));

        let seq1 = self.seq1.window(self.grid.span(tile.col));
        let seq2 = self.seq2.window(self.grid.span(tile.row));
        let extent = self.grid.extent(tile);

        kernel
            .fill(matrix, seq1, seq2, extent, self.scoring)
            .map(|local| {
                let (row, col) = self.grid.to_absolute(tile, local.i, local.j);
                AlignmentSeed {
                    row,
                    col,
                    score: local.score,
                }
            })
    }

    /// Forward-pass step: compute `tile` and persist its boundary record.
    pub fn process(
        &self,
        kernel: &mut dyn Kernel<S>,
        tile: TileCoord,
        store: &BoundaryStore<S>,
        matrix: &mut TileMatrix<S>,
    ) -> Option<AlignmentSeed<S>> {
        let seed = self.compute(kernel, tile, store, matrix);
        store.store(tile, BoundaryRecord::from_tile(matrix));
        log::trace!("Tile {tile} done, local best: {seed:?}");
        seed
    }
}
