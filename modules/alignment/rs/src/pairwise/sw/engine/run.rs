use std::cell::RefCell;

use derive_getters::Getters;
use eyre::Result;
use rayon::prelude::*;
use thread_local::ThreadLocal;

use tilesw_core_rs::alignment::Alignment;
use tilesw_core_rs::num::Score;
use tilesw_core_rs::Sequence;

use super::config::Config;
use crate::pairwise::sw::algo::{Kernel, Processor};
use crate::pairwise::sw::boundary::BoundaryStore;
use crate::pairwise::sw::grid::Grid;
use crate::pairwise::sw::matrix::TileMatrix;
use crate::pairwise::sw::schedule::Schedule;
use crate::pairwise::sw::storage::{Best, SharedBest};
use crate::pairwise::sw::traceback::Backtracker;

/// Counters collected during a single alignment run.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Getters)]
pub struct RunStats {
    /// Tiles computed by the forward pass
    tiles: usize,
    /// Anti-diagonal batches executed, zero for sequential runs
    wavefronts: usize,
    /// Tiles recomputed while tracing the alignment back
    recomputed: usize,
}

/// Scratch state owned by a single thread.
struct Worker<S: Score> {
    kernel: Box<dyn Kernel<S>>,
    matrix: TileMatrix<S>,
}

impl<S: Score> Worker<S> {
    fn new(config: &Config<S>) -> Self {
        Self {
            kernel: config.strategy().kernel(),
            matrix: TileMatrix::new(*config.tile_dim()),
        }
    }
}

/// Everything that lives for exactly one `align` call: the padded sequences, the boundary store
/// and the per-thread scratch buffers. Nothing is carried over between runs.
pub struct Run<'a, S: Score> {
    config: &'a Config<S>,
    grid: Grid,
    seq1: Sequence,
    seq2: Sequence,
    store: BoundaryStore<S>,
    workers: ThreadLocal<RefCell<Worker<S>>>,
}

impl<'a, S: Score> Run<'a, S> {
    pub fn new(config: &'a Config<S>, seq1: Sequence, seq2: Sequence) -> Result<Self> {
        config.check_lengths(seq1.len(), seq2.len())?;
        let grid = Grid::new(*config.tile_dim(), seq1.len(), seq2.len())?;
        Ok(Self {
            config,
            grid,
            seq1,
            seq2,
            store: BoundaryStore::new(grid),
            workers: ThreadLocal::new(),
        })
    }

    fn worker(&self) -> &RefCell<Worker<S>> {
        self.workers.get_or(|| RefCell::new(Worker::new(self.config)))
    }

    fn processor(&self) -> Processor<'_, S> {
        Processor::new(&self.grid, &self.seq1, &self.seq2, self.config.scoring())
    }

    /// Row-major forward pass on the calling thread.
    fn sequential(&self) -> Best<S> {
        let processor = self.processor();
        let mut worker = self.worker().borrow_mut();
        let Worker { kernel, matrix } = &mut *worker;

        let mut best = Best::new();
        for tile in self.grid.row_major() {
            if let Some(seed) = processor.process(kernel.as_mut(), tile, &self.store, matrix) {
                best.update(seed);
            }
        }
        best
    }

    /// Forward pass over anti-diagonals. Each batch is a parallel iterator, so a batch starts only
    /// after every tile of the previous one stored its boundary.
    fn wavefront(&self) -> (Best<S>, usize) {
        let processor = self.processor();
        let best = SharedBest::new();

        let mut batches = 0;
        for batch in self.grid.wavefronts() {
            batch.par_iter().for_each(|tile| {
                let mut worker = self.worker().borrow_mut();
                let Worker { kernel, matrix } = &mut *worker;
                if let Some(seed) = processor.process(kernel.as_mut(), *tile, &self.store, matrix)
                {
                    best.update(seed);
                }
            });
            batches += 1;
        }
        (best.into_inner(), batches)
    }

    /// Forward pass followed by the traceback from the best cell.
    pub fn execute(self) -> Result<(Alignment<S>, RunStats)> {
        let (best, wavefronts) = match self.config.schedule() {
            Schedule::Sequential => (self.sequential(), 0),
            Schedule::Wavefront => self.wavefront(),
        };
        debug_assert!(self.store.is_complete());

        let mut stats = RunStats {
            tiles: self.grid.tiles(),
            wavefronts,
            recomputed: 0,
        };

        let Some(seed) = best.finalize() else {
            log::debug!(
                "No positive-scoring cell in {} tiles ({}x{} symbols)",
                stats.tiles,
                self.seq1.len(),
                self.seq2.len()
            );
            return Ok((Alignment::empty(), stats));
        };

        let processor = self.processor();
        let mut worker = self.worker().borrow_mut();
        let Worker { kernel, matrix } = &mut *worker;
        let traced =
            Backtracker::new(&processor, &self.store, kernel.as_mut(), matrix).trace(seed)?;
        stats.recomputed = traced.recomputed;

        log::debug!(
            "Aligned {}x{} symbols in {} tiles of {}: score {} at ({}, {}), {} tiles recomputed by the traceback",
            self.seq1.len(),
            self.seq2.len(),
            stats.tiles,
            self.grid.dim(),
            seed.score,
            seed.row,
            seed.col,
            stats.recomputed
        );
        Ok((traced.alignment, stats))
    }
}
