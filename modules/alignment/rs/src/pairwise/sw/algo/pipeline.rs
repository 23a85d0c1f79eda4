use std::collections::VecDeque;

use tilesw_core_rs::num::Score;
use tilesw_core_rs::Scoring;

use super::{recurrence, Kernel, LocalMax};
use crate::pairwise::sw::matrix::TileMatrix;

/// Bounded first-in-first-out queue connecting two adjacent stages.
#[derive(Clone, Debug)]
struct Fifo<S> {
    queue: VecDeque<S>,
    depth: usize,
}

impl<S> Fifo<S> {
    fn new(depth: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(depth),
            depth,
        }
    }

    fn is_full(&self) -> bool {
        self.queue.len() >= self.depth
    }

    fn push(&mut self, value: S) {
        debug_assert!(!self.is_full());
        self.queue.push_back(value);
    }

    fn pop(&mut self) -> Option<S> {
        self.queue.pop_front()
    }
}

/// Processing element responsible for a single tile row.
#[derive(Clone, Debug)]
struct Stage<S: Score> {
    /// Next column to compute, 1-based
    col: usize,
    /// Own result at the previous column
    left: S,
    /// Value received from the previous stage at the previous column
    diag: S,
    best: Option<LocalMax<S>>,
}

/// Systolic kernel: one stage per tile row, each streaming across the columns.
///
/// Stage `i` receives `score[i-1][j]` from stage `i-1` (the source stage for `i = 1` streams the
/// inherited top row), combines it with its carried `left` and `diag` values, writes `score[i][j]`
/// and forwards it to stage `i+1`. The pipeline is clocked: on every tick each stage fires at most
/// once, when its input FIFO is non-empty and its output FIFO has room. Stages are evaluated from
/// the sink backwards, so a value advances by exactly one stage per tick and a `dim × dim` tile
/// drains in `2 * dim + 1` ticks.
#[derive(Clone, Debug)]
pub struct RowPipeline<S: Score> {
    fifo_depth: usize,
    fifos: Vec<Fifo<S>>,
    stages: Vec<Stage<S>>,
    ticks: usize,
}

impl<S: Score> RowPipeline<S> {
    pub fn new(fifo_depth: usize) -> Self {
        debug_assert!(fifo_depth > 0);
        Self {
            fifo_depth,
            fifos: Vec::new(),
            stages: Vec::new(),
            ticks: 0,
        }
    }

    /// Number of clock ticks used by the last `fill` call.
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    fn reset(&mut self, matrix: &TileMatrix<S>) {
        let dim = matrix.dim();

        self.fifos.clear();
        self.fifos.extend((0..=dim).map(|_| Fifo::new(self.fifo_depth)));

        self.stages.clear();
        self.stages.extend((1..=dim).map(|row| Stage {
            col: 1,
            left: matrix.at(row, 0),
            diag: matrix.at(row - 1, 0),
            best: None,
        }));
        self.ticks = 0;
    }
}

impl<S: Score> Kernel<S> for RowPipeline<S> {
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

        self.reset(matrix);

        let (mut streamed, mut drained) = (0, 0);
        while drained < dim {
            self.ticks += 1;

            // Sink
            if self.fifos[dim].pop().is_some() {
                drained += 1;
            }

            // Stages, last to first
            for row in (1..=dim).rev() {
                let stage = &mut self.stages[row - 1];
                let (upstream, downstream) = self.fifos.split_at_mut(row);
                let (input, output) = (&mut upstream[row - 1], &mut downstream[0]);

                if stage.col > dim || output.is_full() {
                    continue;
                }
                let Some(above) = input.pop() else {
                    continue;
                };

                let col = stage.col;
                let score = if row > rows || col > cols {
                    S::zero()
                } else {
                    recurrence(
                        stage.diag,
                        above,
                        stage.left,
                        seq1[col - 1],
                        seq2[row - 1],
                        scoring,
                    )
                };

                matrix.set(row, col, score);
                output.push(score);
                if score > S::zero() {
                    LocalMax::fold(&mut stage.best, score, row, col);
                }

                stage.left = score;
                stage.diag = above;
                stage.col += 1;
            }

            // Source: the inherited top row
            if streamed < dim && !self.fifos[0].is_full() {
                streamed += 1;
                self.fifos[0].push(matrix.at(0, streamed));
            }
        }

        // Rows are folded in order, so ties resolve exactly like a row-major scan
        let mut best = None;
        for stage in &self.stages {
            if let Some(local) = stage.best {
                LocalMax::fold(&mut best, local.score, local.i, local.j);
            }
        }
        best
    }
}
