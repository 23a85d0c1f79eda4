pub use builder::EngineBuilder;
pub use config::Config;
pub use run::RunStats;

use eyre::Result;
use rayon::ThreadPool;

use tilesw_core_rs::alignment::Alignment;
use tilesw_core_rs::num::Score;
use tilesw_core_rs::Sequence;

use run::Run;

mod builder;
mod config;
mod run;

/// Tiled Smith-Waterman aligner.
///
/// The engine only holds the configuration and, optionally, a thread pool for wavefront runs.
/// Every call creates a fresh per-run context, so a single engine can be reused freely.
pub struct Engine<S: Score> {
    config: Config<S>,
    thread_pool: Option<ThreadPool>,
}

impl<S: Score> Engine<S> {
    pub(crate) fn new(config: Config<S>, thread_pool: Option<ThreadPool>) -> Self {
        Self {
            config,
            thread_pool,
        }
    }

    pub fn builder() -> EngineBuilder<S> {
        EngineBuilder::default()
    }

    pub fn config(&self) -> &Config<S> {
        &self.config
    }

    pub fn thread_pool(&self) -> Option<&ThreadPool> {
        self.thread_pool.as_ref()
    }

    /// Best local alignment of `seq1` (columns) against `seq2` (rows).
    pub fn align(&self, seq1: &[u8], seq2: &[u8]) -> Result<Alignment<S>> {
        self.align_with_stats(seq1, seq2).map(|(alignment, _)| alignment)
    }

    pub fn align_with_stats(&self, seq1: &[u8], seq2: &[u8]) -> Result<(Alignment<S>, RunStats)> {
        self.config.check_lengths(seq1.len(), seq2.len())?;

        let dim = *self.config.tile_dim();
        if dim > seq1.len() && dim > seq2.len() {
            log::warn!(
                "Tile dimension ({dim}) exceeds both sequence lengths ({}, {}), the whole matrix fits \
                 in a single padded tile",
                seq1.len(),
                seq2.len()
            );
        }

        let seq1 = Sequence::new(seq1, dim)?;
        let seq2 = Sequence::new(seq2, dim)?;
        self.execute(seq1, seq2)
    }

    /// Align sequences that are already padded to the engine's tile dimension.
    pub(crate) fn execute(
        &self,
        seq1: Sequence,
        seq2: Sequence,
    ) -> Result<(Alignment<S>, RunStats)> {
        let run = Run::new(&self.config, seq1, seq2)?;
        match &self.thread_pool {
            Some(pool) => pool.install(|| run.execute()),
            None => run.execute(),
        }
    }
}

/// Align two sequences with a default engine for the given tile dimension and scoring.
pub fn align<S: Score>(
    seq1: &[u8],
    seq2: &[u8],
    tile_dim: usize,
    scoring: tilesw_core_rs::Scoring<S>,
) -> Result<Alignment<S>> {
    Engine::builder()
        .set_tile_dim(tile_dim)
        .set_scoring(scoring)
        .build()?
        .align(seq1, seq2)
}
