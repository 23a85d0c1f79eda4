use derive_getters::{Dissolve, Getters};
use eyre::{ensure, Result};

use tilesw_core_rs::num::Score;
use tilesw_core_rs::Scoring;

use crate::pairwise::sw::algo::Strategy;
use crate::pairwise::sw::schedule::Schedule;

/// Parameters of an alignment run, fixed for the lifetime of an [`super::Engine`].
#[derive(Clone, PartialEq, Eq, Debug, Getters, Dissolve)]
pub struct Config<S: Score> {
    /// Side length of the square tiles
    tile_dim: usize,
    scoring: Scoring<S>,
    /// Longest accepted sequence, checked before any tile runs
    max_len: usize,
    strategy: Strategy,
    schedule: Schedule,
}

impl<S: Score> Config<S> {
    pub const DEFAULT_TILE_DIM: usize = 16;

    pub fn new(
        tile_dim: usize,
        scoring: Scoring<S>,
        max_len: usize,
        strategy: Strategy,
        schedule: Schedule,
    ) -> Result<Self> {
        let config = Self {
            tile_dim,
            scoring,
            max_len,
            strategy,
            schedule,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.tile_dim > 0, "Tile dimension must be greater than zero");
        ensure!(self.max_len > 0, "Maximum sequence length must be greater than zero");
        self.strategy.validate()
    }

    /// Reject sequences that exceed `max_len` or whose best possible score overflows `S`.
    pub fn check_lengths(&self, len1: usize, len2: usize) -> Result<()> {
        for (name, len) in [("seq1", len1), ("seq2", len2)] {
            ensure!(
                len <= self.max_len,
                "{name} has {len} symbols, the maximum allowed length is {}",
                self.max_len
            );
        }

        // No cell exceeds min(len1, len2) matches in a row
        let longest = len1.min(len2);
        let ceiling = num::cast::<usize, S>(longest)
            .and_then(|x| x.checked_mul(&self.scoring.matched.max(S::zero())));
        ensure!(
            ceiling.is_some(),
            "Scores of up to {longest} matches of {} overflow the score type (max {})",
            self.scoring.matched,
            S::max_value()
        );
        Ok(())
    }
}

impl<S: Score> Default for Config<S> {
    fn default() -> Self {
        Self {
            tile_dim: Self::DEFAULT_TILE_DIM,
            scoring: Scoring::default(),
            max_len: usize::MAX,
            strategy: Strategy::default(),
            schedule: Schedule::default(),
        }
    }
}
