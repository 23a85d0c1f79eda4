use eyre::Result;
use rayon::{ThreadPool, ThreadPoolBuilder};

use tilesw_core_rs::num::Score;
use tilesw_core_rs::{parallelism, Scoring};

use super::config::Config;
use super::Engine;
use crate::pairwise::sw::algo::Strategy;
use crate::pairwise::sw::schedule::Schedule;

pub struct EngineBuilder<S: Score> {
    tile_dim: usize,
    scoring: Scoring<S>,
    max_len: usize,
    strategy: Strategy,
    schedule: Schedule,
    threads: Option<isize>,
    thread_pool: Option<ThreadPool>,
}

impl<S: Score> Default for EngineBuilder<S> {
    fn default() -> Self {
        let (tile_dim, scoring, max_len, strategy, schedule) = Config::default().dissolve();
        Self {
            tile_dim,
            scoring,
            max_len,
            strategy,
            schedule,
            threads: None,
            thread_pool: None,
        }
    }
}

impl<S: Score> EngineBuilder<S> {
    pub fn set_tile_dim(mut self, tile_dim: usize) -> Self {
        self.tile_dim = tile_dim;
        self
    }

    pub fn set_scoring(mut self, scoring: Scoring<S>) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn set_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    pub fn set_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn set_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Size of a dedicated pool for wavefront runs, see [`parallelism::available`].
    /// Ignored if an explicit pool is set.
    pub fn set_threads(mut self, threads: isize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn set_thread_pool(mut self, pool: ThreadPool) -> Self {
        self.thread_pool = Some(pool);
        self
    }

    pub fn build(self) -> Result<Engine<S>> {
        let config = Config::new(
            self.tile_dim,
            self.scoring,
            self.max_len,
            self.strategy,
            self.schedule,
        )?;

        let pool = match (self.thread_pool, self.threads) {
            (Some(pool), threads) => {
                if threads.is_some() {
                    log::warn!("Both a thread pool and a thread count were given, using the pool");
                }
                Some(pool)
            }
            (None, Some(threads)) => Some(
                ThreadPoolBuilder::new()
                    .num_threads(parallelism::available(threads)?)
                    .build()?,
            ),
            (None, None) => None,
        };

        if pool.is_some() && config.schedule() == &Schedule::Sequential {
            log::warn!("Thread pool is unused by the sequential schedule");
        }

        Ok(Engine::new(config, pool))
    }
}
