pub use best::{Best, SharedBest};

use tilesw_core_rs::num::Score;

mod best;

/// A scored cell of the DP matrix in absolute 1-based coordinates, where a traceback may start.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct AlignmentSeed<S: Score> {
    pub row: usize,
    pub col: usize,
    pub score: S,
}
