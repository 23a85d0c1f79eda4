use itertools::iproduct;

use super::grid::{Grid, TileCoord};

/// Order in which tiles of the forward pass are processed.
///
/// Tile `(r, c)` depends only on `(r - 1, c)` and `(r, c - 1)`, so both policies are valid
/// linearizations of that partial order.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash)]
pub enum Schedule {
    /// Row-major, one tile at a time
    #[default]
    Sequential,
    /// Anti-diagonal batches `row + col = k`, tiles of a batch run concurrently
    Wavefront,
}

impl Grid {
    /// All tiles, row by row, left to right.
    pub fn row_major(&self) -> impl Iterator<Item = TileCoord> + '_ {
        iproduct!(0..*self.rows(), 0..*self.cols()).map(|(row, col)| TileCoord::new(row, col))
    }

    /// Number of anti-diagonal batches, `rows + cols - 1` for a non-empty grid.
    pub fn wavefront_count(&self) -> usize {
        if self.tiles() == 0 {
            0
        } else {
            self.rows() + self.cols() - 1
        }
    }

    /// Tiles of the k-th anti-diagonal (`row + col = k`), ordered by ascending row.
    pub fn wavefront(&self, k: usize) -> Vec<TileCoord> {
        let (rows, cols) = (*self.rows(), *self.cols());
        if k >= self.wavefront_count() {
            return Vec::new();
        }

        let first = k.saturating_sub(cols - 1);
        let last = k.min(rows - 1);
        (first..=last)
            .map(|row| TileCoord::new(row, k - row))
            .collect()
    }

    /// All anti-diagonal batches in dependency order.
    pub fn wavefronts(&self) -> impl Iterator<Item = Vec<TileCoord>> + '_ {
        (0..self.wavefront_count()).map(move |k| self.wavefront(k))
    }
}
