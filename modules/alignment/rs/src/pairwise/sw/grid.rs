use std::ops::Range;

use derive_getters::Getters;
use derive_more::{Constructor, Display};
use eyre::{ensure, Result};

/// Position of a tile in the tile grid. `row` runs along seq2, `col` along seq1.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Constructor, Display)]
#[display("({row}, {col})")]
pub struct TileCoord {
    pub row: usize,
    pub col: usize,
}

/// Partition of the conceptual `(len2 + 1) × (len1 + 1)` DP matrix into square tiles.
///
/// Every conversion between absolute matrix coordinates (1-based, row 0 / column 0 being the
/// implicit zero border) and tile-local coordinates (row 0 / column 0 being the inherited
/// boundary) goes through this type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Getters)]
pub struct Grid {
    /// Tile side length
    dim: usize,
    /// True length of seq1 (columns)
    len1: usize,
    /// True length of seq2 (rows)
    len2: usize,
    /// Number of tile rows, ceil(len2 / dim)
    rows: usize,
    /// Number of tile columns, ceil(len1 / dim)
    cols: usize,
}

impl Grid {
    pub fn new(dim: usize, len1: usize, len2: usize) -> Result<Self> {
        ensure!(dim > 0, "Tile dimension must be greater than zero");
        Ok(Self {
            dim,
            len1,
            len2,
            rows: len2.div_ceil(dim),
            cols: len1.div_ceil(dim),
        })
    }

    /// Total number of tiles.
    pub fn tiles(&self) -> usize {
        self.rows * self.cols
    }

    pub fn contains(&self, tile: TileCoord) -> bool {
        tile.row < self.rows && tile.col < self.cols
    }

    /// Row-major index of the tile, used to address per-tile storage.
    #[inline(always)]
    pub fn index(&self, tile: TileCoord) -> usize {
        debug_assert!(self.contains(tile), "Tile {tile} is outside of the grid");
        tile.row * self.cols + tile.col
    }

    /// Window of a padded sequence buffer covered by the k-th tile along either axis.
    #[inline(always)]
    pub fn span(&self, k: usize) -> Range<usize> {
        k * self.dim..(k + 1) * self.dim
    }

    /// Tile owning the absolute cell (row, col). Both coordinates must be >= 1.
    #[inline(always)]
    pub fn owner(&self, row: usize, col: usize) -> TileCoord {
        debug_assert!(row >= 1 && col >= 1, "Border cell ({row}, {col}) has no owner");
        TileCoord::new((row - 1) / self.dim, (col - 1) / self.dim)
    }

    /// Absolute cell (row, col) expressed in the local coordinates of `tile`.
    /// Cells on the tile's inherited boundary map to local row 0 / column 0.
    #[inline(always)]
    pub fn to_local(&self, tile: TileCoord, row: usize, col: usize) -> (usize, usize) {
        let (row0, col0) = (tile.row * self.dim, tile.col * self.dim);
        debug_assert!(
            row >= row0 && row <= row0 + self.dim && col >= col0 && col <= col0 + self.dim,
            "Cell ({row}, {col}) is not visible from tile {tile}"
        );
        (row - row0, col - col0)
    }

    /// Local cell (i, j) of `tile` in absolute coordinates.
    #[inline(always)]
    pub fn to_absolute(&self, tile: TileCoord, i: usize, j: usize) -> (usize, usize) {
        (tile.row * self.dim + i, tile.col * self.dim + j)
    }

    /// Whether the absolute cell lies inside the true (unpadded) matrix interior.
    #[inline(always)]
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row >= 1 && col >= 1 && row <= self.len2 && col <= self.len1
    }

    /// Number of (rows, cols) of the tile interior that lie inside the true sequences.
    /// Equal to (dim, dim) for every tile except the overhanging last row/column.
    pub fn extent(&self, tile: TileCoord) -> (usize, usize) {
        let rows = self.len2.saturating_sub(tile.row * self.dim).min(self.dim);
        let cols = self.len1.saturating_sub(tile.col * self.dim).min(self.dim);
        (rows, cols)
    }

    /// The tile directly above, if any.
    pub fn above(&self, tile: TileCoord) -> Option<TileCoord> {
        (tile.row > 0).then(|| TileCoord::new(tile.row - 1, tile.col))
    }

    /// The tile directly to the left, if any.
    pub fn left(&self, tile: TileCoord) -> Option<TileCoord> {
        (tile.col > 0).then(|| TileCoord::new(tile.row, tile.col - 1))
    }
}
