use std::sync::OnceLock;

use derive_getters::{Dissolve, Getters};

use tilesw_core_rs::num::Score;

use super::grid::{Grid, TileCoord};
use super::matrix::TileMatrix;

/// Bottom row and right column of a computed tile, `dim + 1` values each.
/// Both vectors end with the same bottom-right corner value.
#[derive(Clone, Eq, PartialEq, Debug, Getters, Dissolve)]
pub struct BoundaryRecord<S: Score> {
    bottom: Vec<S>,
    right: Vec<S>,
}

impl<S: Score> BoundaryRecord<S> {
    pub fn from_tile(matrix: &TileMatrix<S>) -> Self {
        let dim = matrix.dim();
        Self {
            bottom: matrix.row(dim).to_vec(),
            right: matrix.column(dim).collect(),
        }
    }

    pub fn corner(&self) -> S {
        self.bottom[self.bottom.len() - 1]
    }
}

/// Write-once, read-many table of boundary records, one slot per tile.
///
/// Slots are `OnceLock`s: the tile owning a slot is its only writer and all readers target
/// slots completed earlier in the schedule, so concurrent tiles of a wavefront never contend.
#[derive(Debug)]
pub struct BoundaryStore<S: Score> {
    grid: Grid,
    slots: Vec<OnceLock<BoundaryRecord<S>>>,
}

impl<S: Score> BoundaryStore<S> {
    pub fn new(grid: Grid) -> Self {
        let slots = (0..grid.tiles()).map(|_| OnceLock::new()).collect();
        Self { grid, slots }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Persist the boundary of `tile`. Writing the same slot twice is a scheduling bug.
    pub fn store(&self, tile: TileCoord, record: BoundaryRecord<S>) {
        debug_assert_eq!(record.bottom.len(), *self.grid.dim() + 1);
        debug_assert_eq!(record.right.len(), *self.grid.dim() + 1);

        if self.slots[self.grid.index(tile)].set(record).is_err() {
            panic!("Boundary of tile {tile} was written twice");
        }
    }

    /// Boundary record of an already processed tile. Reading an empty slot is a scheduling bug.
    pub fn get(&self, tile: TileCoord) -> &BoundaryRecord<S> {
        match self.slots[self.grid.index(tile)].get() {
            Some(record) => record,
            None => panic!("Boundary of tile {tile} was read before it was computed"),
        }
    }

    pub fn is_stored(&self, tile: TileCoord) -> bool {
        self.slots[self.grid.index(tile)].get().is_some()
    }

    /// Whether every tile of the grid has stored its boundary.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|x| x.get().is_some())
    }

    /// Top-row input of `tile`: the bottom row of the tile above, or None on the top edge.
    pub fn top_input(&self, tile: TileCoord) -> Option<&[S]> {
        self.grid
            .above(tile)
            .map(|above| self.get(above).bottom.as_slice())
    }

    /// Left-column input of `tile`: the right column of the tile to the left.
    /// None on the left edge.
    pub fn left_input(&self, tile: TileCoord) -> Option<&[S]> {
        self.grid
            .left(tile)
            .map(|left| self.get(left).right.as_slice())
    }
}
