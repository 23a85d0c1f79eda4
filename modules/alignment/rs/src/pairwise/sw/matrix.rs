use tilesw_core_rs::num::Score;

/// Local `(dim + 1) × (dim + 1)` score matrix of a single tile, stored row-major.
/// Row 0 and column 0 hold the boundary inherited from the neighbouring tiles.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct TileMatrix<S: Score> {
    dim: usize,
    cells: Vec<S>,
}

impl<S: Score> TileMatrix<S> {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            cells: vec![S::zero(); (dim + 1) * (dim + 1)],
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Resize the matrix for a new tile dimension. All cells are reset to zero.
    pub fn reset(&mut self, dim: usize) {
        self.dim = dim;
        self.cells.clear();
        self.cells.resize((dim + 1) * (dim + 1), S::zero());
    }

    #[inline(always)]
    pub fn at(&self, i: usize, j: usize) -> S {
        debug_assert!(i <= self.dim && j <= self.dim);
        self.cells[i * (self.dim + 1) + j]
    }

    #[inline(always)]
    pub fn set(&mut self, i: usize, j: usize, value: S) {
        debug_assert!(i <= self.dim && j <= self.dim);
        self.cells[i * (self.dim + 1) + j] = value;
    }

    /// The i-th row, including the boundary cell at column 0.
    pub fn row(&self, i: usize) -> &[S] {
        let width = self.dim + 1;
        &self.cells[i * width..(i + 1) * width]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [S] {
        let width = self.dim + 1;
        &mut self.cells[i * width..(i + 1) * width]
    }

    /// The j-th column, including the boundary cell at row 0.
    pub fn column(&self, j: usize) -> impl ExactSizeIterator<Item = S> + '_ {
        (0..self.dim + 1).map(move |i| self.at(i, j))
    }

    /// Install the inherited boundary.
    /// `None` stands for the implicit all-zero border of the matrix.
    /// The corner is taken from the top input, which repeats the left input's first value.
    pub fn load_boundary(&mut self, top: Option<&[S]>, left: Option<&[S]>) {
        let width = self.dim + 1;
        match top {
            Some(top) => {
                debug_assert_eq!(top.len(), width);
                self.row_mut(0).copy_from_slice(top);
            }
            None => self.row_mut(0).fill(S::zero()),
        }
        if left.is_none() || top.is_none() {
            self.set(0, 0, S::zero());
        }

        match left {
            Some(left) => {
                debug_assert_eq!(left.len(), width);
                debug_assert!(top.is_none() || left[0] == self.at(0, 0));
                for (i, value) in left.iter().enumerate().skip(1) {
                    self.set(i, 0, *value);
                }
            }
            None => {
                for i in 1..width {
                    self.set(i, 0, S::zero());
                }
            }
        }
    }

    /// All cells, row-major. Mostly useful for invariants checks in tests.
    pub fn cells(&self) -> &[S] {
        &self.cells
    }
}
