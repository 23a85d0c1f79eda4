use std::ops::Range;

use eyre::{bail, ensure, Result};

use crate::alignment::GAP;

/// Symbol used to pad sequences up to a whole number of tiles. Never a valid sequence symbol.
pub const PADDING: u8 = 0;

/// Immutable sequence stored in a zero-padded buffer of `ceil(len / tile) * tile + 1` bytes.
/// The trailing slot mirrors the terminator expected by accelerator-side buffers.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct Sequence {
    buffer: Vec<u8>,
    len: usize,
}

impl Sequence {
    /// Size of the padded buffer required to hold `len` symbols split into tiles of `tile` symbols.
    pub fn padded_len(len: usize, tile: usize) -> usize {
        len.div_ceil(tile) * tile + 1
    }

    pub fn new(symbols: &[u8], tile: usize) -> Result<Self> {
        ensure!(tile > 0, "Tile dimension must be greater than zero");
        check_symbols(symbols)?;

        let mut buffer = vec![PADDING; Self::padded_len(symbols.len(), tile)];
        buffer[..symbols.len()].copy_from_slice(symbols);
        Ok(Self {
            buffer,
            len: symbols.len(),
        })
    }

    /// Wrap an already padded buffer. Everything after the first `len` bytes must be padding.
    pub fn from_padded(buffer: Vec<u8>, len: usize, tile: usize) -> Result<Self> {
        ensure!(tile > 0, "Tile dimension must be greater than zero");
        ensure!(
            buffer.len() == Self::padded_len(len, tile),
            "Padded buffer has {} bytes, expected {} for {len} symbols and tile dimension {tile}",
            buffer.len(),
            Self::padded_len(len, tile)
        );
        check_symbols(&buffer[..len])?;
        ensure!(
            buffer[len..].iter().all(|x| *x == PADDING),
            "Padded buffer contains symbols beyond the declared sequence length ({len})"
        );
        Ok(Self { buffer, len })
    }

    /// Number of true (unpadded) symbols.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True symbols without padding.
    pub fn symbols(&self) -> &[u8] {
        &self.buffer[..self.len]
    }

    /// The whole padded buffer, including the terminator slot.
    pub fn padded(&self) -> &[u8] {
        &self.buffer
    }

    /// A window of the padded buffer. Ranges beyond the buffer are a caller bug.
    pub fn window(&self, range: Range<usize>) -> &[u8] {
        &self.buffer[range]
    }

    /// Symbol at the 0-based position `pos` (must be inside the true sequence).
    #[inline(always)]
    pub fn at(&self, pos: usize) -> u8 {
        debug_assert!(pos < self.len, "{pos} is outside of the sequence (len = {})", self.len);
        self.buffer[pos]
    }
}

/// Padding and gap bytes are reserved for the padded buffers and the aligned output.
fn check_symbols(symbols: &[u8]) -> Result<()> {
    for (reserved, name) in [(PADDING, "padding"), (GAP, "gap")] {
        if let Some(pos) = symbols.iter().position(|x| *x == reserved) {
            bail!("Reserved {name} byte ({reserved}) at position {pos} of the sequence");
        }
    }
    Ok(())
}
