use derive_getters::{Dissolve, Getters};
use eyre::{ensure, Result};

use tilesw_core_rs::num::Score;
use tilesw_core_rs::Sequence;

use super::engine::{Engine, RunStats};

/// Flat input buffers in the layout expected by accelerator-side kernels.
///
/// Sequences are zero-padded to `ceil(len / tile_dim) * tile_dim + 1` bytes. `seqsize` holds the
/// true lengths `[len1, len2]` and `tilenum` the tile counts `[cols, rows]`.
#[derive(Clone, PartialEq, Eq, Debug, Getters, Dissolve)]
pub struct HostInput {
    tile_dim: usize,
    seq1: Vec<u8>,
    seq2: Vec<u8>,
    seqsize: [usize; 2],
    tilenum: [usize; 2],
}

impl HostInput {
    pub fn new(seq1: &[u8], seq2: &[u8], tile_dim: usize) -> Result<Self> {
        let padded1 = Sequence::new(seq1, tile_dim)?;
        let padded2 = Sequence::new(seq2, tile_dim)?;
        Ok(Self {
            tile_dim,
            seq1: padded1.padded().to_vec(),
            seq2: padded2.padded().to_vec(),
            seqsize: [seq1.len(), seq2.len()],
            tilenum: [seq1.len().div_ceil(tile_dim), seq2.len().div_ceil(tile_dim)],
        })
    }

    /// Wrap buffers prepared elsewhere. Sizes and tile counts must agree with each other.
    pub fn from_raw(
        tile_dim: usize,
        seq1: Vec<u8>,
        seq2: Vec<u8>,
        seqsize: [usize; 2],
        tilenum: [usize; 2],
    ) -> Result<Self> {
        let input = Self {
            tile_dim,
            seq1,
            seq2,
            seqsize,
            tilenum,
        };
        input.validate()?;
        Ok(input)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.tile_dim > 0, "Tile dimension must be greater than zero");
        for (name, buffer, len) in [
            ("seq1", &self.seq1, self.seqsize[0]),
            ("seq2", &self.seq2, self.seqsize[1]),
        ] {
            let expected = Sequence::padded_len(len, self.tile_dim);
            ensure!(
                buffer.len() == expected,
                "{name} buffer has {} bytes, expected {expected} for {len} symbols",
                buffer.len()
            );
        }

        let expected = [
            self.seqsize[0].div_ceil(self.tile_dim),
            self.seqsize[1].div_ceil(self.tile_dim),
        ];
        ensure!(
            self.tilenum == expected,
            "Tile counts {:?} don't match sequence sizes {:?}, expected {expected:?}",
            self.tilenum,
            self.seqsize
        );
        Ok(())
    }

    /// Capacity of each output buffer: the longest possible local alignment.
    pub fn output_len(&self) -> usize {
        self.seqsize[0] + self.seqsize[1]
    }
}

/// Fixed-size output buffers. The alignment is written at the front, the rest stays zero.
#[derive(Clone, PartialEq, Eq, Debug, Getters, Dissolve)]
pub struct HostOutput<S: Score> {
    score: S,
    aligned1: Vec<u8>,
    aligned2: Vec<u8>,
    stats: RunStats,
}

impl<S: Score> HostOutput<S> {
    /// Both aligned sequences, cut at the first zero byte.
    pub fn aligned(&self) -> (&[u8], &[u8]) {
        (trim(&self.aligned1), trim(&self.aligned2))
    }
}

fn trim(buffer: &[u8]) -> &[u8] {
    let end = buffer.iter().position(|x| *x == 0).unwrap_or(buffer.len());
    &buffer[..end]
}

impl<S: Score> Engine<S> {
    /// Run the engine over pre-padded host buffers.
    pub fn run_host(&self, input: &HostInput) -> Result<HostOutput<S>> {
        input.validate()?;
        ensure!(
            input.tile_dim == *self.config().tile_dim(),
            "Host buffers are padded for tile dimension {}, the engine uses {}",
            input.tile_dim,
            self.config().tile_dim()
        );

        let [len1, len2] = input.seqsize;
        self.config().check_lengths(len1, len2)?;
        let seq1 = Sequence::from_padded(input.seq1.clone(), len1, input.tile_dim)?;
        let seq2 = Sequence::from_padded(input.seq2.clone(), len2, input.tile_dim)?;

        let (alignment, stats) = self.execute(seq1, seq2)?;

        let (score, aligned1, aligned2, _, _) = alignment.dissolve();
        let mut output1 = vec![0; input.output_len()];
        let mut output2 = vec![0; input.output_len()];
        output1[..aligned1.len()].copy_from_slice(&aligned1);
        output2[..aligned2.len()].copy_from_slice(&aligned2);

        Ok(HostOutput {
            score,
            aligned1: output1,
            aligned2: output2,
            stats,
        })
    }
}
