#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};

use super::GAP;

/// `Op` represents a single column of a pairwise alignment.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Op {
    /// Represents a gap in the first sequence (v)
    GapFirst,
    /// Represents a gap in the second sequence (^)
    GapSecond,
    /// Represents a match between the sequences (=)
    Match,
    /// Represents a mismatch between the sequences (X)
    Mismatch,
}

impl Op {
    /// Returns the symbol representation of the operation.
    pub fn symbol(&self) -> char {
        match self {
            Op::GapFirst => 'v',
            Op::GapSecond => '^',
            Op::Match => '=',
            Op::Mismatch => 'X',
        }
    }

    /// Classify a column of two aligned symbols. Returns None for a double gap.
    pub fn classify(s1: u8, s2: u8) -> Option<Self> {
        match (s1 == GAP, s2 == GAP) {
            (true, true) => None,
            (true, false) => Some(Op::GapFirst),
            (false, true) => Some(Op::GapSecond),
            (false, false) if s1 == s2 => Some(Op::Match),
            (false, false) => Some(Op::Mismatch),
        }
    }
}

impl TryFrom<char> for Op {
    type Error = ();

    /// Tries to convert a character into an `Op`.
    /// Returns an error if the character does not represent a valid operation.
    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'v' => Ok(Op::GapFirst),
            '^' => Ok(Op::GapSecond),
            '=' => Ok(Op::Match),
            'X' => Ok(Op::Mismatch),
            _ => Err(()),
        }
    }
}
