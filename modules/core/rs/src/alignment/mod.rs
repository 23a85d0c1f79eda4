pub use alignment::Alignment;
pub use op::Op;

mod alignment;
mod op;

/// Symbol inserted into an aligned sequence where it contributes nothing to the column.
pub const GAP: u8 = b'-';
