use std::thread::available_parallelism;

use eyre::Result;

/// Resolve `requested` threads against `cores` available ones.
fn resolve(requested: isize, cores: usize) -> usize {
    if requested > 0 {
        requested.unsigned_abs().min(cores)
    } else if requested == 0 {
        1
    } else {
        // -1 keeps every core, -2 leaves one free, ...
        cores.saturating_sub(requested.unsigned_abs() - 1).max(1)
    }
}

/// Number of worker threads for a requested value:
/// - positive values are capped by the available parallelism;
/// - zero means a single thread;
/// - negative values count from the top, `-1` is all cores, `-2` all but one, etc.
pub fn available(requested: isize) -> Result<usize> {
    Ok(resolve(requested, available_parallelism()?.get()))
}
