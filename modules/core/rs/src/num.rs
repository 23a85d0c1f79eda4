use std::fmt::{Debug, Display};

/// T values are primitive integers
pub trait PrimInt: ::num::PrimInt + Debug + Default {}
impl<T: ::num::PrimInt + Debug + Default> PrimInt for T {}

/// Local alignment score - any signed primitive integer that can be shared between threads.
/// Negative values only appear as scoring constants, DP cells are always clamped at zero.
pub trait Score: PrimInt + ::num::Signed + Display + Send + Sync + 'static {}

impl<T: PrimInt + ::num::Signed + Display + Send + Sync + 'static> Score for T {}
