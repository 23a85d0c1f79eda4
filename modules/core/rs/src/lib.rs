pub use scoring::Scoring;
pub use seq::Sequence;

pub mod alignment;
pub mod num;
pub mod parallelism;
pub mod scoring;
pub mod seq;
