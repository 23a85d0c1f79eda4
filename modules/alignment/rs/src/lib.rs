pub use pairwise::sw::{align, Engine, EngineBuilder, RunStats};

pub mod pairwise;
