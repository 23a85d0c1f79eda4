pub use algo::Strategy;
pub use engine::{align, Config, Engine, EngineBuilder, RunStats};
pub use host::{HostInput, HostOutput};
pub use schedule::Schedule;

pub mod algo;
pub mod boundary;
pub mod grid;
pub mod matrix;
pub mod schedule;
pub mod storage;
pub mod traceback;

mod engine;
mod host;
